use bytes::Bytes;
use std::fmt;

/// StreamId identifies an SCTP stream within an association
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u16);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StreamId {
    fn from(v: u16) -> Self {
        StreamId(v)
    }
}

/// PpId is the Payload Protocol Identifier, a 32-bit tag carried in every
/// DATA chunk that identifies the user protocol of the payload
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PpId(pub u32);

impl fmt::Display for PpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PpId {
    fn from(v: u32) -> Self {
        PpId(v)
    }
}

/// StreamPriority is the relative scheduling weight of an outgoing stream.
/// 0 is the lowest priority.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamPriority(pub u16);

impl fmt::Display for StreamPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StreamPriority {
    fn from(v: u16) -> Self {
        StreamPriority(v)
    }
}

/// Message is a complete SCTP user message, either received from the peer
/// or about to be sent to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    stream_id: StreamId,
    ppid: PpId,
    payload: Bytes,
}

impl Message {
    pub fn new(stream_id: StreamId, ppid: PpId, payload: impl Into<Bytes>) -> Self {
        Self {
            stream_id,
            ppid,
            payload: payload.into(),
        }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn ppid(&self) -> PpId {
        self.ppid
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
