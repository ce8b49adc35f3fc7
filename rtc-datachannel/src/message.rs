use bytes::Bytes;
use sctp::SendOptions;
use std::fmt;
use std::time::Duration;

/// DataMessageType is the kind of a message carried on a data channel
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DataMessageType {
    /// In-band DCEP control message
    Control,
    #[default]
    Text,
    Binary,
}

impl fmt::Display for DataMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            DataMessageType::Control => "Control",
            DataMessageType::Text => "Text",
            DataMessageType::Binary => "Binary",
        };
        write!(f, "{s}")
    }
}

/// Reliability of an outgoing message
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReliabilityType {
    /// Retransmitted until acknowledged
    #[default]
    Reliable,
    /// Abandoned after the given number of retransmissions. Zero makes the
    /// message unreliable.
    Rexmit(u16),
    /// Abandoned once the given lifetime has elapsed
    Timed(Duration),
}

/// SendDataParams are the delivery parameters of a single outgoing message
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SendDataParams {
    pub kind: DataMessageType,
    pub ordered: bool,
    pub reliability_type: ReliabilityType,
}

impl Default for SendDataParams {
    fn default() -> Self {
        Self {
            kind: DataMessageType::Text,
            ordered: true,
            reliability_type: ReliabilityType::Reliable,
        }
    }
}

impl SendDataParams {
    pub(crate) fn to_send_options(self) -> SendOptions {
        let (lifetime, max_retransmissions) = match self.reliability_type {
            ReliabilityType::Reliable => (None, None),
            ReliabilityType::Rexmit(n) => (None, Some(n)),
            ReliabilityType::Timed(lifetime) => (Some(lifetime), None),
        };
        SendOptions {
            unordered: !self.ordered,
            lifetime,
            max_retransmissions,
        }
    }
}

/// DataChannelMessage is a message written to the transport through
/// `sansio::Protocol::handle_write`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataChannelMessage {
    pub stream_id: u16,
    pub params: SendDataParams,
    pub payload: Bytes,
}
