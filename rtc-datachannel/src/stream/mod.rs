#[cfg(test)]
mod stream_test;

use sctp::{StreamId, StreamPriority};
use std::collections::BTreeMap;
use std::fmt;

/// StreamState is the lifecycle state of a data channel stream.
///
/// A stream only moves forward: `Open`, then `Closing`, then `Closed`. Once
/// closed its entry is removed and the id may be opened again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamState {
    Closed,
    Open,
    Closing,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            StreamState::Closed => "Closed",
            StreamState::Open => "Open",
            StreamState::Closing => "Closing",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
struct StreamEntry {
    priority: StreamPriority,
    seq: u64,
    outgoing_reset_initiated: bool,
    incoming_reset_done: bool,
    outgoing_reset_done: bool,
}

impl StreamEntry {
    fn state(&self) -> StreamState {
        if self.outgoing_reset_initiated || self.incoming_reset_done {
            StreamState::Closing
        } else {
            StreamState::Open
        }
    }

    fn is_reset_complete(&self) -> bool {
        self.incoming_reset_done && self.outgoing_reset_done
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum OpenResult {
    Inserted,
    /// The stream was already open, its priority has been updated
    Updated,
    /// The stream is closing and can't be reopened until it is closed
    Rejected,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LocalResetResult {
    Unknown,
    /// The outgoing direction must be reset on the socket
    ResetRequired,
    InProgress,
}

/// What the owner of the table must do after a reset signal from the socket
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ResetProgress {
    /// The peer closed first, reset our outgoing direction too
    pub(crate) reset_outgoing: bool,
    /// Signal that the peer started closing the stream
    pub(crate) closing: bool,
    /// Both directions are reset and the entry has been removed
    pub(crate) closed: bool,
}

/// StreamTable tracks every known stream and drives stream reset negotiation
#[derive(Debug, Default)]
pub(crate) struct StreamTable {
    entries: BTreeMap<StreamId, StreamEntry>,
    next_seq: u64,
}

impl StreamTable {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn state(&self, stream_id: StreamId) -> StreamState {
        self.entries
            .get(&stream_id)
            .map_or(StreamState::Closed, StreamEntry::state)
    }

    pub(crate) fn is_open(&self, stream_id: StreamId) -> bool {
        self.state(stream_id) == StreamState::Open
    }

    pub(crate) fn priority(&self, stream_id: StreamId) -> Option<StreamPriority> {
        self.entries.get(&stream_id).map(|entry| entry.priority)
    }

    pub(crate) fn open(&mut self, stream_id: StreamId, priority: StreamPriority) -> OpenResult {
        if let Some(entry) = self.entries.get_mut(&stream_id) {
            return match entry.state() {
                StreamState::Open => {
                    entry.priority = priority;
                    OpenResult::Updated
                }
                _ => OpenResult::Rejected,
            };
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            stream_id,
            StreamEntry {
                priority,
                seq,
                outgoing_reset_initiated: false,
                incoming_reset_done: false,
                outgoing_reset_done: false,
            },
        );
        OpenResult::Inserted
    }

    /// priorities returns every stream with its priority, in the order the
    /// streams were opened
    pub(crate) fn priorities(&self) -> Vec<(StreamId, StreamPriority)> {
        let mut entries: Vec<(&StreamId, &StreamEntry)> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries
            .into_iter()
            .map(|(stream_id, entry)| (*stream_id, entry.priority))
            .collect()
    }

    pub(crate) fn reset_locally(&mut self, stream_id: StreamId) -> LocalResetResult {
        let Some(entry) = self.entries.get_mut(&stream_id) else {
            return LocalResetResult::Unknown;
        };
        match entry.state() {
            StreamState::Open => {
                entry.outgoing_reset_initiated = true;
                LocalResetResult::ResetRequired
            }
            _ => LocalResetResult::InProgress,
        }
    }

    /// on_incoming_reset handles the peer resetting its outgoing direction of
    /// the stream. Returns None if the stream is unknown or was already reset
    /// by the peer.
    pub(crate) fn on_incoming_reset(&mut self, stream_id: StreamId) -> Option<ResetProgress> {
        let entry = self.entries.get_mut(&stream_id)?;
        if entry.incoming_reset_done {
            return None;
        }
        entry.incoming_reset_done = true;

        let mut progress = ResetProgress::default();
        if !entry.outgoing_reset_initiated {
            entry.outgoing_reset_initiated = true;
            progress.reset_outgoing = true;
            progress.closing = true;
        }
        if entry.is_reset_complete() {
            self.entries.remove(&stream_id);
            progress.closed = true;
        }
        Some(progress)
    }

    /// on_reset_performed handles the socket completing the reset of our
    /// outgoing direction. Returns None if the stream is unknown or its
    /// outgoing direction was already reset.
    pub(crate) fn on_reset_performed(&mut self, stream_id: StreamId) -> Option<ResetProgress> {
        let entry = self.entries.get_mut(&stream_id)?;
        if entry.outgoing_reset_done {
            return None;
        }
        entry.outgoing_reset_done = true;

        let mut progress = ResetProgress::default();
        if entry.is_reset_complete() {
            self.entries.remove(&stream_id);
            progress.closed = true;
        }
        Some(progress)
    }

    /// take_all removes every stream, returning their ids in ascending order
    pub(crate) fn take_all(&mut self) -> Vec<StreamId> {
        let entries = std::mem::take(&mut self.entries);
        entries.into_keys().collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
