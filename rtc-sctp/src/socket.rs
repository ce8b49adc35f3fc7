use crate::config::{DcSctpOptions, SendOptions};
use crate::message::{Message, StreamId, StreamPriority};

use bytes::Bytes;
use std::fmt;
use std::time::Instant;

/// State of the association carried by a socket
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SocketState {
    /// The socket is closed, `connect` starts a new association
    #[default]
    Closed,
    /// INIT or COOKIE-ECHO sent, waiting for the peer
    Connecting,
    /// The association is established
    Connected,
    /// A graceful shutdown is in progress
    ShuttingDown,
}

impl fmt::Display for SocketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            SocketState::Closed => "Closed",
            SocketState::Connecting => "Connecting",
            SocketState::Connected => "Connected",
            SocketState::ShuttingDown => "ShuttingDown",
        };
        write!(f, "{s}")
    }
}

/// Result of `SctpSocket::send`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SendStatus {
    /// The message was enqueued
    Success,
    /// The message was empty, which SCTP can't carry
    ErrorMessageEmpty,
    /// The message is larger than the negotiated max message size
    ErrorMessageTooLarge,
    /// The send buffer is full; retry after the buffered amount goes low
    ErrorResourceExhausted,
    /// The socket is shutting down and no longer accepts messages
    ErrorShuttingDown,
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            SendStatus::Success => "SUCCESS",
            SendStatus::ErrorMessageEmpty => "ERROR_MESSAGE_EMPTY",
            SendStatus::ErrorMessageTooLarge => "ERROR_MESSAGE_TOO_LARGE",
            SendStatus::ErrorResourceExhausted => "ERROR_RESOURCE_EXHAUSTED",
            SendStatus::ErrorShuttingDown => "ERROR_SHUTTING_DOWN",
        };
        write!(f, "{s}")
    }
}

/// Result of `SctpSocket::reset_streams`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResetStreamsStatus {
    /// The reset request was sent to the peer
    Performed,
    /// Another reset is in flight, the request is queued behind it
    Deferred,
    /// There is no association yet
    NotConnected,
    /// The peer doesn't support stream reconfiguration, RFC 6525
    NotSupported,
}

/// Kind of an error reported by the socket
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NoError,
    /// Too many retries or timeouts, the peer is considered unreachable
    TooManyRetries,
    /// The operation requires an established association
    NotConnected,
    /// A received packet or chunk could not be parsed
    ParseFailed,
    /// A chunk was received in an unexpected state
    WrongSequence,
    /// The peer sent an ERROR or ABORT chunk
    PeerReported,
    /// The peer violated the protocol
    ProtocolViolation,
    /// Out of memory or send buffer space
    ResourceExhaustion,
    /// The operation is not supported by the peer
    UnsupportedOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            ErrorKind::NoError => "NO_ERROR",
            ErrorKind::TooManyRetries => "TOO_MANY_RETRIES",
            ErrorKind::NotConnected => "NOT_CONNECTED",
            ErrorKind::ParseFailed => "PARSE_FAILED",
            ErrorKind::WrongSequence => "WRONG_SEQUENCE",
            ErrorKind::PeerReported => "PEER_REPORTED",
            ErrorKind::ProtocolViolation => "PROTOCOL_VIOLATION",
            ErrorKind::ResourceExhaustion => "RESOURCE_EXHAUSTION",
            ErrorKind::UnsupportedOperation => "UNSUPPORTED_OPERATION",
        };
        write!(f, "{s}")
    }
}

/// SocketEvent is everything a socket reports to its owner, drained through
/// `SctpSocket::poll_event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// A packet that must be written to the lower transport
    SendPacket(Bytes),
    /// A complete user message was received
    OnMessageReceived(Message),
    /// The association is established
    OnConnected,
    /// The association was gracefully closed
    OnClosed,
    /// The association was aborted, either locally or by the peer
    OnAborted(ErrorKind, String),
    /// The peer restarted the association
    OnConnectionRestarted,
    /// A non-fatal error
    OnError(ErrorKind, String),
    /// The peer refused to reset these outgoing streams
    OnStreamsResetFailed(Vec<StreamId>, String),
    /// Our outgoing reset of these streams has been performed
    OnStreamsResetPerformed(Vec<StreamId>),
    /// The peer has reset these streams in the incoming direction
    OnIncomingStreamsReset(Vec<StreamId>),
    /// The buffered amount of a stream dropped below its low threshold
    OnBufferedAmountLow(StreamId),
    /// The total buffered amount dropped below its low threshold
    OnTotalBufferedAmountLow,
}

/// SctpSocket is a sans-io SCTP endpoint carrying a single association.
///
/// Every method returns synchronously. Any work a call produces is reported
/// through [`SocketEvent`]s, which should be drained with `poll_event` after:
/// - a call was made to `handle_input`
/// - a call was made to `advance_time`
/// - any of the association or stream operations below
pub trait SctpSocket {
    /// Begins association setup
    fn connect(&mut self);

    /// Begins a graceful close of the association
    fn shutdown(&mut self);

    /// Closes the association immediately, without notifying the owner
    fn close(&mut self);

    fn state(&self) -> SocketState;

    fn options(&self) -> &DcSctpOptions;

    fn set_max_message_size(&mut self, max_message_size: usize);

    /// Processes one datagram received from the lower transport
    fn handle_input(&mut self, packet: &[u8]);

    /// Advances the socket clock, expiring any timer whose deadline passed
    fn advance_time(&mut self, now: Instant);

    /// Returns the earliest deadline of all running timers
    fn poll_timeout(&self) -> Option<Instant>;

    fn poll_event(&mut self) -> Option<SocketEvent>;

    fn send(&mut self, message: Message, send_options: &SendOptions) -> SendStatus;

    /// Requests an outgoing stream reset of `outgoing_streams`, RFC 6525
    fn reset_streams(&mut self, outgoing_streams: &[StreamId]) -> ResetStreamsStatus;

    fn set_stream_priority(&mut self, stream_id: StreamId, priority: StreamPriority);

    fn stream_priority(&self, stream_id: StreamId) -> StreamPriority;

    /// Returns the number of bytes queued but not yet acknowledged on a stream
    fn buffered_amount(&self, stream_id: StreamId) -> usize;

    fn buffered_amount_low_threshold(&self, stream_id: StreamId) -> usize;

    fn set_buffered_amount_low_threshold(&mut self, stream_id: StreamId, bytes: usize);
}

/// SctpSocketFactory creates the socket of a data channel transport
pub trait SctpSocketFactory {
    fn create(&self, log_prefix: &str, options: DcSctpOptions) -> Box<dyn SctpSocket>;
}

impl<F> SctpSocketFactory for F
where
    F: Fn(&str, DcSctpOptions) -> Box<dyn SctpSocket>,
{
    fn create(&self, log_prefix: &str, options: DcSctpOptions) -> Box<dyn SctpSocket> {
        self(log_prefix, options)
    }
}
