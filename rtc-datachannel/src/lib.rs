#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! WebRTC data channel transport over SCTP, RFC 8831.
//!
//! [`DcSctpTransport`] binds an SCTP socket to the DTLS transport below it
//! and to the data channel layer above it. It maps data channel message
//! types to SCTP payload protocol identifiers and drives the stream reset
//! procedure that closes a data channel.

pub mod message;
mod options;
pub mod ppid;
mod sink;
mod stream;
mod transport;

pub use message::{DataChannelMessage, DataMessageType, ReliabilityType, SendDataParams};
pub use options::StartOptions;
pub use sink::DataChannelSink;
pub use stream::StreamState;
pub use transport::{DcSctpTransport, DtlsTransportEvent};
