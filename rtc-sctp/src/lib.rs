#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! Interface of a sans-io SCTP socket, as consumed by the WebRTC data channel
//! transport.
//!
//! The socket performs no I/O whatsoever. Packets received from the lower
//! transport are fed with [`SctpSocket::handle_input`], time is advanced with
//! [`SctpSocket::advance_time`], and everything the socket wants to tell its
//! owner (packets to send, association state changes, received messages,
//! stream resets, buffered amount changes) is drained with
//! [`SctpSocket::poll_event`].

mod config;
mod error_cause;
mod message;
mod socket;

pub use config::{
    DcSctpOptions, SendOptions, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_MTU, DEFAULT_SCTP_PORT,
    DEFAULT_STREAM_PRIORITY,
};
pub use error_cause::ErrorCauseCode;
pub use message::{Message, PpId, StreamId, StreamPriority};
pub use socket::{
    ErrorKind, ResetStreamsStatus, SctpSocket, SctpSocketFactory, SendStatus, SocketEvent,
    SocketState,
};
