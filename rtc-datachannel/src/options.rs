use sctp::{DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_SCTP_PORT};
use serde::Deserialize;

/// StartOptions configures `DcSctpTransport::start`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartOptions {
    pub local_port: u16,
    pub remote_port: u16,
    /// Largest message accepted by `send_data`, 0 selects the 256 KiB default
    pub max_message_size: usize,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            local_port: DEFAULT_SCTP_PORT,
            remote_port: DEFAULT_SCTP_PORT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}
