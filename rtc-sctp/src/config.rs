use crate::message::StreamPriority;
use std::time::Duration;

/// Default SCTP port used by WebRTC data channels, RFC 8841
pub const DEFAULT_SCTP_PORT: u16 = 5000;
/// Default maximum size of a user message, 256 KiB
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 262144;
/// Initial MTU for outgoing packets (to DTLS)
pub const DEFAULT_MTU: usize = 1228;
/// Priority given to streams which never had one assigned
pub const DEFAULT_STREAM_PRIORITY: StreamPriority = StreamPriority(256);

const DEFAULT_MAX_RECEIVER_WINDOW_BUFFER_SIZE: usize = 1024 * 1024;
const DEFAULT_MAX_SEND_BUFFER_SIZE: usize = 2_000_000;
const DEFAULT_PER_STREAM_SEND_QUEUE_LIMIT: usize = 2_000_000;
const DEFAULT_TOTAL_BUFFERED_AMOUNT_LOW_THRESHOLD: usize = 1_800_000;
const DEFAULT_MAX_RETRANSMISSIONS: u32 = 10;
const DEFAULT_MAX_INIT_RETRANSMITS: u32 = 8;

/// DcSctpOptions collects the arguments to SCTP socket construction into
/// a single structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcSctpOptions {
    local_port: u16,
    remote_port: u16,
    announced_maximum_incoming_streams: u16,
    announced_maximum_outgoing_streams: u16,
    mtu: usize,
    max_message_size: usize,
    default_stream_priority: StreamPriority,
    max_receiver_window_buffer_size: usize,
    max_send_buffer_size: usize,
    per_stream_send_queue_limit: usize,
    default_stream_buffered_amount_low_threshold: usize,
    total_buffered_amount_low_threshold: usize,
    max_timer_backoff_duration: Option<Duration>,
    max_retransmissions: Option<u32>,
    max_init_retransmits: Option<u32>,
    enable_message_interleaving: bool,
}

impl Default for DcSctpOptions {
    fn default() -> Self {
        DcSctpOptions {
            local_port: DEFAULT_SCTP_PORT,
            remote_port: DEFAULT_SCTP_PORT,
            announced_maximum_incoming_streams: u16::MAX,
            announced_maximum_outgoing_streams: u16::MAX,
            mtu: DEFAULT_MTU,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            default_stream_priority: DEFAULT_STREAM_PRIORITY,
            max_receiver_window_buffer_size: DEFAULT_MAX_RECEIVER_WINDOW_BUFFER_SIZE,
            max_send_buffer_size: DEFAULT_MAX_SEND_BUFFER_SIZE,
            per_stream_send_queue_limit: DEFAULT_PER_STREAM_SEND_QUEUE_LIMIT,
            default_stream_buffered_amount_low_threshold: 0,
            total_buffered_amount_low_threshold: DEFAULT_TOTAL_BUFFERED_AMOUNT_LOW_THRESHOLD,
            max_timer_backoff_duration: None,
            max_retransmissions: Some(DEFAULT_MAX_RETRANSMISSIONS),
            max_init_retransmits: Some(DEFAULT_MAX_INIT_RETRANSMITS),
            enable_message_interleaving: false,
        }
    }
}

impl DcSctpOptions {
    pub fn with_local_port(mut self, value: u16) -> Self {
        self.local_port = value;
        self
    }

    pub fn with_remote_port(mut self, value: u16) -> Self {
        self.remote_port = value;
        self
    }

    pub fn with_announced_maximum_incoming_streams(mut self, value: u16) -> Self {
        self.announced_maximum_incoming_streams = value;
        self
    }

    pub fn with_announced_maximum_outgoing_streams(mut self, value: u16) -> Self {
        self.announced_maximum_outgoing_streams = value;
        self
    }

    pub fn with_mtu(mut self, value: usize) -> Self {
        self.mtu = value;
        self
    }

    pub fn with_max_message_size(mut self, value: usize) -> Self {
        self.max_message_size = value;
        self
    }

    pub fn with_default_stream_priority(mut self, value: StreamPriority) -> Self {
        self.default_stream_priority = value;
        self
    }

    pub fn with_max_receiver_window_buffer_size(mut self, value: usize) -> Self {
        self.max_receiver_window_buffer_size = value;
        self
    }

    pub fn with_max_send_buffer_size(mut self, value: usize) -> Self {
        self.max_send_buffer_size = value;
        self
    }

    pub fn with_per_stream_send_queue_limit(mut self, value: usize) -> Self {
        self.per_stream_send_queue_limit = value;
        self
    }

    /// Threshold below which a stream's buffered amount triggers
    /// `SocketEvent::OnBufferedAmountLow`, unless overridden per stream
    pub fn with_default_stream_buffered_amount_low_threshold(mut self, value: usize) -> Self {
        self.default_stream_buffered_amount_low_threshold = value;
        self
    }

    pub fn with_total_buffered_amount_low_threshold(mut self, value: usize) -> Self {
        self.total_buffered_amount_low_threshold = value;
        self
    }

    pub fn with_max_timer_backoff_duration(mut self, value: Option<Duration>) -> Self {
        self.max_timer_backoff_duration = value;
        self
    }

    /// `None` never aborts the association on too many retransmissions
    pub fn with_max_retransmissions(mut self, value: Option<u32>) -> Self {
        self.max_retransmissions = value;
        self
    }

    pub fn with_max_init_retransmits(mut self, value: Option<u32>) -> Self {
        self.max_init_retransmits = value;
        self
    }

    pub fn with_enable_message_interleaving(mut self, value: bool) -> Self {
        self.enable_message_interleaving = value;
        self
    }

    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    pub fn remote_port(&self) -> u16 {
        self.remote_port
    }

    pub fn announced_maximum_incoming_streams(&self) -> u16 {
        self.announced_maximum_incoming_streams
    }

    pub fn announced_maximum_outgoing_streams(&self) -> u16 {
        self.announced_maximum_outgoing_streams
    }

    pub fn mtu(&self) -> usize {
        self.mtu
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    pub fn default_stream_priority(&self) -> StreamPriority {
        self.default_stream_priority
    }

    pub fn max_receiver_window_buffer_size(&self) -> usize {
        self.max_receiver_window_buffer_size
    }

    pub fn max_send_buffer_size(&self) -> usize {
        self.max_send_buffer_size
    }

    pub fn per_stream_send_queue_limit(&self) -> usize {
        self.per_stream_send_queue_limit
    }

    pub fn default_stream_buffered_amount_low_threshold(&self) -> usize {
        self.default_stream_buffered_amount_low_threshold
    }

    pub fn total_buffered_amount_low_threshold(&self) -> usize {
        self.total_buffered_amount_low_threshold
    }

    pub fn max_timer_backoff_duration(&self) -> Option<Duration> {
        self.max_timer_backoff_duration
    }

    pub fn max_retransmissions(&self) -> Option<u32> {
        self.max_retransmissions
    }

    pub fn max_init_retransmits(&self) -> Option<u32> {
        self.max_init_retransmits
    }

    pub fn enable_message_interleaving(&self) -> bool {
        self.enable_message_interleaving
    }

    /// set_max_message_size updates the max message size of a live socket
    pub fn set_max_message_size(&mut self, value: usize) {
        self.max_message_size = value;
    }
}

/// SendOptions are the per-message delivery options of `SctpSocket::send`.
///
/// If both `lifetime` and `max_retransmissions` are unset, the message is
/// sent reliably. Setting `max_retransmissions` to `Some(0)` makes it
/// unreliable.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SendOptions {
    /// The message may be delivered out of order
    pub unordered: bool,
    /// Time window during which transmissions and retransmissions may occur
    pub lifetime: Option<Duration>,
    /// Maximum number of retransmissions that are attempted
    pub max_retransmissions: Option<u16>,
}
