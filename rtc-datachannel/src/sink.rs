use crate::message::DataMessageType;

use bytes::Bytes;
use shared::error::Error;

/// DataChannelSink is the observer above the transport.
///
/// All methods are called on the context driving the transport, never after
/// the transport has been closed.
pub trait DataChannelSink {
    /// A message was received on an open stream
    fn on_data_received(&mut self, channel_id: u16, kind: DataMessageType, payload: &Bytes);

    /// The peer started closing the stream; the local side has already
    /// answered with its own reset
    fn on_channel_closing(&mut self, channel_id: u16);

    /// Both directions of the stream have been reset
    fn on_channel_closed(&mut self, channel_id: u16);

    /// The association can accept messages again
    fn on_ready_to_send(&mut self);

    /// The transport failed and won't deliver any further events
    fn on_transport_closed(&mut self, error: Error);

    fn on_buffered_amount_low(&mut self, channel_id: u16);
}
