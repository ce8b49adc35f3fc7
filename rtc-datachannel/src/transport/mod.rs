
use crate::message::{DataChannelMessage, SendDataParams};
use crate::options::StartOptions;
use crate::ppid::{to_data_message_type, to_ppid, PayloadProtocolIdentifier};
use crate::sink::DataChannelSink;
use crate::stream::{LocalResetResult, OpenResult, StreamState, StreamTable};

use bytes::{Bytes, BytesMut};
use log::{debug, error, info, trace, warn};
use sctp::{
    DcSctpOptions, ErrorCauseCode, ErrorKind, Message, ResetStreamsStatus, SctpSocket,
    SctpSocketFactory, SendStatus, SocketEvent, SocketState, StreamId, StreamPriority,
    DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_MTU,
};
use shared::error::{Error, Result};
use shared::{PacketOptions, TaggedBytesMut, TaggedPacket, TransportContext};
use std::collections::VecDeque;
use std::time::Instant;

/// DtlsTransportEvent is a state change of the DTLS transport the
/// association runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DtlsTransportEvent {
    /// The DTLS transport became writable, or stopped being writable
    Writable(bool),
    Closed,
    Failed(String),
}

/// DcSctpTransport carries WebRTC data channels over a single SCTP
/// association, running on top of a DTLS transport.
///
/// It performs no I/O. Datagrams decrypted by DTLS are fed through
/// `handle_read`, outbound datagrams are drained from `poll_write`, and
/// timers are driven with `poll_timeout` and `handle_timeout`. Everything the
/// data channel layer needs to know is reported to its [`DataChannelSink`].
pub struct DcSctpTransport {
    debug_name: String,
    socket_factory: Box<dyn SctpSocketFactory>,
    socket: Option<Box<dyn SctpSocket>>,
    sink: Option<Box<dyn DataChannelSink>>,
    on_connected: Option<Box<dyn FnMut()>>,
    streams: StreamTable,

    writable: bool,
    ready_to_send_data: bool,
    closed: bool,

    transport: TransportContext,
    transmits: VecDeque<TaggedPacket>,
    next_packet_id: u64,
    now: Instant,
}

impl DcSctpTransport {
    pub fn new(socket_factory: Box<dyn SctpSocketFactory>) -> Self {
        Self {
            debug_name: "DcSctpTransport".to_owned(),
            socket_factory,
            socket: None,
            sink: None,
            on_connected: None,
            streams: StreamTable::default(),

            writable: false,
            ready_to_send_data: false,
            closed: false,

            transport: TransportContext::default(),
            transmits: VecDeque::new(),
            next_packet_id: 0,
            now: Instant::now(),
        }
    }

    /// with_debug_name sets the name every log line of this transport is
    /// prefixed with. It is also handed to the socket factory.
    pub fn with_debug_name(mut self, debug_name: impl Into<String>) -> Self {
        self.debug_name = debug_name.into();
        self
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// set_data_channel_sink registers the observer of this transport. Events
    /// raised before registration are dropped.
    pub fn set_data_channel_sink(&mut self, sink: Box<dyn DataChannelSink>) {
        self.sink = Some(sink);
    }

    /// set_on_connected_callback registers a callback invoked every time the
    /// association gets established, right after the sink is told it may
    /// send
    pub fn set_on_connected_callback(&mut self, on_connected: Box<dyn FnMut()>) {
        self.on_connected = Some(on_connected);
    }

    /// start creates the SCTP socket and connects it as soon as the DTLS
    /// transport is writable.
    ///
    /// Calling it again with the same ports only updates the max message
    /// size. Changing the ports of a started transport is not supported.
    pub fn start(&mut self, options: StartOptions) -> Result<()> {
        if self.closed {
            return Err(Error::ErrSctpTransportClosed);
        }
        if options.local_port == 0 || options.remote_port == 0 {
            error!(
                "{}->start(local={}, remote={}): ports must not be zero",
                self.debug_name, options.local_port, options.remote_port
            );
            return Err(Error::ErrInvalidSctpPort);
        }
        let max_message_size = if options.max_message_size == 0 {
            DEFAULT_MAX_MESSAGE_SIZE
        } else {
            options.max_message_size
        };

        info!(
            "{}->start(local={}, remote={}, max_message_size={})",
            self.debug_name, options.local_port, options.remote_port, max_message_size
        );

        if let Some(socket) = self.socket.as_mut() {
            let current = socket.options();
            if current.local_port() != options.local_port
                || current.remote_port() != options.remote_port
            {
                error!(
                    "{}->start(local={}, remote={}): can't change ports on already started transport",
                    self.debug_name, options.local_port, options.remote_port
                );
                return Err(Error::ErrSctpPortsChanged);
            }
            socket.set_max_message_size(max_message_size);
        } else {
            let sctp_options = DcSctpOptions::default()
                .with_local_port(options.local_port)
                .with_remote_port(options.remote_port)
                .with_max_message_size(max_message_size);
            let mut socket = self.socket_factory.create(&self.debug_name, sctp_options);
            for (stream_id, priority) in self.streams.priorities() {
                socket.set_stream_priority(stream_id, priority);
            }
            self.socket = Some(socket);
        }

        self.maybe_connect_socket();
        self.drain_socket_events();

        Ok(())
    }

    /// shutdown starts a graceful shutdown of the association
    pub fn shutdown(&mut self) -> Result<()> {
        let Some(socket) = self.socket.as_mut() else {
            return Err(Error::ErrSctpNotStarted);
        };
        info!("{}->shutdown()", self.debug_name);
        socket.shutdown();
        self.drain_socket_events();
        Ok(())
    }

    /// open_stream opens a stream, or updates the priority of an already open
    /// one. Returns false if the stream is still closing.
    pub fn open_stream(&mut self, stream_id: u16, priority: u16) -> bool {
        if self.closed {
            return false;
        }
        let (stream_id, priority) = (StreamId(stream_id), StreamPriority(priority));

        debug!(
            "{}->open_stream({}, {})",
            self.debug_name, stream_id, priority
        );
        if self.streams.open(stream_id, priority) == OpenResult::Rejected {
            warn!(
                "{}->open_stream({}): stream is still closing",
                self.debug_name, stream_id
            );
            return false;
        }

        if let Some(socket) = self.socket.as_mut() {
            socket.set_stream_priority(stream_id, priority);
            self.drain_socket_events();
        }
        true
    }

    /// reset_stream starts closing a stream by resetting its outgoing
    /// direction. Returns false if the transport isn't started or the stream
    /// is unknown.
    pub fn reset_stream(&mut self, stream_id: u16) -> bool {
        let stream_id = StreamId(stream_id);
        let Some(socket) = self.socket.as_mut() else {
            error!(
                "{}->reset_stream({}): transport is not started",
                self.debug_name, stream_id
            );
            return false;
        };

        match self.streams.reset_locally(stream_id) {
            LocalResetResult::Unknown => {
                error!(
                    "{}->reset_stream({}): unknown stream",
                    self.debug_name, stream_id
                );
                false
            }
            LocalResetResult::InProgress => {
                debug!(
                    "{}->reset_stream({}): already closing",
                    self.debug_name, stream_id
                );
                true
            }
            LocalResetResult::ResetRequired => {
                info!("{}->reset_stream({})", self.debug_name, stream_id);
                let status = socket.reset_streams(&[stream_id]);
                self.log_reset_status(stream_id, status);
                self.drain_socket_events();
                true
            }
        }
    }

    /// send_data enqueues a message on an open stream.
    ///
    /// Socket events caused by the send are only processed at the next call
    /// into the transport, so the result of this call is always seen first.
    pub fn send_data(
        &mut self,
        stream_id: u16,
        params: &SendDataParams,
        payload: Bytes,
    ) -> Result<()> {
        if self.closed {
            return Err(Error::ErrSctpTransportClosed);
        }
        let stream_id = StreamId(stream_id);

        match self.streams.state(stream_id) {
            StreamState::Open => {}
            StreamState::Closing => {
                debug!(
                    "{}->send_data({}): stream is closing",
                    self.debug_name, stream_id
                );
                return Err(Error::ErrStreamClosing(stream_id.0));
            }
            StreamState::Closed => {
                debug!(
                    "{}->send_data({}): stream is not open",
                    self.debug_name, stream_id
                );
                return Err(Error::ErrStreamNotOpen(stream_id.0));
            }
        }

        let Some(socket) = self.socket.as_mut() else {
            error!(
                "{}->send_data({}): transport is not started",
                self.debug_name, stream_id
            );
            return Err(Error::ErrSctpNotStarted);
        };

        let max_message_size = socket.options().max_message_size();
        if payload.len() > max_message_size {
            warn!(
                "{}->send_data({}): message of {} bytes exceeds max message size of {} bytes",
                self.debug_name,
                stream_id,
                payload.len(),
                max_message_size
            );
            return Err(Error::ErrMessageTooLarge {
                size: payload.len(),
                max: max_message_size,
            });
        }

        let ppid = to_ppid(params.kind, payload.len());
        // SCTP can't carry empty user messages, the ppid tells the peer
        // to drop this padding byte
        let payload = if payload.is_empty() {
            Bytes::from_static(&[0])
        } else {
            payload
        };

        trace!(
            "{}->send_data({}, kind={}, ppid={}, len={})",
            self.debug_name,
            stream_id,
            params.kind,
            ppid,
            payload.len()
        );

        let status = socket.send(
            Message::new(stream_id, ppid, payload),
            &params.to_send_options(),
        );
        match status {
            SendStatus::Success => Ok(()),
            SendStatus::ErrorResourceExhausted => {
                debug!(
                    "{}->send_data({}): send buffer is full",
                    self.debug_name, stream_id
                );
                self.ready_to_send_data = false;
                Err(Error::ErrResourceExhausted)
            }
            status => {
                error!(
                    "{}->send_data({}): socket send failed with {}",
                    self.debug_name, stream_id, status
                );
                Err(Error::ErrNetwork(status.to_string()))
            }
        }
    }

    pub fn ready_to_send_data(&self) -> bool {
        self.ready_to_send_data
    }

    pub fn is_started(&self) -> bool {
        self.socket.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn stream_state(&self, stream_id: u16) -> StreamState {
        self.streams.state(StreamId(stream_id))
    }

    /// max_message_size returns the negotiated max message size, or None if
    /// the transport isn't started
    pub fn max_message_size(&self) -> Option<usize> {
        self.socket
            .as_ref()
            .map(|socket| socket.options().max_message_size())
    }

    pub fn max_outbound_streams(&self) -> Option<u16> {
        self.socket
            .as_ref()
            .map(|socket| socket.options().announced_maximum_outgoing_streams())
    }

    pub fn max_inbound_streams(&self) -> Option<u16> {
        self.socket
            .as_ref()
            .map(|socket| socket.options().announced_maximum_incoming_streams())
    }

    pub fn buffered_amount(&self, stream_id: u16) -> usize {
        self.socket
            .as_ref()
            .map_or(0, |socket| socket.buffered_amount(StreamId(stream_id)))
    }

    pub fn buffered_amount_low_threshold(&self, stream_id: u16) -> usize {
        self.socket.as_ref().map_or(0, |socket| {
            socket.buffered_amount_low_threshold(StreamId(stream_id))
        })
    }

    /// set_buffered_amount_low_threshold sets the threshold below which the
    /// sink gets `on_buffered_amount_low` for the stream
    pub fn set_buffered_amount_low_threshold(&mut self, stream_id: u16, bytes: usize) {
        if let Some(socket) = self.socket.as_mut() {
            socket.set_buffered_amount_low_threshold(StreamId(stream_id), bytes);
        }
    }

    /// handle_socket_event processes one event reported by the SCTP socket
    pub fn handle_socket_event(&mut self, event: SocketEvent) {
        if self.closed {
            trace!(
                "{}: dropping socket event {:?} on closed transport",
                self.debug_name,
                event
            );
            return;
        }

        match event {
            SocketEvent::SendPacket(packet) => self.on_send_packet(packet),
            SocketEvent::OnMessageReceived(message) => self.on_message_received(message),
            SocketEvent::OnConnected => {
                info!("{}->on_connected()", self.debug_name);
                self.ready_to_send_data = true;
                if let Some(sink) = self.sink.as_mut() {
                    sink.on_ready_to_send();
                }
                if let Some(on_connected) = self.on_connected.as_mut() {
                    on_connected();
                }
            }
            SocketEvent::OnClosed => {
                info!("{}->on_closed()", self.debug_name);
                self.ready_to_send_data = false;
            }
            SocketEvent::OnAborted(kind, reason) => self.on_aborted(kind, reason),
            SocketEvent::OnConnectionRestarted => {
                info!("{}->on_connection_restarted()", self.debug_name);
                if !self.ready_to_send_data {
                    self.ready_to_send_data = true;
                    if let Some(sink) = self.sink.as_mut() {
                        sink.on_ready_to_send();
                    }
                }
            }
            SocketEvent::OnError(kind, reason) => {
                if kind == ErrorKind::ResourceExhaustion {
                    debug!("{}->on_error({}, {})", self.debug_name, kind, reason);
                } else {
                    error!("{}->on_error({}, {})", self.debug_name, kind, reason);
                }
            }
            SocketEvent::OnStreamsResetFailed(stream_ids, reason) => {
                for stream_id in stream_ids {
                    warn!(
                        "{}->on_streams_reset_failed({}): {}",
                        self.debug_name, stream_id, reason
                    );
                }
            }
            SocketEvent::OnStreamsResetPerformed(stream_ids) => {
                for stream_id in stream_ids {
                    self.on_stream_reset_performed(stream_id);
                }
            }
            SocketEvent::OnIncomingStreamsReset(stream_ids) => {
                for stream_id in stream_ids {
                    self.on_incoming_stream_reset(stream_id);
                }
            }
            SocketEvent::OnBufferedAmountLow(stream_id) => {
                trace!(
                    "{}->on_buffered_amount_low({})",
                    self.debug_name,
                    stream_id
                );
                if let Some(sink) = self.sink.as_mut() {
                    sink.on_buffered_amount_low(stream_id.0);
                }
            }
            SocketEvent::OnTotalBufferedAmountLow => {
                if !self.ready_to_send_data {
                    debug!("{}->on_total_buffered_amount_low()", self.debug_name);
                    self.ready_to_send_data = true;
                    if let Some(sink) = self.sink.as_mut() {
                        sink.on_ready_to_send();
                    }
                }
            }
        }
    }

    fn on_send_packet(&mut self, packet: Bytes) {
        if !self.writable {
            debug!(
                "{}: dropping packet of {} bytes, DTLS transport is not writable",
                self.debug_name,
                packet.len()
            );
            return;
        }

        let mtu = self
            .socket
            .as_ref()
            .map_or(DEFAULT_MTU, |socket| socket.options().mtu());
        if packet.len() > mtu {
            error!(
                "{}: dropping packet of {} bytes larger than mtu {}",
                self.debug_name,
                packet.len(),
                mtu
            );
            return;
        }

        let packet_id = self.next_packet_id;
        self.next_packet_id += 1;
        trace!(
            "{}: sending packet {} of {} bytes",
            self.debug_name,
            packet_id,
            packet.len()
        );
        self.transmits.push_back(TaggedPacket {
            transport: self.transport,
            payload: BytesMut::from(&packet[..]),
            options: PacketOptions {
                sent_time: self.now,
                packet_id,
            },
        });
    }

    fn on_message_received(&mut self, message: Message) {
        let (stream_id, ppid) = (message.stream_id(), message.ppid());

        if !self.streams.is_open(stream_id) {
            debug!(
                "{}: dropping message on stream {} in state {}",
                self.debug_name,
                stream_id,
                self.streams.state(stream_id)
            );
            return;
        }
        let Some(kind) = to_data_message_type(ppid) else {
            debug!(
                "{}: dropping message on stream {} with unknown ppid {}",
                self.debug_name, stream_id, ppid
            );
            return;
        };

        let payload = if PayloadProtocolIdentifier::from(ppid).is_empty() {
            Bytes::new()
        } else {
            message.into_payload()
        };
        trace!(
            "{}->on_message_received({}, kind={}, len={})",
            self.debug_name,
            stream_id,
            kind,
            payload.len()
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.on_data_received(stream_id.0, kind, &payload);
        }
    }

    fn on_stream_reset_performed(&mut self, stream_id: StreamId) {
        let Some(progress) = self.streams.on_reset_performed(stream_id) else {
            debug!(
                "{}->on_streams_reset_performed({}): no pending reset",
                self.debug_name, stream_id
            );
            return;
        };
        debug!(
            "{}->on_streams_reset_performed({})",
            self.debug_name, stream_id
        );
        if progress.closed {
            info!("{}: stream {} closed", self.debug_name, stream_id);
            if let Some(sink) = self.sink.as_mut() {
                sink.on_channel_closed(stream_id.0);
            }
        }
    }

    fn on_incoming_stream_reset(&mut self, stream_id: StreamId) {
        let Some(progress) = self.streams.on_incoming_reset(stream_id) else {
            debug!(
                "{}->on_incoming_streams_reset({}): unknown or already reset",
                self.debug_name, stream_id
            );
            return;
        };
        debug!(
            "{}->on_incoming_streams_reset({})",
            self.debug_name, stream_id
        );

        if progress.reset_outgoing {
            if let Some(socket) = self.socket.as_mut() {
                let status = socket.reset_streams(&[stream_id]);
                self.log_reset_status(stream_id, status);
            }
        }
        if progress.closing {
            if let Some(sink) = self.sink.as_mut() {
                sink.on_channel_closing(stream_id.0);
            }
        }
        if progress.closed {
            info!("{}: stream {} closed", self.debug_name, stream_id);
            if let Some(sink) = self.sink.as_mut() {
                sink.on_channel_closed(stream_id.0);
            }
        }
    }

    fn on_aborted(&mut self, kind: ErrorKind, reason: String) {
        error!("{}->on_aborted({}, {})", self.debug_name, kind, reason);

        self.close_all_channels(Error::ErrSctpFailure {
            message: reason,
            cause_code: ErrorCauseCode::from_error_kind(kind).map(|code| code.0),
        });
    }

    /// close_all_channels signals `on_channel_closed` for every stream in
    /// ascending order, then `on_transport_closed` as the last sink call,
    /// and tears the transport down
    fn close_all_channels(&mut self, error: Error) {
        let stream_ids = self.streams.take_all();
        if let Some(sink) = self.sink.as_mut() {
            for stream_id in stream_ids {
                sink.on_channel_closed(stream_id.0);
            }
            sink.on_transport_closed(error);
        }
        self.teardown();
    }

    fn on_dtls_writable(&mut self, writable: bool) {
        if self.writable == writable {
            return;
        }
        debug!("{}->on_dtls_writable({})", self.debug_name, writable);
        self.writable = writable;

        if !writable {
            self.ready_to_send_data = false;
            return;
        }

        let Some(state) = self.socket.as_ref().map(|socket| socket.state()) else {
            return;
        };
        match state {
            SocketState::Closed => self.maybe_connect_socket(),
            SocketState::Connected if !self.ready_to_send_data => {
                self.ready_to_send_data = true;
                if let Some(sink) = self.sink.as_mut() {
                    sink.on_ready_to_send();
                }
            }
            _ => {}
        }
    }

    fn on_dtls_closed(&mut self, error: Error) {
        warn!("{}: DTLS transport closed: {}", self.debug_name, error);
        self.close_all_channels(error);
    }

    fn maybe_connect_socket(&mut self) {
        if !self.writable {
            return;
        }
        if let Some(socket) = self.socket.as_mut() {
            if socket.state() == SocketState::Closed {
                info!("{}: connecting socket", self.debug_name);
                socket.connect();
            }
        }
    }

    fn log_reset_status(&self, stream_id: StreamId, status: ResetStreamsStatus) {
        match status {
            ResetStreamsStatus::Performed => {}
            ResetStreamsStatus::Deferred => debug!(
                "{}: reset of stream {} deferred behind an ongoing reset",
                self.debug_name, stream_id
            ),
            ResetStreamsStatus::NotConnected | ResetStreamsStatus::NotSupported => warn!(
                "{}: reset of stream {} failed with {:?}",
                self.debug_name, stream_id, status
            ),
        }
    }

    fn drain_socket_events(&mut self) {
        while let Some(event) = self.socket.as_mut().and_then(|socket| socket.poll_event()) {
            self.handle_socket_event(event);
        }
    }

    /// teardown closes and drops the socket. After this the transport never
    /// calls into the sink again.
    fn teardown(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            socket.close();
        }
        self.streams.clear();
        self.transmits.clear();
        self.ready_to_send_data = false;
        self.closed = true;
    }
}

impl Drop for DcSctpTransport {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl sansio::Protocol<TaggedBytesMut, DataChannelMessage, DtlsTransportEvent>
    for DcSctpTransport
{
    type Rout = ();
    type Wout = TaggedPacket;
    type Eout = ();
    type Error = Error;
    type Time = Instant;

    /// Feeds one datagram decrypted by the DTLS transport to the socket
    fn handle_read(&mut self, msg: TaggedBytesMut) -> Result<()> {
        if self.closed {
            return Err(Error::ErrSctpTransportClosed);
        }
        self.now = msg.now;
        self.transport = msg.transport;

        let Some(socket) = self.socket.as_mut() else {
            debug!(
                "{}: dropping packet of {} bytes received before start",
                self.debug_name,
                msg.message.len()
            );
            return Ok(());
        };
        socket.advance_time(msg.now);
        socket.handle_input(&msg.message);
        self.drain_socket_events();
        Ok(())
    }

    fn poll_read(&mut self) -> Option<Self::Rout> {
        None
    }

    fn handle_write(&mut self, msg: DataChannelMessage) -> Result<()> {
        self.send_data(msg.stream_id, &msg.params, msg.payload)
    }

    /// Returns packets to transmit on the DTLS transport
    ///
    /// It should be polled for transmit after:
    /// - a call was made to `handle_read`
    /// - a call was made to `handle_write`
    /// - a call was made to `handle_event`
    /// - a call was made to `handle_timeout`
    fn poll_write(&mut self) -> Option<Self::Wout> {
        self.drain_socket_events();
        self.transmits.pop_front()
    }

    fn handle_event(&mut self, evt: DtlsTransportEvent) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        match evt {
            DtlsTransportEvent::Writable(writable) => self.on_dtls_writable(writable),
            DtlsTransportEvent::Closed => self.on_dtls_closed(Error::ErrTransportClosed),
            DtlsTransportEvent::Failed(reason) => {
                self.on_dtls_closed(Error::ErrTransportFailed(reason))
            }
        }
        self.drain_socket_events();
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Self::Eout> {
        None
    }

    fn handle_timeout(&mut self, now: Instant) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.now = now;
        if let Some(socket) = self.socket.as_mut() {
            socket.advance_time(now);
        }
        self.drain_socket_events();
        Ok(())
    }

    fn poll_timeout(&mut self) -> Option<Self::Time> {
        self.drain_socket_events();
        self.socket.as_ref().and_then(|socket| socket.poll_timeout())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ErrSctpTransportClosed);
        }
        info!("{}->close()", self.debug_name);
        self.teardown();
        Ok(())
    }
}
