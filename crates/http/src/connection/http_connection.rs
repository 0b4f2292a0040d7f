use std::time::Duration;

use bytes::BytesMut;
use http::header::{CONNECTION, CONTENT_ENCODING};
use http::StatusCode;
use tracing::{debug, trace, warn};

use crate::codec::{MAX_CONTENT_SIZE, RequestDecoder, ResponseEncoder};
use crate::connection::{IdleClock, ReceiveBuffer, Transport};
use crate::handler::RequestHandler;
use crate::protocol::accept_encoding::headers_accept_gzip;
use crate::protocol::{Environment, GZIP, KEEP_ALIVE, ParseOutcome, Response, build_closing_response};

/// Tunables of a single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Capacity reserved for the receive buffer up front; it grows on demand.
    pub initial_buffer_capacity: usize,
    /// Largest request body accepted.
    pub max_content_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { initial_buffer_capacity: 64 * 1024, max_content_size: MAX_CONTENT_SIZE }
    }
}

/// An HTTP/1.1 connection that turns a byte stream into request/response exchanges
///
/// `HttpConnection` owns its transport and drives one exchange after another
/// on it:
/// - Accumulating inbound bytes until at least one request is complete
/// - Handling every complete request in a read, which makes pipelining work
/// - Negotiating `Content-Encoding` and keeping the connection alive
/// - Rejecting malformed or oversized input and closing afterwards
///
/// It never blocks and never closes itself for being idle; its owner polls
/// [`has_expired`](Self::has_expired) and [`is_closed`](Self::is_closed) and
/// drops it. Dropping closes the transport.
///
/// # Type Parameters
///
/// * `T`: The transport the connection reads from and writes to
/// * `H`: The handler producing a response for each request
pub struct HttpConnection<T: Transport, H> {
    transport: T,
    handler: H,
    decoder: RequestDecoder,
    encoder: ResponseEncoder,
    received: ReceiveBuffer,
    idle_clock: IdleClock,
}

impl<T, H> HttpConnection<T, H>
where
    T: Transport,
    H: RequestHandler,
{
    pub fn new(transport: T, handler: H) -> Self {
        Self::with_config(transport, handler, ConnectionConfig::default())
    }

    pub fn with_config(transport: T, handler: H, config: ConnectionConfig) -> Self {
        Self {
            transport,
            handler,
            decoder: RequestDecoder::with_max_content_size(config.max_content_size),
            encoder: ResponseEncoder::new(),
            received: ReceiveBuffer::with_capacity(config.initial_buffer_capacity),
            idle_clock: IdleClock::start(),
        }
    }

    /// Reads what the transport has and handles every complete request in it.
    pub fn on_data_available(&mut self) {
        self.idle_clock.restart();

        match self.received.fill_from(&mut self.transport) {
            Ok(read) => trace!(read, buffered = self.received.len(), "received request bytes"),
            Err(e) => {
                debug!(cause = %e, peer = %self.transport.peer_addr(), "read request error, closing connection");
                self.transport.close();
                return;
            }
        }

        self.process_received();

        if self.transport.is_eof() && self.transport.is_connected() {
            debug!(peer = %self.transport.peer_addr(), "peer finished sending, closing connection");
            self.transport.close();
        }
    }

    /// Records write activity; queued bytes were handed to the peer.
    pub fn on_data_flushed(&mut self) {
        self.idle_clock.restart();
    }

    /// Returns true if nothing is pending in either direction and the
    /// connection has been idle for longer than `timeout`.
    pub fn has_expired(&self, timeout: Duration) -> bool {
        self.transport.bytes_available() == 0 && self.transport.bytes_to_write() == 0 && self.idle_clock.has_expired(timeout)
    }

    pub fn is_closed(&self) -> bool {
        !self.transport.is_connected()
    }

    /// Number of received bytes not yet consumed by a handled request.
    pub fn buffered_len(&self) -> usize {
        self.received.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Buffered bytes allowed while no complete request has formed yet.
    ///
    /// The body limit plus a tenth for the request head.
    fn buffer_limit(&self) -> usize {
        let max_content_size = self.decoder.max_content_size();
        max_content_size.saturating_add(max_content_size / 10)
    }

    fn process_received(&mut self) {
        while !self.received.is_empty() && self.transport.is_connected() {
            match self.decoder.decode(self.received.as_slice()) {
                ParseOutcome::Incomplete => {
                    let limit = self.buffer_limit();
                    if self.received.len() > limit {
                        warn!(
                            limit,
                            buffered = self.received.len(),
                            peer = %self.transport.peer_addr(),
                            "http request size exceeds limitation, closing connection"
                        );
                        self.close_with(StatusCode::PAYLOAD_TOO_LARGE);
                    }
                    return;
                }

                ParseOutcome::BadRequest(e) => {
                    warn!(cause = %e, peer = %self.transport.peer_addr(), "bad http request, closing connection");
                    self.close_with(StatusCode::BAD_REQUEST);
                    return;
                }

                ParseOutcome::Ok { request, frame_len } => {
                    let env = Environment::new(self.transport.local_addr(), self.transport.peer_addr());
                    trace!(method = %request.method(), uri = %request.uri(), frame_len, "dispatch request");

                    let mut response = self.handler.process_request(&request, &env);

                    if headers_accept_gzip(request.headers()) {
                        response.headers_mut().insert(CONTENT_ENCODING, GZIP);
                    }
                    response.headers_mut().insert(CONNECTION, KEEP_ALIVE);

                    self.send_response(response);
                    self.received.consume(frame_len);
                }
            }
        }
    }

    fn send_response(&mut self, response: Response) {
        let mut dst = BytesMut::new();
        self.encoder.encode(response, &mut dst);

        match self.transport.write(&dst) {
            Ok(()) => self.idle_clock.restart(),
            Err(e) => {
                debug!(cause = %e, peer = %self.transport.peer_addr(), "write response error, closing connection");
                self.transport.close();
            }
        }
    }

    fn close_with(&mut self, status_code: StatusCode) {
        self.send_response(build_closing_response(status_code));
        self.transport.close();
    }
}

impl<T: Transport, H> Drop for HttpConnection<T, H> {
    fn drop(&mut self) {
        self.transport.close();
    }
}

impl<T: Transport, H> std::fmt::Debug for HttpConnection<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("peer", &self.transport.peer_addr())
            .field("connected", &self.transport.is_connected())
            .field("buffered", &self.received.len())
            .field("idle", &self.idle_clock.elapsed())
            .finish_non_exhaustive()
    }
}
