use std::io;
use std::net::SocketAddr;

/// The byte stream a connection reads requests from and writes responses to.
///
/// All operations are non-blocking. Readiness is signalled from outside: the
/// owner calls [`HttpConnection::on_data_available`] when the transport became
/// readable and [`HttpConnection::on_data_flushed`] after queued bytes were
/// written out.
///
/// [`HttpConnection::on_data_available`]: crate::connection::HttpConnection::on_data_available
/// [`HttpConnection::on_data_flushed`]: crate::connection::HttpConnection::on_data_flushed
pub trait Transport {
    /// Number of bytes that can be read right now, or 0 when unknown.
    fn bytes_available(&self) -> usize;

    /// Reads currently available bytes into `buf` without blocking.
    ///
    /// `Ok(0)` means nothing more can be read right now; check
    /// [`is_eof`](Transport::is_eof) to tell whether the peer finished sending.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Queues `data` for sending, pushing out as much as possible immediately.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Number of queued bytes not yet handed to the peer.
    fn bytes_to_write(&self) -> usize;

    fn local_addr(&self) -> SocketAddr;

    fn peer_addr(&self) -> SocketAddr;

    /// Returns false once the transport was closed.
    fn is_connected(&self) -> bool;

    /// Returns true once the peer has shut down its sending side.
    fn is_eof(&self) -> bool;

    /// Closes the transport. Calling it again has no effect.
    fn close(&mut self);
}
