use std::io;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::task::{Context, Poll, Waker};

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt, Interest, ReadBuf, Ready};
use tokio::net::TcpStream;
use tracing::trace;

use crate::connection::Transport;

/// Queued response bytes above which the owner stops reading new requests.
pub const MAX_PENDING_WRITE: usize = 1024 * 1024;

/// Upper bound of what [`Transport::bytes_available`] reports.
const PEEK_LEN: usize = 4 * 1024;

/// A [`Transport`] over a tokio `TcpStream`.
///
/// Reads and writes use the stream's `try_*` methods, so they never wait; the
/// owner waits on [`ready`](Self::ready) and then calls back into the
/// connection. Bytes the kernel does not take right away stay queued until
/// [`flush`](Self::flush).
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    local_addr: SocketAddr,
    peer_addr: SocketAddr,
    pending: BytesMut,
    connected: bool,
    eof: bool,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let local_addr = stream.local_addr()?;
        let peer_addr = stream.peer_addr()?;
        Ok(Self { stream, local_addr, peer_addr, pending: BytesMut::new(), connected: true, eof: false })
    }

    /// What the owner should wait for: readability, plus writability while
    /// bytes are queued. Only writability once the queue is backlogged.
    pub fn interest(&self) -> Interest {
        if self.is_backlogged() {
            Interest::WRITABLE
        } else if self.pending.is_empty() {
            Interest::READABLE
        } else {
            Interest::READABLE | Interest::WRITABLE
        }
    }

    /// Returns true while more than [`MAX_PENDING_WRITE`] bytes wait for the
    /// peer; no further requests should be read until it drains.
    pub fn is_backlogged(&self) -> bool {
        self.pending.len() > MAX_PENDING_WRITE
    }

    pub async fn ready(&self, interest: Interest) -> io::Result<Ready> {
        self.stream.ready(interest).await
    }

    /// Writes queued bytes until the kernel stops taking them.
    ///
    /// Returns the number of bytes written.
    pub fn flush(&mut self) -> io::Result<usize> {
        let mut written = 0;
        while !self.pending.is_empty() {
            match self.stream.try_write(&self.pending) {
                Ok(0) => return Err(io::Error::from(ErrorKind::WriteZero)),
                Ok(n) => {
                    self.pending.advance(n);
                    written += n;
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }
        trace!(written, pending = self.pending.len(), "flushed response bytes");
        Ok(written)
    }

    /// Sends whatever is still queued, shuts the write side down and discards
    /// input until the peer closes too.
    ///
    /// Responses written right before a close, such as a `400`, still reach
    /// the peer this way: dropping a socket with unread input resets the
    /// connection and may destroy them in flight. Callers bound the wait with a
    /// timeout.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.stream.write_all(&self.pending).await?;
            self.pending.clear();
        }
        self.stream.shutdown().await?;

        let mut discard = [0u8; 4 * 1024];
        while self.stream.read(&mut discard).await? > 0 {}
        Ok(())
    }
}

impl Transport for TcpTransport {
    /// Peeks without consuming, so the answer is capped at a few KiB.
    fn bytes_available(&self) -> usize {
        if !self.connected || self.eof {
            return 0;
        }

        let mut peeked = [0u8; PEEK_LEN];
        let mut buf = ReadBuf::new(&mut peeked);
        let mut cx = Context::from_waker(Waker::noop());
        match self.stream.poll_peek(&mut cx, &mut buf) {
            Poll::Ready(Ok(len)) => len,
            Poll::Ready(Err(_)) | Poll::Pending => 0,
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.connected || self.eof || buf.is_empty() {
            return Ok(0);
        }

        match self.stream.try_read(buf) {
            Ok(0) => {
                self.eof = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        if !self.connected {
            return Err(io::Error::from(ErrorKind::NotConnected));
        }
        self.pending.extend_from_slice(data);
        self.flush().map(|_| ())
    }

    fn bytes_to_write(&self) -> usize {
        self.pending.len()
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn close(&mut self) {
        if self.connected {
            trace!(peer = %self.peer_addr, pending = self.pending.len(), "close transport");
            self.connected = false;
        }
    }
}
