//! In-memory transport for driving connections in tests.

use std::io;
use std::net::SocketAddr;

use bytes::{Buf, BytesMut};

use crate::connection::Transport;

#[derive(Debug)]
pub(crate) struct MockTransport {
    incoming: BytesMut,
    written: BytesMut,
    unflushed: usize,
    max_read: Option<usize>,
    report_available: bool,
    fail_reads: bool,
    connected: bool,
    eof: bool,
    close_count: usize,
    local: SocketAddr,
    peer: SocketAddr,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self {
            incoming: BytesMut::new(),
            written: BytesMut::new(),
            unflushed: 0,
            max_read: None,
            report_available: true,
            fail_reads: false,
            connected: true,
            eof: false,
            close_count: 0,
            local: SocketAddr::from(([127, 0, 0, 1], 8080)),
            peer: SocketAddr::from(([192, 168, 1, 20], 51000)),
        }
    }

    pub(crate) fn push_incoming(&mut self, data: &[u8]) {
        self.incoming.extend_from_slice(data);
    }

    /// Hands out at most `max` bytes per read while still announcing everything.
    pub(crate) fn set_max_read(&mut self, max: usize) {
        self.max_read = Some(max);
    }

    /// Behave like a socket that can't tell how much is waiting.
    pub(crate) fn hide_available(&mut self) {
        self.report_available = false;
    }

    pub(crate) fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    pub(crate) fn set_eof(&mut self) {
        self.eof = true;
    }

    /// Pretend the last `len` written bytes are still queued in the kernel.
    pub(crate) fn set_unflushed(&mut self, len: usize) {
        self.unflushed = len;
    }

    pub(crate) fn take_written(&mut self) -> BytesMut {
        self.written.split()
    }

    pub(crate) fn close_count(&self) -> usize {
        self.close_count
    }
}

impl Transport for MockTransport {
    fn bytes_available(&self) -> usize {
        if self.report_available { self.incoming.len() } else { 0 }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_reads {
            return Err(io::Error::from(io::ErrorKind::ConnectionReset));
        }

        let len = buf.len().min(self.incoming.len()).min(self.max_read.unwrap_or(usize::MAX));
        buf[..len].copy_from_slice(&self.incoming[..len]);
        self.incoming.advance(len);
        Ok(len)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        if !self.connected {
            return Err(io::Error::from(io::ErrorKind::NotConnected));
        }
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn bytes_to_write(&self) -> usize {
        self.unflushed
    }

    fn local_addr(&self) -> SocketAddr {
        self.local
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn close(&mut self) {
        self.connected = false;
        self.close_count += 1;
    }
}
