use std::io;

use bytes::{Buf, BytesMut};

use crate::connection::Transport;

/// Growth step when the transport can't tell how many bytes are waiting.
const READ_CHUNK: usize = 8 * 1024;

/// Bytes received from the peer that are not yet part of a handled request.
///
/// Reads grow the buffer in place by the expected amount and shrink it back
/// to what was actually read, so the spare capacity of one read cycle is
/// reused by the next one instead of allocating per read.
#[derive(Debug)]
pub struct ReceiveBuffer {
    buf: BytesMut,
}

impl ReceiveBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    /// Appends everything the transport can deliver right now.
    ///
    /// Returns the number of bytes appended. On error nothing of the failed
    /// read is kept.
    pub fn fill_from<T: Transport + ?Sized>(&mut self, transport: &mut T) -> io::Result<usize> {
        let mut total = 0;
        loop {
            let previous_len = self.buf.len();
            let wanted = match transport.bytes_available() {
                0 => READ_CHUNK,
                available => available,
            };

            self.buf.resize(previous_len + wanted, 0);
            let result = transport.read(&mut self.buf[previous_len..]);
            let read = *result.as_ref().unwrap_or(&0);
            // drop the part of the grown region the read did not fill
            self.buf.truncate(previous_len + read);

            let read = result?;
            total += read;
            if read < wanted {
                return Ok(total);
            }
        }
    }

    /// Removes the first `len` bytes, keeping whatever follows them.
    pub fn consume(&mut self, len: usize) {
        if len >= self.buf.len() {
            self.buf.clear();
        } else {
            self.buf.advance(len);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}
