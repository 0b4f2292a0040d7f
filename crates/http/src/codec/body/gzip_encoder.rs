//! Gzip compression of whole response bodies.

use std::io;
use std::io::Write;

use bytes::{Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::trace;

/// Bodies shorter than this grow when gzip encoded, so they are sent as-is.
pub(crate) const GZIP_MIN_BODY: usize = 23;

struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GzipEncoder {
    level: Compression,
}

impl Default for GzipEncoder {
    fn default() -> Self {
        Self { level: Compression::default() }
    }
}

impl GzipEncoder {
    pub(crate) fn encode(&self, body: &[u8]) -> io::Result<Bytes> {
        // compressed output is usually much smaller than the input
        let mut encoder = GzEncoder::new(Writer::with_capacity(body.len() / 2 + 32), self.level);
        encoder.write_all(body)?;
        let writer = encoder.finish()?;
        trace!(from = body.len(), to = writer.buf.len(), "gzip encoded body");
        Ok(writer.buf.freeze())
    }
}
