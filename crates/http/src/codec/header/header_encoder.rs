//! HTTP header encoder implementation for serializing HTTP response heads
//!
//! Writes the status line and header fields of a response into raw bytes.
//! Responses are always written as HTTP/1.1, whatever version the request
//! used.

use bytes::{BufMut, BytesMut};
use http::{HeaderMap, StatusCode};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for HTTP response heads.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeaderEncoder;

impl HeaderEncoder {
    /// Encodes the status line, every header and the terminating empty line.
    pub(crate) fn encode(&self, status: StatusCode, headers: &HeaderMap, dst: &mut BytesMut) {
        dst.reserve(INIT_HEADER_SIZE);

        dst.put_slice(b"HTTP/1.1 ");
        dst.put_slice(status.as_str().as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(status.canonical_reason().unwrap_or("Unknown").as_bytes());
        dst.put_slice(b"\r\n");

        for (header_name, header_value) in headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
    }
}
