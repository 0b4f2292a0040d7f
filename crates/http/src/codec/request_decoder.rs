//! HTTP request decoder module
//!
//! Decodes at most one complete request from the front of a receive buffer.
//! The decoder never consumes anything: it reports how many leading bytes the
//! request occupied and leaves trimming to the caller, which keeps any bytes of
//! a following pipelined request intact.
//!
//! # Example
//!
//! ```
//! use micro_http_engine::codec::RequestDecoder;
//! use micro_http_engine::protocol::ParseOutcome;
//!
//! let decoder = RequestDecoder::new();
//! let buffer = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\nGET /next";
//!
//! match decoder.decode(buffer) {
//!     ParseOutcome::Ok { request, frame_len } => {
//!         assert_eq!(request.uri().path(), "/");
//!         assert_eq!(&buffer[frame_len..], b"GET /next");
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use bytes::Bytes;

use crate::codec::header::HeaderDecoder;
use crate::protocol::{ParseError, ParseOutcome};

/// Largest request body the decoder accepts as a valid entity.
pub const MAX_CONTENT_SIZE: usize = 64 * 1024 * 1024;

/// A decoder for complete HTTP requests, head and `Content-Length` body.
///
/// Decoding is a pure function of the given bytes; the decoder holds no
/// per-request state, so one instance can be shared by every connection.
#[derive(Debug, Clone, Copy)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    max_content_size: usize,
}

impl RequestDecoder {
    /// Creates a decoder limited to [`MAX_CONTENT_SIZE`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with a custom body size limit
    pub fn with_max_content_size(max_content_size: usize) -> Self {
        Self { header_decoder: HeaderDecoder, max_content_size }
    }

    pub fn max_content_size(&self) -> usize {
        self.max_content_size
    }

    /// Attempts to decode one request from the front of `src`
    ///
    /// # Returns
    ///
    /// - `ParseOutcome::Ok { .. }`: a request and how many bytes of `src` it used
    /// - `ParseOutcome::Incomplete`: need more data to proceed
    /// - `ParseOutcome::BadRequest(_)`: `src` can never start with a valid request
    pub fn decode(&self, src: &[u8]) -> ParseOutcome {
        let decoded = match self.header_decoder.decode(src) {
            Ok(Some(decoded)) => decoded,
            Ok(None) => return ParseOutcome::Incomplete,
            Err(e) => return e.into(),
        };

        let content_length = match usize::try_from(decoded.content_length) {
            Ok(length) if length <= self.max_content_size => length,
            _ => return ParseError::too_large_content(decoded.content_length, self.max_content_size).into(),
        };

        let Some(frame_len) = decoded.header_len.checked_add(content_length) else {
            return ParseError::too_large_content(decoded.content_length, self.max_content_size).into();
        };
        if src.len() < frame_len {
            return ParseOutcome::Incomplete;
        }

        let body = Bytes::copy_from_slice(&src[decoded.header_len..frame_len]);
        ParseOutcome::Ok { request: decoded.header.map(|()| body), frame_len }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_max_content_size(MAX_CONTENT_SIZE)
    }
}
