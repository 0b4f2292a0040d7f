//! HTTP header processing module for encoding and decoding heads
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes a request head from raw bytes
//!   - Validates the start line and header fields
//!   - Works out the body length from `Content-Length`
//!
//! - [`HeaderEncoder`]: Encodes a response head to bytes
//!   - Writes the HTTP/1.1 status line
//!   - Writes header fields in map order

mod header_decoder;
mod header_encoder;

pub(crate) use header_decoder::HeaderDecoder;
pub(crate) use header_encoder::HeaderEncoder;
