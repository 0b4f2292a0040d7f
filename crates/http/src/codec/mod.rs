//! HTTP codec module for decoding requests and encoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: Decodes one complete request from the front of a buffer
//!   - Head parsing in the `header` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: Serializes a response, compressing negotiated gzip bodies
//!   - Head encoding in the `header` module
//!   - Body compression in the `body` module
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use micro_http_engine::codec::{RequestDecoder, ResponseEncoder};
//! use micro_http_engine::protocol::{ParseOutcome, Response};
//!
//! let outcome = RequestDecoder::new().decode(b"GET / HTTP/1.1\r\n\r\n");
//! assert_eq!(outcome.frame_len(), Some(18));
//!
//! let mut dst = BytesMut::new();
//! ResponseEncoder::new().encode(Response::new(Bytes::from_static(b"hi")), &mut dst);
//! assert!(dst.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::{MAX_CONTENT_SIZE, RequestDecoder};
pub use response_encoder::ResponseEncoder;
