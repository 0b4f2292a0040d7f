//! HTTP body processing.
//!
//! Request bodies are framed by `Content-Length` and copied out of
//! the receive buffer by the request decoder, so only the response side needs
//! a dedicated encoder here.
//!
//! - [`GzipEncoder`]: compresses a whole response body when the response was
//!   negotiated as `Content-Encoding: gzip`

mod gzip_encoder;

pub(crate) use gzip_encoder::{GZIP_MIN_BODY, GzipEncoder};
