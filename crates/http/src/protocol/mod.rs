//! Core HTTP protocol types shared by the codec, handler and connection layers.
//!
//! # Architecture
//!
//! - **Decode outcome** ([`message`]): [`ParseOutcome`] tells the connection
//!   whether the buffered bytes form a request, need more data, or are garbage
//!
//! - **Request side** ([`request`]): [`Request`] with a buffered body, and the
//!   [`Environment`] of the connection it arrived on
//!
//! - **Response side** ([`response`]): [`Response`] with a buffered body
//!
//! - **Content negotiation** ([`accept_encoding`]): decides whether a response may
//!   be gzip encoded
//!
//! - **Error Handling** ([`error`]):
//!   - [`ParseError`]: why a request was rejected
//!   - [`ServerError`]: server setup errors

mod message;
pub use message::ParseOutcome;

mod request;
pub use request::Environment;
pub use request::Request;

mod response;
pub use response::Response;
pub(crate) use response::{GZIP, KEEP_ALIVE, build_closing_response};

mod error;
pub use error::ParseError;
pub use error::ServerError;

pub mod accept_encoding;
pub use accept_encoding::accepts_gzip;
