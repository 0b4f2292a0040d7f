//! A per-connection HTTP/1.1 framing engine
//!
//! This crate sits directly above a raw byte stream and turns it into a
//! sequence of request/response exchanges. It accumulates inbound bytes,
//! detects complete requests, drives a synchronous request handler, serializes
//! responses, negotiates gzip, enforces size limits and keeps connections
//! alive, with pipelined requests handled in order.
//!
//! # Features
//!
//! - Correct handling of partial reads and of several requests in one read
//! - Keep-alive connections with idle expiry decided by the owner
//! - `400 Bad Request` for malformed input, `413 Payload Too Large` for
//!   requests that outgrow the receive buffer limit
//! - `Accept-Encoding` negotiation and gzip response bodies
//! - Non-blocking: a read cycle never waits for more bytes
//! - A ready-to-use tokio TCP server
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use micro_http_engine::handler::make_handler;
//! use micro_http_engine::protocol::{Environment, Request, Response};
//! use micro_http_engine::server::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handler = make_handler(|request: &Request, env: &Environment| {
//!         let body = format!("hello {} from {}\r\n", request.uri().path(), env.client_address);
//!         Response::new(Bytes::from(body))
//!     });
//!
//!     let server = HttpServer::builder()
//!         .config(ServerConfig::builder().address(([127, 0, 0, 1], 8080)).build())
//!         .handler(handler)
//!         .build()
//!         .expect("handler is set");
//!
//!     if let Err(e) = server.start().await {
//!         eprintln!("server error: {e}");
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: [`connection::HttpConnection`], the transport contract
//!   and its buffering and idle tracking
//! - [`codec`]: request decoding and response serialization
//! - [`protocol`]: request, response, decode outcome and error types, and
//!   content negotiation
//! - [`handler`]: the request handler trait
//! - [`server`]: a TCP server owning connections and evicting idle ones
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only, no upgrades
//! - No TLS support (use a reverse proxy for HTTPS)
//! - Request bodies must be framed by `Content-Length`
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
