//! HTTP connection handling module
//!
//! This module turns one transport connection into a sequence of HTTP/1.1
//! request/response exchanges.
//!
//! # Components
//!
//! - [`HttpConnection`]: Main connection handler that:
//!   - Accumulates inbound bytes and decodes complete requests
//!   - Handles pipelined requests delivered in a single read
//!   - Negotiates response compression and keeps the connection alive
//!   - Answers malformed (`400`) and oversized (`413`) input, then closes
//!   - Exposes idle expiry to the owner of the connection
//! - [`Transport`]: The non-blocking byte stream a connection runs on
//! - [`TcpTransport`]: [`Transport`] over a tokio `TcpStream`
//! - [`ReceiveBuffer`]: Received bytes not yet consumed by a request
//! - [`IdleClock`]: Time since the last read or write activity

mod http_connection;
mod idle_clock;
mod receive_buffer;
mod tcp_transport;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use http_connection::{ConnectionConfig, HttpConnection};
pub use idle_clock::IdleClock;
pub use receive_buffer::ReceiveBuffer;
pub use tcp_transport::{MAX_PENDING_WRITE, TcpTransport};
pub use transport::Transport;
