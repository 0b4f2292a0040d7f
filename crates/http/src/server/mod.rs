//! A TCP server owning a pool of [`HttpConnection`](crate::connection::HttpConnection)s.
//!
//! The server accepts connections up to a limit, feeds each one readiness
//! events and closes those that stay idle longer than the keep-alive timeout.

mod config;
#[allow(clippy::module_inception, reason = "keeps the server type next to its builder")]
mod server;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use server::{HttpServer, ServerBuilder};
