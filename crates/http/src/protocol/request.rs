//! HTTP request types handed to a [`RequestHandler`](crate::handler::RequestHandler).
//!
//! A decoded request is a plain `http::Request` whose body has been fully
//! buffered, paired with an [`Environment`] describing both ends of the
//! connection it arrived on.

use std::net::{IpAddr, SocketAddr};

use bytes::Bytes;

/// A fully decoded request, body included.
pub type Request = http::Request<Bytes>;

/// Snapshot of the connection endpoints, taken when a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub local_address: IpAddr,
    pub local_port: u16,
    pub client_address: IpAddr,
    pub client_port: u16,
}

impl Environment {
    pub fn new(local: SocketAddr, peer: SocketAddr) -> Self {
        Self { local_address: local.ip(), local_port: local.port(), client_address: peer.ip(), client_port: peer.port() }
    }

    /// The server side endpoint.
    pub fn local_addr(&self) -> SocketAddr {
        SocketAddr::new(self.local_address, self.local_port)
    }

    /// The client side endpoint.
    pub fn peer_addr(&self) -> SocketAddr {
        SocketAddr::new(self.client_address, self.client_port)
    }
}
