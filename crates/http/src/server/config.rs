use std::net::SocketAddr;
use std::time::Duration;

use crate::connection::ConnectionConfig;

/// Settings of an [`HttpServer`](crate::server::HttpServer).
///
/// ```
/// use std::time::Duration;
/// use micro_http_engine::server::ServerConfig;
///
/// let config = ServerConfig::builder()
///     .address(([0, 0, 0, 0], 8080))
///     .keep_alive_timeout(Duration::from_secs(10))
///     .max_connections(100)
///     .build();
///
/// assert_eq!(config.max_connections(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    address: SocketAddr,
    keep_alive_timeout: Duration,
    max_connections: usize,
    scan_interval: Duration,
    connection: ConnectionConfig,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder { config: ServerConfig::default() }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Idle time after which a connection is dropped.
    pub fn keep_alive_timeout(&self) -> Duration {
        self.keep_alive_timeout
    }

    /// Connections accepted beyond this number are closed right away.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// How often every connection checks whether it expired.
    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    pub fn connection(&self) -> ConnectionConfig {
        self.connection
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            keep_alive_timeout: Duration::from_secs(7),
            max_connections: 500,
            scan_interval: Duration::from_secs(2),
            connection: ConnectionConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn address<A: Into<SocketAddr>>(mut self, address: A) -> Self {
        self.config.address = address.into();
        self
    }

    pub fn keep_alive_timeout(mut self, keep_alive_timeout: Duration) -> Self {
        self.config.keep_alive_timeout = keep_alive_timeout;
        self
    }

    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.config.max_connections = max_connections;
        self
    }

    pub fn scan_interval(mut self, scan_interval: Duration) -> Self {
        self.config.scan_interval = scan_interval;
        self
    }

    pub fn initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.connection.initial_buffer_capacity = capacity;
        self
    }

    pub fn max_content_size(mut self, max_content_size: usize) -> Self {
        self.config.connection.max_content_size = max_content_size;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}
