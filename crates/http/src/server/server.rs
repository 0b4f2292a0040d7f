use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio::sync::Semaphore;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::connection::{HttpConnection, TcpTransport, Transport};
use crate::handler::RequestHandler;
use crate::protocol::ServerError;
use crate::server::ServerConfig;

#[derive(Debug)]
pub struct ServerBuilder<H> {
    config: ServerConfig,
    handler: Option<H>,
}

impl<H> ServerBuilder<H>
where
    H: RequestHandler + Send + Sync + 'static,
{
    fn new() -> Self {
        Self { config: ServerConfig::default(), handler: None }
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<HttpServer<H>, ServerError> {
        let handler = self.handler.ok_or(ServerError::MissingHandler)?;
        Ok(HttpServer { config: self.config, handler: Arc::new(handler) })
    }
}

/// Accepts TCP connections and runs an [`HttpConnection`] for each of them.
///
/// Every connection lives in its own task, which is the only place its
/// connection is touched: readiness callbacks and the periodic expiry check
/// never overlap.
#[derive(Debug)]
pub struct HttpServer<H> {
    config: ServerConfig,
    handler: Arc<H>,
}

#[derive(Debug)]
enum Event {
    Ready(std::io::Result<tokio::io::Ready>),
    Scan,
}

impl<H> HttpServer<H>
where
    H: RequestHandler + Send + Sync + 'static,
{
    pub fn builder() -> ServerBuilder<H> {
        ServerBuilder::new()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the configured address and serves until the process ends.
    pub async fn start(self) -> Result<(), ServerError> {
        let address = self.config.address();
        let tcp_listener = TcpListener::bind(address).await.map_err(|e| ServerError::bind(address, e))?;
        self.serve(tcp_listener).await
    }

    /// Serves connections accepted from an already bound listener.
    pub async fn serve(self, tcp_listener: TcpListener) -> Result<(), ServerError> {
        info!(address = %tcp_listener.local_addr()?, "start listening");
        let permits = Arc::new(Semaphore::new(self.config.max_connections()));

        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let Ok(permit) = Arc::clone(&permits).try_acquire_owned() else {
                warn!(peer = %remote_addr, limit = self.config.max_connections(), "too many connections, dropping new one");
                continue;
            };

            let handler = Arc::clone(&self.handler);
            let config = self.config.clone();
            tokio::spawn(async move {
                serve_connection(tcp_stream, handler, &config).await;
                drop(permit);
            });
        }
    }
}

/// Drives one connection from accept to close.
async fn serve_connection<H: RequestHandler>(tcp_stream: TcpStream, handler: Arc<H>, config: &ServerConfig) {
    let transport = match TcpTransport::new(tcp_stream) {
        Ok(transport) => transport,
        Err(e) => {
            error!(cause = %e, "can't resolve connection endpoints");
            return;
        }
    };
    let peer = transport.peer_addr();
    debug!(%peer, "accepted connection");

    let mut connection = HttpConnection::with_config(transport, handler, config.connection());

    let mut scan = interval(config.scan_interval());
    scan.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    scan.tick().await;

    while !connection.is_closed() {
        let interest = connection.transport().interest();
        // readiness first, so bytes arriving at a scan tick are read rather than evicted
        let event = select! {
            biased;
            ready = connection.transport().ready(interest) => Event::Ready(ready),
            _ = scan.tick() => Event::Scan,
        };

        match event {
            Event::Ready(Ok(ready)) => {
                if ready.is_writable() {
                    match connection.transport_mut().flush() {
                        Ok(0) => {}
                        Ok(_) => connection.on_data_flushed(),
                        Err(e) => {
                            debug!(cause = %e, %peer, "write response error, closing connection");
                            connection.transport_mut().close();
                            continue;
                        }
                    }
                }
                if (ready.is_readable() || ready.is_read_closed()) && !connection.transport().is_backlogged() {
                    connection.on_data_available();
                }
            }
            Event::Ready(Err(e)) => {
                debug!(cause = %e, %peer, "poll connection error, closing connection");
                connection.transport_mut().close();
            }
            Event::Scan => {
                if connection.has_expired(config.keep_alive_timeout()) {
                    debug!(%peer, timeout = ?config.keep_alive_timeout(), "connection idle for too long, closing");
                    connection.transport_mut().close();
                }
            }
        }
    }

    // give a final response queued right before closing a chance to leave
    let shutdown = tokio::time::timeout(Duration::from_secs(1), connection.transport_mut().shutdown()).await;
    if let Ok(Err(e)) = shutdown {
        debug!(cause = %e, %peer, "shutdown connection error");
    }
    debug!(%peer, "connection closed");
}
