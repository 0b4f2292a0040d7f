use bytes::Bytes;
use http::{StatusCode, header};
use micro_http_engine::handler::make_handler;
use micro_http_engine::protocol::{Environment, Request, Response};
use micro_http_engine::server::{HttpServer, ServerConfig};
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let handler = make_handler(|request: &Request, env: &Environment| {
        info!(method = %request.method(), path = request.uri().path(), client = %env.peer_addr(), "handling request");

        match request.uri().path() {
            "/" => {
                let mut response = Response::new(Bytes::from_static(b"Hello World!\r\n"));
                response.headers_mut().insert(header::CONTENT_TYPE, header::HeaderValue::from_static("text/plain"));
                response
            }
            "/echo" => Response::new(request.body().clone()),
            _ => {
                let mut response = Response::new(Bytes::from_static(b"not found\r\n"));
                *response.status_mut() = StatusCode::NOT_FOUND;
                response
            }
        }
    });

    let config = ServerConfig::builder()
        .address(([127, 0, 0, 1], 8080))
        .keep_alive_timeout(Duration::from_secs(7))
        .max_connections(500)
        .build();

    let server = match HttpServer::builder().config(config).handler(handler).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return;
        }
    };

    if let Err(e) = server.start().await {
        error!(cause = %e, "server error");
    }
}
