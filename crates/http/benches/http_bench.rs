use bytes::Bytes;
use criterion::{Criterion, criterion_group, criterion_main};
use http::header;
use micro_http_engine::codec::{RequestDecoder, ResponseEncoder};
use micro_http_engine::connection::{HttpConnection, Transport};
use micro_http_engine::handler::make_handler;
use micro_http_engine::protocol::{Environment, Request, Response, accepts_gzip};
use std::hint::black_box;
use std::io;
use std::net::SocketAddr;

const SIMPLE_REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";

const BROWSER_REQUEST: &[u8] = b"GET /api/v2/torrents/info?filter=downloading HTTP/1.1\r\n\
Host: 127.0.0.1:8080\r\n\
User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0\r\n\
Accept: application/json, text/javascript, */*; q=0.01\r\n\
Accept-Language: en-US,en;q=0.5\r\n\
Accept-Encoding: gzip, deflate, br, zstd\r\n\
Referer: http://127.0.0.1:8080/\r\n\
Cookie: SID=9mGn1Cx5Cg6Kp0mWbTq3x1Hk8yU2fO4e\r\n\
Connection: keep-alive\r\n\r\n";

/// In-memory transport replaying the same input on every read cycle.
#[derive(Debug)]
struct ReplayTransport {
    input: &'static [u8],
    offset: usize,
    written: usize,
    connected: bool,
}

impl ReplayTransport {
    fn new(input: &'static [u8]) -> Self {
        Self { input, offset: 0, written: 0, connected: true }
    }

    fn rewind(&mut self) {
        self.offset = 0;
    }
}

impl Transport for ReplayTransport {
    fn bytes_available(&self) -> usize {
        self.input.len() - self.offset
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let amount = buf.len().min(self.input.len() - self.offset);
        buf[..amount].copy_from_slice(&self.input[self.offset..self.offset + amount]);
        self.offset += amount;
        Ok(amount)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.written += data.len();
        Ok(())
    }

    fn bytes_to_write(&self) -> usize {
        0
    }

    fn local_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 8080))
    }

    fn peer_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 50000))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_eof(&self) -> bool {
        false
    }

    fn close(&mut self) {
        self.connected = false;
    }
}

fn bench_request_decoder(c: &mut Criterion) {
    let decoder = RequestDecoder::new();

    c.bench_function("decode_simple_request", |b| {
        b.iter(|| black_box(decoder.decode(black_box(SIMPLE_REQUEST))));
    });

    c.bench_function("decode_browser_request", |b| {
        b.iter(|| black_box(decoder.decode(black_box(BROWSER_REQUEST))));
    });

    let partial = &BROWSER_REQUEST[..BROWSER_REQUEST.len() - 10];
    c.bench_function("decode_partial_request", |b| {
        b.iter(|| black_box(decoder.decode(black_box(partial))));
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let encoder = ResponseEncoder::new();
    let plain = Response::new(Bytes::from_static(b"Hello World!"));

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| black_box(encoder.encode_to_bytes(plain.clone())));
    });

    let mut gzip = Response::new(Bytes::from("{\"hash\":\"8c4adbf9ebe66f1d804fb6a4fb9b74966c3ab609\"}".repeat(64)));
    gzip.headers_mut().insert(header::CONTENT_ENCODING, header::HeaderValue::from_static("gzip"));
    c.bench_function("encode_gzip_response", |b| {
        b.iter(|| black_box(encoder.encode_to_bytes(gzip.clone())));
    });
}

fn bench_accept_encoding(c: &mut Criterion) {
    c.bench_function("accepts_gzip_browser", |b| {
        b.iter(|| black_box(accepts_gzip(black_box("gzip, deflate, br, zstd"))));
    });

    c.bench_function("accepts_gzip_weighted", |b| {
        b.iter(|| black_box(accepts_gzip(black_box("br;q=1.0, deflate;q=0.5, *;q=0.1"))));
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = make_handler(|_request: &Request, _env: &Environment| Response::new(Bytes::from_static(b"Hello World!")));

    let mut connection = HttpConnection::new(ReplayTransport::new(BROWSER_REQUEST), &handler);
    c.bench_function("process_browser_request", |b| {
        b.iter(|| {
            connection.transport_mut().rewind();
            connection.on_data_available();
            black_box(connection.transport().written)
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_accept_encoding, bench_http_connection);
criterion_main!(benches);
