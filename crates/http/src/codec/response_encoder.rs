use bytes::{BufMut, Bytes, BytesMut};
use http::HeaderValue;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH};
use tracing::warn;

use crate::codec::body::{GZIP_MIN_BODY, GzipEncoder};
use crate::codec::header::HeaderEncoder;
use crate::protocol::{GZIP, Response};

/// Serializes responses into HTTP/1.1 wire format.
///
/// A response marked `Content-Encoding: gzip` gets its body compressed here,
/// unless the body is too small to benefit, in which case the marker is
/// dropped instead. `Content-Length` always reflects the bytes actually sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    gzip_encoder: GzipEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&self, response: Response, dst: &mut BytesMut) {
        let (mut parts, body) = response.into_parts();

        let body = if parts.headers.get(CONTENT_ENCODING) == Some(&GZIP) {
            self.gzip_body(&mut parts.headers, body)
        } else {
            body
        };

        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        self.header_encoder.encode(parts.status, &parts.headers, dst);
        dst.reserve(body.len());
        dst.put_slice(&body);
    }

    fn gzip_body(&self, headers: &mut http::HeaderMap, body: Bytes) -> Bytes {
        if body.len() < GZIP_MIN_BODY {
            headers.remove(CONTENT_ENCODING);
            return body;
        }

        match self.gzip_encoder.encode(&body) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(cause = %e, "gzip encode response body error, sending it uncompressed");
                headers.remove(CONTENT_ENCODING);
                body
            }
        }
    }

    /// Serializes `response` into a fresh buffer
    pub fn encode_to_bytes(&self, response: Response) -> Bytes {
        let mut dst = BytesMut::new();
        self.encode(response, &mut dst);
        dst.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use http::StatusCode;
    use std::io::Read;

    fn split_head(bytes: &[u8]) -> (String, &[u8]) {
        let pos = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
        (String::from_utf8(bytes[..pos].to_vec()).unwrap(), &bytes[pos..])
    }

    #[test]
    fn plain_response() {
        let mut response = Response::new(Bytes::from_static(b"Hello World!"));
        response.headers_mut().insert("Content-Type", HeaderValue::from_static("text/plain"));

        let bytes = ResponseEncoder::new().encode_to_bytes(response);

        assert_eq!(&bytes[..], &b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 12\r\n\r\nHello World!"[..]);
    }

    #[test]
    fn content_length_is_replaced() {
        let mut response = Response::new(Bytes::from_static(b"abc"));
        response.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from_static("100"));
        *response.status_mut() = StatusCode::NOT_FOUND;

        let bytes = ResponseEncoder::new().encode_to_bytes(response);

        assert_eq!(&bytes[..], &b"HTTP/1.1 404 Not Found\r\ncontent-length: 3\r\n\r\nabc"[..]);
    }

    #[test]
    fn gzip_body_is_compressed() {
        let body = "{\"torrents\":[],\"rid\":1,\"full_update\":true}".repeat(8);
        let mut response = Response::new(Bytes::from(body.clone()));
        response.headers_mut().insert(CONTENT_ENCODING, GZIP);

        let bytes = ResponseEncoder::new().encode_to_bytes(response);
        let (head, payload) = split_head(&bytes);

        assert!(head.contains("content-encoding: gzip\r\n"));
        assert!(head.contains(&format!("content-length: {}\r\n", payload.len())));

        let mut decoded = String::new();
        GzDecoder::new(payload).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn tiny_gzip_body_is_sent_as_is() {
        let mut response = Response::new(Bytes::from_static(b"ok"));
        response.headers_mut().insert(CONTENT_ENCODING, GZIP);

        let bytes = ResponseEncoder::new().encode_to_bytes(response);

        assert_eq!(&bytes[..], &b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nok"[..]);
    }
}
