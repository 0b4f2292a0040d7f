//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! This module turns the leading bytes of a receive buffer into a typed
//! `http::Request<()>` plus the number of bytes the start line and header
//! section occupied. It also works out how long the body is according to
//! HTTP/1.1 message framing rules.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Only supports HTTP/1.0 and HTTP/1.1
//! - Only `Content-Length` framed bodies; any `Transfer-Encoding` is rejected
//!
//! The header section itself has no byte limit here: the connection caps the
//! whole receive buffer instead.

use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderName, HeaderValue, Request};
use httparse::{Error, Status};
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;

/// Maximum number of headers allowed in a request
pub(crate) const MAX_HEADER_NUM: usize = 64;

/// A decoded request head.
#[derive(Debug)]
pub(crate) struct DecodedHeader {
    pub(crate) header: Request<()>,
    /// Bytes taken by the start line, the headers and the empty line
    pub(crate) header_len: usize,
    /// Body length announced by `Content-Length`, zero when absent
    pub(crate) content_length: u64,
}

/// Decoder for HTTP request heads.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeaderDecoder;

impl HeaderDecoder {
    /// Attempts to decode a request head from the front of `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(header))` if a complete head was parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the bytes can never form a valid head
    pub(crate) fn decode(&self, src: &[u8]) -> Result<Option<DecodedHeader>, ParseError> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let parsed_result = req.parse(src).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        });

        let header_len = match parsed_result? {
            Status::Complete(header_len) => header_len,
            Status::Partial => return Ok(None),
        };
        trace!(header_len, "parsed request head");

        let version = match req.version {
            Some(0) => http::Version::HTTP_10,
            Some(1) => http::Version::HTTP_11,
            // Currently HTTP/2 and HTTP/3 not supported
            _ => return Err(ParseError::InvalidVersion(req.version)),
        };

        let mut header_builder = Request::builder()
            .method(req.method.ok_or(ParseError::InvalidMethod)?)
            .uri(req.path.ok_or(ParseError::InvalidUri)?)
            .version(version);

        if let Some(header_map) = header_builder.headers_mut() {
            header_map.reserve(req.headers.len());
            for header in req.headers.iter() {
                let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(ParseError::invalid_header)?;
                let value = HeaderValue::from_bytes(header.value).map_err(ParseError::invalid_header)?;
                header_map.append(name, value);
            }
        }

        // the builder keeps the first method/uri error it met and reports it here
        let header = header_builder.body(()).map_err(|e| {
            if e.is::<http::method::InvalidMethod>() { ParseError::InvalidMethod } else { ParseError::InvalidUri }
        })?;

        let content_length = parse_content_length(header.headers())?;

        Ok(Some(DecodedHeader { header, header_len, content_length }))
    }
}

/// Determines the body length from the request headers.
///
/// refer: https://www.rfc-editor.org/rfc/rfc9112.html#name-message-body-length
///
/// Chunked bodies are never reframed here, so any `Transfer-Encoding` is
/// rejected rather than risk misreading where the next pipelined request
/// starts.
fn parse_content_length(headers: &HeaderMap) -> Result<u64, ParseError> {
    if let Some(te_value) = headers.get(TRANSFER_ENCODING) {
        return Err(ParseError::unsupported_transfer_encoding(String::from_utf8_lossy(te_value.as_bytes())));
    }

    let mut content_length = None;
    for cl_value in headers.get_all(CONTENT_LENGTH) {
        let cl_str = cl_value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;

        let length =
            cl_str.trim().parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;

        if let Some(previous) = content_length {
            ensure!(previous == length, ParseError::invalid_content_length(format!("conflicting values {previous} and {length}")));
        }
        content_length = Some(length);
    }

    Ok(content_length.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, Version};
    use indoc::indoc;

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let decoded = HeaderDecoder.decode(str.as_bytes()).unwrap().unwrap();
        let header = decoded.header;

        assert_eq!(decoded.header_len, str.len());
        assert_eq!(decoded.content_length, 0);

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().host(), None);
        assert_eq!(header.uri().path(), "/index.html");
        assert_eq!(header.uri().query(), None);

        assert_eq!(header.headers().len(), 3);
        assert_eq!(header.headers().get(http::header::ACCEPT), Some(&HeaderValue::from_static("*/*")));
        assert_eq!(header.headers().get(http::header::HOST), Some(&HeaderValue::from_static("127.0.0.1:8080")));
        assert_eq!(header.headers().get(http::header::USER_AGENT), Some(&HeaderValue::from_static("curl/7.79.1")));
    }

    #[test]
    fn from_edge() {
        let str = indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        Upgrade-Insecure-Requests: 1
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8
        Sec-Fetch-Site: none
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let header = HeaderDecoder.decode(str.as_bytes()).unwrap().unwrap().header;

        assert_eq!(header.uri().path(), "/index/");
        assert_eq!(header.uri().query(), Some("a=1&b=2&a=3"));
        assert_eq!(header.headers().len(), 9);
        assert_eq!(header.headers().get(http::header::CONNECTION), Some(&HeaderValue::from_static("keep-alive")));
        assert_eq!(
            header.headers().get("sec-ch-ua"),
            Some(&HeaderValue::from_static(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##))
        );
        assert_eq!(header.headers().get(http::header::ACCEPT_ENCODING), Some(&HeaderValue::from_static("gzip, deflate, br")));
    }

    #[test]
    fn partial_head_needs_more() {
        assert!(HeaderDecoder.decode(b"").unwrap().is_none());
        assert!(HeaderDecoder.decode(b"GET / HTTP/1.1\r\nHost: loc").unwrap().is_none());
    }

    #[test]
    fn content_length() {
        let decoded = HeaderDecoder.decode(b"POST /upload HTTP/1.1\r\nContent-Length: 11\r\n\r\n").unwrap().unwrap();
        assert_eq!(decoded.content_length, 11);

        let decoded =
            HeaderDecoder.decode(b"POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 3\r\n\r\n").unwrap().unwrap();
        assert_eq!(decoded.content_length, 3);
    }

    #[test]
    fn invalid_content_length() {
        let result = HeaderDecoder.decode(b"POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));

        let result = HeaderDecoder.decode(b"POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 4\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn transfer_encoding_rejected() {
        let result = HeaderDecoder.decode(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n");
        assert!(matches!(result, Err(ParseError::UnsupportedTransferEncoding { .. })));
    }

    #[test]
    fn malformed_start_line() {
        assert!(HeaderDecoder.decode(b"GET\x01/ HTTP/1.1\r\n\r\n").is_err());
        assert!(HeaderDecoder.decode(b"HELLO WORLD\r\n\r\n").is_err());
    }

    #[test]
    fn too_many_headers() {
        let mut request = String::from("GET / HTTP/1.1\r\n");
        for i in 0..=MAX_HEADER_NUM {
            request.push_str(&format!("X-Header-{i}: {i}\r\n"));
        }
        request.push_str("\r\n");

        let result = HeaderDecoder.decode(request.as_bytes());
        assert!(matches!(result, Err(ParseError::TooManyHeaders { .. })));
    }
}
