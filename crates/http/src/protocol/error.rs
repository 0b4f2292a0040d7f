use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Reasons a buffered request can never become a valid frame.
///
/// The connection answers any of these with `400 Bad Request` and closes; the
/// reason itself is only used for logging.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("content length {content_length} exceed the limit {max_size}")]
    TooLargeContent { content_length: u64, max_size: usize },

    #[error("unsupported transfer-encoding: {reason}")]
    UnsupportedTransferEncoding { reason: String },
}

impl ParseError {
    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn too_large_content(content_length: u64, max_size: usize) -> Self {
        Self::TooLargeContent { content_length, max_size }
    }

    pub fn unsupported_transfer_encoding<S: ToString>(str: S) -> Self {
        Self::UnsupportedTransferEncoding { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("request handler must be set")]
    MissingHandler,

    #[error("bind {address} error: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ServerError {
    pub fn bind(address: SocketAddr, source: io::Error) -> Self {
        Self::Bind { address, source }
    }
}
