//! Error types for webring fetch and decode operations

use reqwest::StatusCode;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], one per failing stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed URL, client setup failure, or cancellation before dispatch
    RequestConstruction,
    /// Transport error or non-200 response
    FetchFailed,
    /// JSON syntax error or schema mismatch
    DecodeFailed,
    /// Document `version` is not 1
    UnsupportedVersion,
    /// Cancelled while the request was in flight
    Cancelled,
    /// Serializing a document failed
    EncodeFailed,
}

/// Point of an in-flight request at which cancellation was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Connecting, sending, or waiting for response headers
    AwaitingResponse,
    /// Streaming the response body into the decoder
    ReadingBody,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::AwaitingResponse => write!(f, "awaiting response"),
            Stage::ReadingBody => write!(f, "reading body"),
        }
    }
}

/// Errors raised by the webring client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} cancelled before dispatch")]
    CancelledBeforeDispatch { url: String },

    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode webring document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unsupported document version {0}, only version 1 is supported")]
    UnsupportedVersion(i64),

    #[error("request to {url} cancelled while {stage}")]
    Cancelled { url: String, stage: Stage },

    #[error("failed to encode webring document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl { .. } | Error::Client(_) | Error::CancelledBeforeDispatch { .. } => {
                ErrorKind::RequestConstruction
            }
            Error::Transport { .. } | Error::Status { .. } => ErrorKind::FetchFailed,
            Error::Decode(_) => ErrorKind::DecodeFailed,
            Error::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Encode(_) => ErrorKind::EncodeFailed,
        }
    }

    /// True if the caller's token ended the operation, before or during I/O
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Cancelled { .. } | Error::CancelledBeforeDispatch { .. }
        )
    }

    /// HTTP status of a non-200 response, if that is what failed
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
