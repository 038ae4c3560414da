use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Refusing to send an auth token over a plaintext connection to a non-localhost host")]
    InsecureCredentialTransmission,

    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Failed to deserialize response payload: {0}")]
    Deserialization(serde_json::Error),

    #[error("Request was cancelled before it completed")]
    Cancelled,
}

impl Error {
    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Code carried by a server-reported error, if this is one.
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.code),
            _ => None,
        }
    }
}

/// A non-200 response translated from the service's JSON error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// Numeric code from the envelope, or the HTTP status when absent.
    pub code: u16,
    /// Status line text, e.g. "400 Bad Request".
    pub status: String,
    /// Human-readable message; empty if the server supplied none.
    pub message: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "key service returned {} ({})", self.code, self.status)
        } else {
            write!(f, "key service returned {} ({}): {}", self.code, self.status, self.message)
        }
    }
}

impl std::error::Error for HttpError {}
