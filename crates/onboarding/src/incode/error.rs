//! Failures raised while talking to the Incode Omni API.

use reqwest::{Method, StatusCode};

/// Everything that can go wrong on an upstream call.
///
/// The `Display` text is what callers eventually see in the `error` field of
/// a normalized reply, so it names the endpoint but never the credentials.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// A configured credential cannot be sent as a header value.
    #[error("{header} contains characters that are not valid in an HTTP header")]
    InvalidHeader { header: &'static str },
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("{method} {endpoint} failed: {source}")]
    Transport {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The provider answered with a non-2xx status.
    #[error("{status} from {method} {endpoint}")]
    Status {
        method: Method,
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    /// The provider answered 2xx but the body did not match the expected shape.
    #[error("failed to decode response from {method} {endpoint}: {source}")]
    Decode {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Transport { source, .. } if source.is_timeout())
    }

    /// HTTP status returned by the provider, when there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
