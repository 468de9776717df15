//! Transport error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while executing a fast request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No complete response within the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The fast request could not be turned into a wire request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, DNS or protocol failure.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
}

impl TransportError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Timeout(_) => "timeout",
            TransportError::InvalidRequest(_) => "invalid_request",
            TransportError::Upstream(_) => "upstream",
            TransportError::Body(_) => "body",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "request timed out after 250ms");
        assert_eq!(err.kind(), "timeout");

        let err = TransportError::InvalidRequest("bad uri".into());
        assert!(err.to_string().contains("bad uri"));
    }
}
