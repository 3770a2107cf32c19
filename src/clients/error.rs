//! Error type shared by all external service clients.

use thiserror::Error;

/// Errors raised by calls to external collaborator services.
///
/// How these propagate is decided by the caller: the capacity snapshot is
/// fatal to the run, everything else degrades to an empty result.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {source}")]
    Build {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error calling {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The URL that returned the error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {url}: {detail}")]
    Malformed {
        /// The URL whose response was unusable.
        url: String,
        /// What was wrong with the body.
        detail: String,
    },
}

impl ClientError {
    /// Creates a client-construction error.
    pub fn build(source: reqwest::Error) -> Self {
        Self::Build { source }
    }

    /// Creates a network error for `url`.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error for `url`.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-response error for `url`.
    pub fn malformed(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Malformed {
            url: url.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = ClientError::http_status("http://localhost/api", 503);
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost/api");
    }

    #[test]
    fn test_malformed_display_includes_detail() {
        let err = ClientError::malformed("http://localhost/api", "missing field `limit`");
        assert!(err.to_string().contains("missing field `limit`"));
    }
}
