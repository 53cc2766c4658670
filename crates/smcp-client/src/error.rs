//! Client error types and their mapping onto the core error contracts.

use smcp_core::{ApiError, MatchError};
use thiserror::Error;

/// Errors that can occur when talking to Sentry or the model endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Api { status: 404, message } => Self::NotFound(message),
            ClientError::Parse(detail) => Self::Malformed(detail),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for MatchError {
    fn from(error: ClientError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found() {
        let err = ApiError::from(ClientError::Api {
            status: 404,
            message: "The requested resource does not exist".into(),
        });
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn parse_failure_maps_to_malformed() {
        let err = ApiError::from(ClientError::Parse("expected value at line 1".into()));
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn server_errors_and_rate_limits_are_unavailable() {
        let err = ApiError::from(ClientError::Api {
            status: 502,
            message: "bad gateway".into(),
        });
        assert!(matches!(err, ApiError::Unavailable(m) if m.contains("502")));

        let err = ApiError::from(ClientError::RateLimited {
            retry_after_secs: 30,
        });
        assert!(matches!(err, ApiError::Unavailable(m) if m.contains("30s")));
    }

    #[test]
    fn match_errors_are_unavailable() {
        let err = MatchError::from(ClientError::Api {
            status: 401,
            message: "invalid api key".into(),
        });
        assert!(matches!(err, MatchError::Unavailable(_)));
    }
}
