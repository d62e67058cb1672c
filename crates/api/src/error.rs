//! Error types for the Guildgate API client.

use std::fmt;

use thiserror::Error;

/// Classified failure of a dispatched API call.
///
/// Every failed call surfaces as exactly one of these kinds; none are retried
/// by the client. `Remote` carries the service-supplied code and message
/// verbatim so callers can branch on them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required credential material is missing, or the client was built with
    /// an unusable configuration. Fatal, not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP transport failed outright: connection refused, DNS failure,
    /// timeout, or a non-success status.
    #[error("failed to send API request")]
    Transport {
        #[source]
        source: anyhow::Error,
    },

    /// The transport succeeded but the service returned no usable body.
    #[error("API returned no data")]
    EmptyResponse,

    /// The service explicitly reported failure.
    #[error("API error {code}: {message}")]
    Remote { code: String, message: String },

    /// A successful reply did not match the shape the wrapper expected.
    #[error("unexpected response shape: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub(crate) fn transport(source: impl Into<anyhow::Error>) -> Self {
        ApiError::Transport {
            source: source.into(),
        }
    }

    pub(crate) fn decode(error: impl fmt::Display) -> Self {
        ApiError::Decode {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_code_and_message() {
        let error = ApiError::Remote {
            code: "not_linked".into(),
            message: "Player is not linked.".into(),
        };
        assert_eq!(error.to_string(), "API error not_linked: Player is not linked.");
    }

    #[test]
    fn transport_error_preserves_the_cause() {
        let error = ApiError::transport(anyhow::anyhow!("connection refused"));
        let source = std::error::Error::source(&error).expect("source");
        assert_eq!(source.to_string(), "connection refused");
    }
}
