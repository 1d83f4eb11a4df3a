//! Error types for the prediction pipeline

use crate::models::PredictionKind;
use serde::Serialize;
use thiserror::Error;

/// Result type for inference operations.
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Failures of a single inference call.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Server responded with {status}: {reason}")]
    Http { status: u16, reason: String },

    /// A success response whose body does not match the expected shape.
    #[error("Malformed {kind} response: {message}")]
    Decode {
        kind: PredictionKind,
        message: String,
    },

    /// The endpoint could not be derived from the base address.
    #[error("Invalid endpoint for {kind}: {source}")]
    InvalidEndpoint {
        kind: PredictionKind,
        #[source]
        source: url::ParseError,
    },
}

/// User-facing grouping of prediction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureClass {
    Transport,
    Http,
    Decode,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Transport => "transport",
            FailureClass::Http => "http",
            FailureClass::Decode => "decode",
        }
    }
}

impl PredictionError {
    pub fn class(&self) -> FailureClass {
        match self {
            PredictionError::Transport(_) | PredictionError::InvalidEndpoint { .. } => {
                FailureClass::Transport
            }
            PredictionError::Http { .. } => FailureClass::Http,
            PredictionError::Decode { .. } => FailureClass::Decode,
        }
    }

    /// Numeric HTTP status, when the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            PredictionError::Http { status, .. } => Some(*status),
            PredictionError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn decode(kind: PredictionKind, message: impl Into<String>) -> Self {
        PredictionError::Decode {
            kind,
            message: message.into(),
        }
    }
}

/// Errors raised while loading service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid backend URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_carries_status() {
        let err = PredictionError::Http {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Server responded with 503: Service Unavailable");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.class(), FailureClass::Http);
    }

    #[test]
    fn test_decode_error_class() {
        let err = PredictionError::decode(PredictionKind::Lifespan, "missing field");
        assert_eq!(err.class(), FailureClass::Decode);
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("lifespan"));
    }
}
