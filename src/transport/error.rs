//! Transport layer error types.

use crate::error::{ConfigurationError, GeminiError, NetworkError};

/// Transport error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent.
    #[error("Connection error: {0}")]
    Connection(String),
    /// Connect or request timeout elapsed.
    #[error("Timeout")]
    Timeout,
    /// The response body could not be read.
    #[error("Body error: {0}")]
    Body(String),
    /// A header name or value is not valid on the wire. Only the name is kept.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl From<TransportError> for GeminiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection(message) => {
                GeminiError::Network(NetworkError::ConnectionFailed { message })
            }
            TransportError::Timeout => GeminiError::Network(NetworkError::Timeout),
            TransportError::Body(message) => GeminiError::Network(NetworkError::BodyRead { message }),
            TransportError::InvalidHeader(name) => {
                GeminiError::Configuration(ConfigurationError::InvalidHeader { name })
            }
        }
    }
}
