//! Main error type for the Gemini client.

use thiserror::Error;
use super::categories::*;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Top-level error type.
///
/// Every failure of a run lands in exactly one of these categories. None of
/// them is retried; the binary maps each to its own exit code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeminiError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Output error: {message}")]
    Output { message: String },
}

impl GeminiError {
    /// Short, stable name of the error category.
    pub fn category(&self) -> &'static str {
        match self {
            GeminiError::Configuration(_) => "configuration",
            GeminiError::Authentication(_) => "authentication",
            GeminiError::Request(_) => "request",
            GeminiError::RateLimit(_) => "rate_limit",
            GeminiError::Network(_) => "network",
            GeminiError::Server(_) => "server",
            GeminiError::Response(_) => "response",
            GeminiError::Content(_) => "content",
            GeminiError::Output { .. } => "output",
        }
    }

    /// Process exit code for this error. Always non-zero.
    ///
    /// Rate limit, network and server failures share one code: all three mean
    /// the service could not be reached or did not serve the request.
    pub fn exit_code(&self) -> u8 {
        match self {
            GeminiError::Configuration(_) => 2,
            GeminiError::Authentication(_) => 3,
            GeminiError::Request(_) => 4,
            GeminiError::RateLimit(_) | GeminiError::Network(_) | GeminiError::Server(_) => 5,
            GeminiError::Response(_) => 6,
            GeminiError::Content(_) => 7,
            GeminiError::Output { .. } => 8,
        }
    }

    /// Returns true for transport and remote-service failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimit(_) | GeminiError::Network(_) | GeminiError::Server(_)
        )
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for GeminiError {
    fn from(err: url::ParseError) -> Self {
        GeminiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

impl From<std::io::Error> for GeminiError {
    fn from(err: std::io::Error) -> Self {
        GeminiError::Output {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_display_names_category() {
        let auth_error = GeminiError::Authentication(AuthenticationError::InvalidApiKey {
            message: "API key not valid".to_string(),
        });
        assert!(auth_error.to_string().starts_with("Authentication error"));

        let config_error = GeminiError::Configuration(ConfigurationError::MissingApiKey);
        assert!(config_error.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_exit_codes_are_nonzero() {
        let errors = [
            GeminiError::Configuration(ConfigurationError::MissingApiKey),
            GeminiError::Network(NetworkError::Timeout),
            GeminiError::Server(ServerError::InternalError { message: "boom".into() }),
            GeminiError::Response(ResponseError::EmptyText),
            GeminiError::Output { message: "broken pipe".into() },
        ];

        for error in &errors {
            assert_ne!(error.exit_code(), 0, "{error}");
        }
    }

    #[test]
    fn test_transport_classification() {
        let rate_limit = GeminiError::RateLimit(RateLimitError::TooManyRequests {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(rate_limit.is_transport());
        assert_eq!(rate_limit.exit_code(), 5);

        let response = GeminiError::Response(ResponseError::NoCandidates);
        assert!(!response.is_transport());
        assert_eq!(response.category(), "response");
    }

    #[test]
    fn test_io_error_maps_to_output() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error = GeminiError::from(io);
        assert_eq!(error.category(), "output");
        assert_eq!(error.exit_code(), 8);
    }
}
