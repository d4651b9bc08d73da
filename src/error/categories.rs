//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing API key: set GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("Malformed API key: contains control characters")]
    MalformedApiKey,

    #[error("Header {name} has a value that cannot be sent")]
    InvalidHeader { name: String },

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid value for {variable}: {value}")]
    InvalidEnvironmentValue { variable: String, value: String },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },
}

/// Request validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Validation error: {message}")]
    ValidationError { message: String, details: Vec<ValidationDetail> },

    #[error("Invalid model: {model}")]
    InvalidModel { model: String },

    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },
}

/// Validation detail for field-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    pub field: String,
    pub description: String,
}

/// Rate limiting errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Too many requests")]
    TooManyRequests { retry_after: Option<Duration> },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String, retry_after: Option<Duration> },
}

impl RateLimitError {
    /// Server-suggested wait before the caller tries again.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after }
            | RateLimitError::QuotaExceeded { retry_after, .. } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to read response body: {message}")]
    BodyRead { message: String },
}

/// Server-side errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String, retry_after: Option<Duration> },

    #[error("Unexpected HTTP status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Failed to deserialize response: {message}")]
    DeserializationError { message: String },

    #[error("Response contained no candidates")]
    NoCandidates,

    #[error("Response contained no text")]
    EmptyText,
}

/// Content safety errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content blocked due to safety: {reason}")]
    SafetyBlocked {
        reason: String,
        safety_ratings: Vec<SafetyRatingInfo>,
    },

    #[error("Content blocked due to recitation")]
    RecitationBlocked,

    #[error("Prohibited content detected: {reason}")]
    ProhibitedContent { reason: String },
}

/// Information about a safety rating for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyRatingInfo {
    pub category: String,
    pub probability: String,
}
