//! Structured logging for the Gemini client.

use serde_json::Value;
use crate::config::LogLevel;

/// Keys whose values are replaced before a log event is emitted.
const SENSITIVE_KEYS: [&str; 11] = [
    "api_key", "apiKey", "key",
    "token", "access_token", "accessToken",
    "secret", "password", "credential",
    "authorization", "x-goog-api-key",
];

const REDACTED: &str = "***REDACTED***";

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Structured logger backed by `tracing`.
///
/// Context fields are emitted as one JSON-rendered `fields` value after
/// sensitive keys have been redacted.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    fn redact_sensitive_fields(fields: Value) -> Value {
        match fields {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        if SENSITIVE_KEYS.iter().any(|s| s.eq_ignore_ascii_case(&key)) {
                            (key, Value::String(REDACTED.to_string()))
                        } else {
                            (key, Self::redact_sensitive_fields(value))
                        }
                    })
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(Self::redact_sensitive_fields).collect())
            }
            other => other,
        }
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }

        let fields = Self::redact_sensitive_fields(fields);
        tracing::debug!(logger = %self.name, fields = %fields, "{message}");
    }

    fn info(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Info) {
            return;
        }

        let fields = Self::redact_sensitive_fields(fields);
        tracing::info!(logger = %self.name, fields = %fields, "{message}");
    }

    fn warn(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }

        let fields = Self::redact_sensitive_fields(fields);
        tracing::warn!(logger = %self.name, fields = %fields, "{message}");
    }

    fn error(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Error) {
            return;
        }

        let fields = Self::redact_sensitive_fields(fields);
        tracing::error!(logger = %self.name, fields = %fields, "{message}");
    }
}

/// Logger that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_logger_with_level() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Debug);
        assert_eq!(logger.level, LogLevel::Debug);
        assert_eq!(logger.name, "test");
    }

    #[test]
    fn test_should_log() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Info);
        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Trace));
    }

    #[test]
    fn test_redact_sensitive_fields() {
        let redacted = StructuredLogger::redact_sensitive_fields(json!({
            "api_key": "secret-key-123",
            "model": "gemini-2.5-flash",
        }));

        assert_eq!(redacted["api_key"], "***REDACTED***");
        assert_eq!(redacted["model"], "gemini-2.5-flash");
    }

    #[test]
    fn test_redact_nested_and_case_insensitive() {
        let redacted = StructuredLogger::redact_sensitive_fields(json!({
            "request": {
                "headers": [{"X-Goog-Api-Key": "abc"}],
                "Authorization": "Bearer token-123",
                "model": "gemini-2.5-flash"
            }
        }));

        assert_eq!(redacted["request"]["headers"][0]["X-Goog-Api-Key"], "***REDACTED***");
        assert_eq!(redacted["request"]["Authorization"], "***REDACTED***");
        assert_eq!(redacted["request"]["model"], "gemini-2.5-flash");
    }

    #[test]
    fn test_noop_logger_accepts_everything() {
        let logger = NoopLogger;
        logger.error("ignored", json!({"api_key": "x"}));
    }
}
