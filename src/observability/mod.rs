//! Observability for the Gemini client.
//!
//! Structured logging goes through the [`Logger`] trait so services can be
//! handed a silent logger in tests. [`init_tracing`] installs the process-wide
//! subscriber used by the binary.
//!
//! ```rust
//! use gemini_prompt::observability::{Logger, StructuredLogger};
//! use gemini_prompt::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("gemini.content").with_level(LogLevel::Debug);
//!
//! logger.info("Starting content generation", json!({
//!     "model": "gemini-2.5-flash",
//!     "api_key": "never printed"
//! }));
//! ```

pub mod logging;
pub mod subscriber;

pub use logging::{Logger, NoopLogger, StructuredLogger};
pub use subscriber::{init_tracing, DEFAULT_LOG_FILTER};
