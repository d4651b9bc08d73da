//! # gemini-prompt
//!
//! Single-shot text generation against the Google Gemini API.
//!
//! The [`RequestRunner`] obtains a [`TextGenerator`] bound to a
//! [`Credential`], submits one [`GenerationRequest`] and writes the reply
//! text to an output sink. The `gemini-prompt` binary wires it to the
//! environment and stdout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_prompt::{Credential, GeminiGeneratorFactory, GenerationRequest, RequestRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = RequestRunner::new(GeminiGeneratorFactory::from_env()?);
//!     let credential = Credential::from_env()?;
//!     let request = GenerationRequest::new("gemini-2.5-flash", "Explain Rust lifetimes")?;
//!
//!     let response = runner.run(&credential, &request).await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `runner` - credential, request/response, generator traits and the runner
//! - `client` - Gemini client with builder and lazily created services
//! - `config` - configuration types, builder and environment loading
//! - `auth` - API key authentication
//! - `transport` - HTTP transport, request building and response parsing
//! - `error` - error taxonomy and HTTP status mapping
//! - `types` - `generateContent` wire types
//! - `services` - content generation service
//! - `observability` - structured logging and subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod runner;
pub mod services;
pub mod transport;
pub mod types;

// Test doubles, available to integration tests and downstream crates
pub mod mocks;

pub use auth::{ApiKeyAuthManager, AuthManager};
pub use client::{GeminiClient, GeminiClientBuilder, GeminiClientImpl};
pub use config::{
    AuthMethod, GeminiConfig, GeminiConfigBuilder, LogLevel, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    map_http_status, map_http_status_with_body, AuthenticationError, ConfigurationError,
    ContentError, GeminiError, GeminiResult, NetworkError, RateLimitError, RequestError,
    ResponseError, ServerError, ValidationDetail,
};
pub use observability::{init_tracing, Logger, NoopLogger, StructuredLogger};
pub use runner::{
    Credential, GeminiGeneratorFactory, GenerationRequest, GenerationResponse, GeneratorFactory,
    RequestRunner, TextGenerator, DEFAULT_MODEL, DEFAULT_PROMPT,
};
pub use services::{ContentService, ContentServiceImpl};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBuilder, ResponseParser,
    ReqwestTransport, TransportError,
};
pub use types::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerateContentResponse, Part,
    Role, UsageMetadata,
};
