//! Client interface for the Gemini API.
//!
//! Provides `GeminiClientImpl` with a builder and a lazily created content
//! service.

mod builder;
mod client;
mod traits;

pub use builder::GeminiClientBuilder;
pub use client::GeminiClientImpl;
pub use traits::GeminiClient;
