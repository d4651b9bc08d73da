//! Client trait definitions for Gemini API.

use crate::services::ContentService;

/// Main client for interacting with Google Gemini API.
pub trait GeminiClient: Send + Sync {
    /// Access the content generation service.
    fn content(&self) -> &dyn ContentService;
}
