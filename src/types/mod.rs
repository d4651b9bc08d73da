//! Wire types for the Gemini `generateContent` endpoint.

pub mod content;
pub mod generation;
pub mod safety;

pub use content::{Content, Part, Role};

pub use generation::{
    BlockReason, Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse,
    PromptFeedback, UsageMetadata,
};

pub use safety::{HarmCategory, HarmProbability, SafetyRating};
