//! Generation request and response as seen by the runner.

use crate::error::{GeminiError, GeminiResult, ResponseError};
use crate::services::validate_model_name;
use crate::types::{FinishReason, GenerateContentResponse, UsageMetadata};

/// Model used by the `gemini-prompt` binary.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Prompt sent by the `gemini-prompt` binary.
pub const DEFAULT_PROMPT: &str = "Explain about Amrita Vishwa Vidyapeetham Mysore";

const MODEL_PREFIX: &str = "models/";

/// A model identifier plus prompt text, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    model: String,
    contents: String,
}

impl GenerationRequest {
    /// Builds a request, validating the model identifier.
    ///
    /// A leading `models/` is stripped. The prompt is passed through as-is,
    /// empty included.
    pub fn new(model: impl Into<String>, contents: impl Into<String>) -> GeminiResult<Self> {
        let model = model.into();
        let model = model.strip_prefix(MODEL_PREFIX).unwrap_or(&model).to_string();
        validate_model_name(&model)?;

        Ok(Self {
            model,
            contents: contents.into(),
        })
    }

    /// Model identifier without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Prompt text.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            contents: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// The model's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Answer text of the first candidate. Never empty.
    pub text: String,
    /// Model version reported by the service.
    pub model_version: Option<String>,
    /// Why the candidate stopped.
    pub finish_reason: Option<FinishReason>,
    /// Token accounting.
    pub usage: Option<UsageMetadata>,
}

impl TryFrom<GenerateContentResponse> for GenerationResponse {
    type Error = GeminiError;

    fn try_from(response: GenerateContentResponse) -> Result<Self, Self::Error> {
        let candidate = response
            .first_candidate()
            .ok_or(ResponseError::NoCandidates)?;

        let text = candidate
            .text()
            .filter(|text| !text.is_empty())
            .ok_or(ResponseError::EmptyText)?;

        Ok(Self {
            text,
            finish_reason: candidate.finish_reason.clone(),
            model_version: response.model_version,
            usage: response.usage_metadata,
        })
    }
}
