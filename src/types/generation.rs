//! Request and response types for content generation.

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::safety::SafetyRating;

/// The reason why content generation finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stop point.
    Stop,
    /// Maximum token limit reached.
    MaxTokens,
    /// Safety threshold triggered.
    Safety,
    /// Content recitation detected.
    Recitation,
    /// Other reason.
    Other,
    /// Content on blocklist.
    Blocklist,
    /// Prohibited content detected.
    ProhibitedContent,
    /// Sensitive personally identifiable information detected.
    Spii,
    /// Any reason this client does not know about.
    #[serde(other)]
    FinishReasonUnspecified,
}

impl FinishReason {
    /// True when the candidate was cut off by a safety or policy filter.
    pub fn is_blocked(&self) -> bool {
        matches!(
            self,
            FinishReason::Safety
                | FinishReason::Recitation
                | FinishReason::Blocklist
                | FinishReason::ProhibitedContent
                | FinishReason::Spii
        )
    }
}

/// Metadata about token usage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: i32,
    /// Number of tokens in the candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<i32>,
    /// Number of tokens spent on thinking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thoughts_token_count: Option<i32>,
    /// Total number of tokens.
    #[serde(default)]
    pub total_token_count: i32,
}

/// A candidate response from the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate. Absent when the candidate was blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// The reason generation finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Safety ratings for the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
    /// The index of this candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl Candidate {
    /// Concatenated answer text of this candidate, skipping thought parts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.content.as_ref()?.parts;
        let mut texts = parts.iter().filter_map(super::Part::answer_text).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

/// Request to generate content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The content to send to the model.
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A request holding one user turn with the given prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
        }
    }
}

/// Feedback on why the prompt was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// The reason the prompt was blocked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
    /// Safety ratings for the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
}

/// Reason why the prompt was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// Blocked due to safety.
    Safety,
    /// Blocked due to other reasons.
    Other,
    /// Blocked due to terms on the blocklist.
    Blocklist,
    /// Blocked due to prohibited content.
    ProhibitedContent,
    /// Unspecified or unknown block reason.
    #[serde(other)]
    BlockReasonUnspecified,
}

/// Response from content generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// The candidate responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback about the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Usage metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// The version of the model used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// The first candidate, if any.
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }

    /// Answer text of the first candidate.
    pub fn text(&self) -> Option<String> {
        self.first_candidate().and_then(Candidate::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = GenerateContentRequest::from_prompt("Explain Rust ownership");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"contents": [{"role": "user", "parts": [{"text": "Explain Rust ownership"}]}]})
        );
    }

    #[test]
    fn test_response_text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "plan the answer", "thought": true},
                        {"text": "Hello, "},
                        {"text": "world."}
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 4, "thoughtsTokenCount": 9, "totalTokenCount": 16},
            "modelVersion": "gemini-2.5-flash"
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Hello, world."));
        assert_eq!(response.usage_metadata.unwrap().thoughts_token_count, Some(9));
    }

    #[test]
    fn test_response_without_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();

        assert_eq!(response.text(), None);
        assert!(response.first_candidate().unwrap().finish_reason.as_ref().unwrap().is_blocked());
    }

    #[test]
    fn test_unknown_finish_reason_tolerated() {
        let candidate: Candidate = serde_json::from_value(json!({
            "content": {"parts": [{"text": "ok"}]},
            "finishReason": "MALFORMED_FUNCTION_CALL"
        }))
        .unwrap();

        assert_eq!(candidate.finish_reason, Some(FinishReason::FinishReasonUnspecified));
        assert_eq!(candidate.text().as_deref(), Some("ok"));
    }
}
