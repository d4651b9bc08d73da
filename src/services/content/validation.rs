//! Validation for content generation requests.

use crate::error::{GeminiError, GeminiResult, RequestError, ValidationDetail};
use crate::types::GenerateContentRequest;

/// Validate a model identifier before it is put into a URL path.
///
/// Accepts bare ids (`gemini-2.5-flash`); the `models/` prefix must already be
/// stripped.
pub fn validate_model_name(model: &str) -> GeminiResult<()> {
    let valid = !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(GeminiError::Request(RequestError::InvalidModel {
            model: model.to_string(),
        }))
    }
}

/// Validate a generate content request.
///
/// Empty prompt text is allowed; the service decides what to do with it.
pub fn validate_generate_request(request: &GenerateContentRequest) -> GeminiResult<()> {
    let mut details = Vec::new();

    if request.contents.is_empty() {
        details.push(ValidationDetail {
            field: "contents".to_string(),
            description: "Contents array cannot be empty".to_string(),
        });
    }

    for (idx, content) in request.contents.iter().enumerate() {
        if content.parts.is_empty() {
            details.push(ValidationDetail {
                field: format!("contents[{idx}].parts"),
                description: "Content must have at least one part".to_string(),
            });
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(GeminiError::Request(RequestError::ValidationError {
            message: "Invalid generate content request".to_string(),
            details,
        }))
    }
}
