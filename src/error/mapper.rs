//! Error mapping for HTTP status codes and Google API error bodies.

use serde::Deserialize;
use super::categories::*;
use super::types::GeminiError;

/// Structured API error response from Gemini.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The error payload.
    pub error: ApiErrorDetail,
}

/// Detailed error information from API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// HTTP status echoed in the body.
    #[serde(default)]
    pub code: i32,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// gRPC status name, e.g. `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: String,
    /// Typed detail entries (`ErrorInfo`, `BadRequest`, ...).
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ApiErrorDetail {
    /// `reason` values of every `google.rpc.ErrorInfo` entry in `details`.
    fn reasons(&self) -> impl Iterator<Item = &str> {
        self.details
            .iter()
            .filter_map(|d| d.get("reason").and_then(|r| r.as_str()))
    }

    fn has_reason(&self, reason: &str) -> bool {
        self.reasons().any(|r| r == reason)
    }
}

/// Maps an HTTP status and response body to a `GeminiError`.
///
/// The body is parsed as a Google API error envelope when possible; otherwise
/// the raw text becomes the message.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> GeminiError {
    let parsed = serde_json::from_slice::<ApiErrorResponse>(body).ok().map(|r| r.error);

    let message = match &parsed {
        Some(detail) if !detail.message.is_empty() => detail.message.clone(),
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text
            }
        }
    };

    let lower = message.to_lowercase();
    let grpc_status = parsed.as_ref().map(|d| d.status.as_str()).unwrap_or_default();

    match status {
        400 => {
            // Gemini reports a rejected key as INVALID_ARGUMENT, not 401.
            let key_rejected = parsed.as_ref().is_some_and(|d| d.has_reason("API_KEY_INVALID"))
                || lower.contains("api key not valid");

            if key_rejected {
                GeminiError::Authentication(AuthenticationError::InvalidApiKey { message })
            } else if lower.contains("model") && lower.contains("not found") {
                GeminiError::Request(RequestError::InvalidModel {
                    model: extract_model_name(&message),
                })
            } else {
                let details = parsed
                    .as_ref()
                    .map(|d| parse_validation_details(&d.details))
                    .unwrap_or_default();
                GeminiError::Request(RequestError::ValidationError { message, details })
            }
        }

        401 => GeminiError::Authentication(AuthenticationError::InvalidApiKey { message }),

        403 => {
            if lower.contains("quota") {
                GeminiError::RateLimit(RateLimitError::QuotaExceeded {
                    message,
                    retry_after: None,
                })
            } else {
                GeminiError::Authentication(AuthenticationError::PermissionDenied { message })
            }
        }

        404 => GeminiError::Request(RequestError::InvalidModel {
            model: extract_model_name(&message),
        }),

        413 => GeminiError::Request(RequestError::PayloadTooLarge { message }),

        429 => {
            if grpc_status == "RESOURCE_EXHAUSTED" && lower.contains("quota") {
                GeminiError::RateLimit(RateLimitError::QuotaExceeded {
                    message,
                    retry_after: None,
                })
            } else {
                GeminiError::RateLimit(RateLimitError::TooManyRequests { retry_after: None })
            }
        }

        500 => GeminiError::Server(ServerError::InternalError { message }),

        502..=504 => GeminiError::Server(ServerError::ServiceUnavailable {
            message,
            retry_after: None,
        }),

        _ => GeminiError::Server(ServerError::UnexpectedStatus { status, message }),
    }
}

/// Maps a status with a plain-text message.
pub fn map_http_status(status: u16, message: &str) -> GeminiError {
    map_http_status_with_body(status, message.as_bytes())
}

/// Pulls the model id out of a "models/xyz is not found ..." style message.
fn extract_model_name(message: &str) -> String {
    if let Some(found) = message.split_whitespace().find(|s| s.starts_with("models/")) {
        return found
            .trim_start_matches("models/")
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_' && c != '.')
            .to_string();
    }

    for quote in ['\'', '"', '`'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Collects `fieldViolations` from `google.rpc.BadRequest` entries.
fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    details
        .iter()
        .filter_map(|d| d.get("fieldViolations").and_then(|v| v.as_array()))
        .flatten()
        .filter_map(|violation| {
            let description = violation.get("description").and_then(|v| v.as_str())?;
            let field = violation
                .get("field")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            Some(ValidationDetail {
                field: field.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}
