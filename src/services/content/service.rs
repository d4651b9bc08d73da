//! Content service implementation.

use std::sync::Arc;
use std::time::Instant;
use async_trait::async_trait;
use serde_json::json;
use tracing::Instrument;

use super::ContentService;
use super::validation::{validate_generate_request, validate_model_name};
use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::{ContentError, GeminiError, SafetyRatingInfo};
use crate::observability::Logger;
use crate::transport::{HttpTransport, HttpMethod, RequestBuilder, ResponseParser, endpoints};
use crate::types::{BlockReason, FinishReason, GenerateContentRequest, GenerateContentResponse, SafetyRating};

/// Implementation of the ContentService.
pub struct ContentServiceImpl {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Arc<dyn Logger>,
}

impl ContentServiceImpl {
    /// Create a new content service implementation.
    pub fn new(
        config: &GeminiConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: &dyn AuthManager,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager.clone_box(),
        );

        Self {
            transport,
            request_builder,
            logger,
        }
    }

    /// Rejects responses whose prompt or first blocking candidate was filtered.
    fn check_safety_blocks(response: &GenerateContentResponse) -> Result<(), GeminiError> {
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(block_reason) = &feedback.block_reason {
                let ratings = rating_infos(feedback.safety_ratings.as_deref());
                return Err(match block_reason {
                    BlockReason::Safety => GeminiError::Content(ContentError::SafetyBlocked {
                        reason: primary_reason(&ratings, "prompt"),
                        safety_ratings: ratings,
                    }),
                    other => GeminiError::Content(ContentError::ProhibitedContent {
                        reason: format!("prompt blocked: {other:?}"),
                    }),
                });
            }
        }

        let Some(candidate) = response.first_candidate() else {
            return Ok(());
        };

        // A blocked candidate that still produced text is reported as a success.
        if candidate.text().is_some() {
            return Ok(());
        }

        match &candidate.finish_reason {
            Some(FinishReason::Safety) => {
                let ratings = rating_infos(candidate.safety_ratings.as_deref());
                Err(GeminiError::Content(ContentError::SafetyBlocked {
                    reason: primary_reason(&ratings, "candidate"),
                    safety_ratings: ratings,
                }))
            }
            Some(FinishReason::Recitation) => Err(GeminiError::Content(ContentError::RecitationBlocked)),
            Some(reason) if reason.is_blocked() => Err(GeminiError::Content(ContentError::ProhibitedContent {
                reason: format!("{reason:?}"),
            })),
            _ => Ok(()),
        }
    }

    async fn execute(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let start = Instant::now();

        self.logger.debug("Starting content generation", json!({
            "model": model,
            "contents_count": request.contents.len(),
        }));

        validate_model_name(model)?;
        validate_generate_request(&request)?;

        let path = endpoints::generate_content(model);
        let http_request = self.request_builder.build_request(
            HttpMethod::Post,
            &path,
            Some(&request),
            None,
        )?;

        let http_response = self.transport
            .send(http_request)
            .await
            .map_err(|e| {
                let error = GeminiError::from(e);
                self.logger.error("Transport error during content generation", json!({
                    "error": error.to_string(),
                    "model": model,
                }));
                error
            })?;

        let status = http_response.status;
        let response: GenerateContentResponse = ResponseParser::parse_response(http_response)
            .inspect_err(|e| {
                self.logger.warn("Content generation failed", json!({
                    "error": e.to_string(),
                    "category": e.category(),
                    "status": status,
                    "model": model,
                }));
            })?;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if let Err(e) = Self::check_safety_blocks(&response) {
            self.logger.warn("Content generation blocked", json!({
                "error": e.to_string(),
                "model": model,
                "duration_ms": duration_ms,
            }));
            return Err(e);
        }

        let usage = response.usage_metadata.clone().unwrap_or_default();
        self.logger.info("Content generation completed", json!({
            "model": model,
            "model_version": response.model_version,
            "duration_ms": duration_ms,
            "prompt_tokens": usage.prompt_token_count,
            "completion_tokens": usage.candidates_token_count.unwrap_or(0),
            "thoughts_tokens": usage.thoughts_token_count.unwrap_or(0),
            "total_tokens": usage.total_token_count,
            "candidates": response.candidates.as_ref().map_or(0, Vec::len),
        }));

        Ok(response)
    }
}

fn rating_infos(ratings: Option<&[SafetyRating]>) -> Vec<SafetyRatingInfo> {
    ratings
        .unwrap_or_default()
        .iter()
        .map(|r| SafetyRatingInfo {
            category: format!("{:?}", r.category),
            probability: format!("{:?}", r.probability),
        })
        .collect()
}

fn primary_reason(ratings: &[SafetyRatingInfo], subject: &str) -> String {
    ratings.first().map_or_else(
        || format!("{subject} (unspecified)"),
        |r| format!("{subject}: {} ({})", r.category, r.probability),
    )
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let span = tracing::info_span!("gemini.content.generate", model = %model);
        self.execute(model, request).instrument(span).await
    }
}
