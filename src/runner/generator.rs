//! The text generation collaborator and its Gemini-backed implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::client::{GeminiClient, GeminiClientBuilder, GeminiClientImpl};
use crate::config::{GeminiConfig, GeminiConfigBuilder};
use crate::error::GeminiResult;
use crate::observability::Logger;
use crate::transport::HttpTransport;
use crate::types::GenerateContentRequest;

use super::credential::Credential;
use super::request::{GenerationRequest, GenerationResponse};

/// Submits a model and prompt, returning the reply text or a typed failure.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends exactly one generation request.
    async fn generate(&self, request: &GenerationRequest) -> GeminiResult<GenerationResponse>;
}

/// Creates a [`TextGenerator`] bound to a credential.
pub trait GeneratorFactory: Send + Sync {
    /// Builds a generator. No network traffic happens here.
    fn connect(&self, credential: &Credential) -> GeminiResult<Arc<dyn TextGenerator>>;
}

#[async_trait]
impl TextGenerator for GeminiClientImpl {
    async fn generate(&self, request: &GenerationRequest) -> GeminiResult<GenerationResponse> {
        let wire = GenerateContentRequest::from_prompt(request.contents());
        let response = self.content().generate(request.model(), wire).await?;
        GenerationResponse::try_from(response)
    }
}

/// Factory producing [`GeminiClientImpl`] generators.
///
/// Holds every setting except the credential, which arrives per `connect`.
#[derive(Clone, Default)]
pub struct GeminiGeneratorFactory {
    settings: GeminiConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl GeminiGeneratorFactory {
    /// Factory with explicit client settings. Any API key in `settings` is
    /// replaced by the credential passed to `connect`.
    pub fn new(settings: GeminiConfigBuilder) -> Self {
        Self {
            settings,
            transport: None,
            logger: None,
        }
    }

    /// Factory configured from the optional `GEMINI_*` environment overrides.
    pub fn from_env() -> GeminiResult<Self> {
        Ok(Self::new(GeminiConfig::builder_from_env()?))
    }

    /// Use a custom HTTP transport for every generator.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom logger for every generator.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl GeneratorFactory for GeminiGeneratorFactory {
    fn connect(&self, credential: &Credential) -> GeminiResult<Arc<dyn TextGenerator>> {
        let settings = self.settings.clone().api_key(credential.expose().clone());
        let mut builder = GeminiClientBuilder::from_config_builder(settings);

        if let Some(transport) = &self.transport {
            builder = builder.transport(Arc::clone(transport));
        }
        if let Some(logger) = &self.logger {
            builder = builder.logger(Arc::clone(logger));
        }

        Ok(Arc::new(builder.build()?))
    }
}

impl std::fmt::Debug for GeminiGeneratorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGeneratorFactory")
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}
