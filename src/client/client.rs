//! Main client implementation for Gemini API.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::GeminiError;
use crate::observability::Logger;
use crate::services::{ContentService, ContentServiceImpl};
use crate::transport::HttpTransport;

use super::builder::GeminiClientBuilder;
use super::traits::GeminiClient;

/// Implementation of the Gemini API client.
///
/// The content service is created on first access and reused afterwards.
///
/// # Example
///
/// ```no_run
/// use gemini_prompt::{GeminiClient, GeminiClientImpl, GenerateContentRequest};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClientImpl::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .build()?;
///
/// let response = client
///     .content()
///     .generate("gemini-2.5-flash", GenerateContentRequest::from_prompt("Hello"))
///     .await?;
/// println!("{}", response.text().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct GeminiClientImpl {
    config: GeminiConfig,
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    logger: Arc<dyn Logger>,

    content_service: OnceCell<ContentServiceImpl>,
}

impl GeminiClientImpl {
    /// Creates a new client builder.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Creates a client from a configuration object.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        GeminiClientBuilder::from_config(config).build()
    }

    pub(super) fn from_parts(
        config: GeminiConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config,
            transport,
            auth_manager,
            logger,
            content_service: OnceCell::new(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl GeminiClient for GeminiClientImpl {
    fn content(&self) -> &dyn ContentService {
        self.content_service.get_or_init(|| {
            ContentServiceImpl::new(
                &self.config,
                Arc::clone(&self.transport),
                self.auth_manager.as_ref(),
                Arc::clone(&self.logger),
            )
        })
    }
}

impl std::fmt::Debug for GeminiClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthMethod, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
    use crate::error::ConfigurationError;
    use secrecy::SecretString;
    use std::time::Duration;

    #[test]
    fn test_builder_requires_api_key() {
        let result = GeminiClientBuilder::new().build();

        assert!(matches!(
            result,
            Err(GeminiError::Configuration(ConfigurationError::MissingApiKey))
        ));
    }

    #[test]
    fn test_builder_rejects_blank_api_key() {
        let result = GeminiClientBuilder::new()
            .api_key(SecretString::new(" \t".into()))
            .build();

        assert!(matches!(
            result,
            Err(GeminiError::Configuration(ConfigurationError::MissingApiKey))
        ));
    }

    #[test]
    fn test_builder_custom_settings() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-api-key".into()))
            .api_version("v1")
            .timeout(Duration::from_secs(60))
            .auth_method(AuthMethod::QueryParam)
            .build()
            .unwrap();

        assert_eq!(client.config().api_version, "v1");
        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().auth_method, AuthMethod::QueryParam);
    }

    #[test]
    fn test_builder_from_config() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .api_version("v1")
            .build()
            .unwrap();

        let client = GeminiClientBuilder::from_config(config).build().unwrap();
        assert_eq!(client.config().api_version, "v1");
    }

    #[test]
    fn test_new_from_config() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let client = GeminiClientImpl::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_values() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert_eq!(client.config().base_url.as_str(), format!("{DEFAULT_BASE_URL}/"));
        assert_eq!(client.config().api_version, DEFAULT_API_VERSION);
        assert_eq!(client.config().timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(client.config().auth_method, AuthMethod::Header);
    }

    #[test]
    fn test_content_service_is_reused() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        let first = client.content() as *const dyn ContentService as *const ();
        let second = client.content() as *const dyn ContentService as *const ();
        assert_eq!(first, second);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("very-secret".into()))
            .build()
            .unwrap();

        assert!(!format!("{client:?}").contains("very-secret"));
    }
}
