//! Builder for creating Gemini client instances.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::auth::{ApiKeyAuthManager, AuthManager};
use crate::config::{AuthMethod, GeminiConfig, GeminiConfigBuilder, LogLevel};
use crate::error::GeminiError;
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{HttpTransport, ReqwestTransport};

use super::client::GeminiClientImpl;

/// Builder for creating a [`GeminiClientImpl`].
///
/// The API key must be supplied explicitly; the builder never reads the
/// environment on its own.
///
/// # Example
///
/// ```no_run
/// use gemini_prompt::GeminiClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: GeminiConfigBuilder,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl GeminiClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a partially configured config builder.
    pub fn from_config_builder(config: GeminiConfigBuilder) -> Self {
        Self {
            config,
            transport: None,
            logger: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: GeminiConfig) -> Self {
        let builder = GeminiConfig::builder()
            .api_key(config.api_key)
            .base_url_parsed(config.base_url)
            .api_version(&config.api_version)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .log_level(config.log_level)
            .auth_method(config.auth_method);

        Self::from_config_builder(builder)
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.config = self.config.api_key(key);
        self
    }

    /// Sets the base URL for the API.
    pub fn base_url(mut self, url: Url) -> Self {
        self.config = self.config.base_url_parsed(url);
        self
    }

    /// Sets the base URL from a string.
    pub fn base_url_str(mut self, url: &str) -> Result<Self, GeminiError> {
        self.config = self.config.base_url(url)?;
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.config = self.config.api_version(version);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config = self.config.timeout(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config = self.config.connect_timeout(duration);
        self
    }

    /// Sets the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.config = self.config.auth_method(method);
        self
    }

    /// Sets the level below which the default logger drops events.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config = self.config.log_level(level);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger (for testing).
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the API key is missing or blank
    /// - the base URL cannot carry a path
    /// - the HTTP transport cannot be created
    pub fn build(self) -> Result<GeminiClientImpl, GeminiError> {
        let config = self.config.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(config.timeout, config.connect_timeout)?),
        };

        let auth_manager: Arc<dyn AuthManager> = Arc::new(ApiKeyAuthManager::from_config(&config));

        let logger: Arc<dyn Logger> = self.logger.unwrap_or_else(|| {
            Arc::new(StructuredLogger::new("gemini").with_level(config.log_level))
        });

        logger.debug(
            "Gemini client initialized",
            serde_json::json!({
                "base_url": config.base_url.as_str(),
                "api_version": config.api_version,
                "auth_method": format!("{:?}", config.auth_method),
            }),
        );

        Ok(GeminiClientImpl::from_parts(config, transport, auth_manager, logger))
    }
}
