//! Configuration types for the Gemini client.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;
use crate::error::{GeminiError, ConfigurationError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Authentication method for API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use ?key= query parameter.
    QueryParam,
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Checks that an API key can be sent as-is.
///
/// Blank keys are missing. Keys with ASCII control characters (a trailing
/// `\r` from a CRLF `.env`, for one) are malformed: they cannot travel in a
/// header and are never trimmed into something else.
pub fn validate_api_key(value: &str) -> Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::MissingApiKey);
    }
    if value.chars().any(|c| c.is_ascii_control()) {
        return Err(ConfigurationError::MalformedApiKey);
    }
    Ok(())
}

/// Reads the first non-blank API key from the environment.
///
/// Blank values are skipped so an exported-but-empty `GEMINI_API_KEY` still
/// falls through to `GOOGLE_API_KEY`. A malformed key is an error, not a
/// reason to fall through.
pub fn api_key_from_env() -> Result<SecretString, ConfigurationError> {
    let value = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .ok_or(ConfigurationError::MissingApiKey)?;
    validate_api_key(&value)?;
    Ok(SecretString::new(value))
}

/// Configuration for the Gemini client.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Default timeout for requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Log level.
    pub log_level: LogLevel,
    /// Authentication method.
    pub auth_method: AuthMethod,
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `GEMINI_API_KEY` or `GOOGLE_API_KEY` (required)
    /// - `GEMINI_BASE_URL` (optional)
    /// - `GEMINI_API_VERSION` (optional)
    /// - `GEMINI_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = api_key_from_env()?;
        Self::builder_from_env()?.api_key(api_key).build()
    }

    /// Builder pre-filled with the optional `GEMINI_*` overrides, without an API key.
    pub fn builder_from_env() -> Result<GeminiConfigBuilder, GeminiError> {
        let mut builder = Self::builder();

        if let Some(base_url) = non_empty_var("GEMINI_BASE_URL") {
            builder = builder.base_url(&base_url)?;
        }

        if let Some(api_version) = non_empty_var("GEMINI_API_VERSION") {
            builder = builder.api_version(&api_version);
        }

        if let Some(raw) = non_empty_var("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigurationError::InvalidEnvironmentValue {
                    variable: "GEMINI_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                }
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("auth_method", &self.auth_method)
            .finish_non_exhaustive()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for GeminiConfig.
#[derive(Clone, Default)]
pub struct GeminiConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    auth_method: Option<AuthMethod>,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, GeminiError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set an already parsed base URL.
    pub fn base_url_parsed(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Build the configuration.
    ///
    /// Fails with `MissingApiKey` when no key was given or the key is blank,
    /// and with `MalformedApiKey` when it holds control characters.
    pub fn build(self) -> Result<GeminiConfig, GeminiError> {
        let api_key = self.api_key.ok_or(ConfigurationError::MissingApiKey)?;
        validate_api_key(api_key.expose_secret())?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        if base_url.cannot_be_a_base() {
            return Err(ConfigurationError::InvalidBaseUrl {
                url: base_url.to_string(),
            }
            .into());
        }

        Ok(GeminiConfig {
            api_key,
            base_url,
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            log_level: self.log_level.unwrap_or_default(),
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}
