//! The API credential handed to the generator factory.

use secrecy::{ExposeSecret, SecretString};

use crate::config::{api_key_from_env, validate_api_key};
use crate::error::GeminiResult;

/// Opaque API credential.
///
/// Never empty. The value is only exposed to the auth layer and never
/// appears in `Debug` output.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wraps a credential value verbatim.
    ///
    /// Empty or whitespace-only input is `MissingApiKey`; input with control
    /// characters is `MalformedApiKey`.
    pub fn new(value: impl Into<String>) -> GeminiResult<Self> {
        let value = value.into();
        validate_api_key(&value)?;
        Ok(Self(SecretString::new(value)))
    }

    /// Reads `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
    pub fn from_env() -> GeminiResult<Self> {
        Ok(Self(api_key_from_env()?))
    }

    /// The secret value.
    pub fn expose(&self) -> &SecretString {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
