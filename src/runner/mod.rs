//! Single-shot request runner.
//!
//! [`RequestRunner`] asks a [`GeneratorFactory`] for a generator bound to a
//! [`Credential`], submits one [`GenerationRequest`] and hands back the
//! reply, optionally writing its text to an output sink.

mod credential;
mod generator;
mod request;

use std::io::Write;
use std::sync::Arc;

use crate::error::GeminiResult;

pub use credential::Credential;
pub use generator::{GeminiGeneratorFactory, GeneratorFactory, TextGenerator};
pub use request::{GenerationRequest, GenerationResponse, DEFAULT_MODEL, DEFAULT_PROMPT};

/// Runs one generation request against a generator from `factory`.
///
/// # Example
///
/// ```no_run
/// use gemini_prompt::{Credential, GeminiGeneratorFactory, GenerationRequest, RequestRunner};
///
/// # async fn example() -> Result<(), gemini_prompt::GeminiError> {
/// let runner = RequestRunner::new(GeminiGeneratorFactory::from_env()?);
/// let credential = Credential::from_env()?;
/// let mut stdout = std::io::stdout();
/// runner.run_to(&credential, &GenerationRequest::default(), &mut stdout).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RequestRunner {
    factory: Arc<dyn GeneratorFactory>,
}

impl RequestRunner {
    /// Runner backed by the given factory.
    pub fn new(factory: impl GeneratorFactory + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Runner sharing an existing factory.
    pub fn from_shared(factory: Arc<dyn GeneratorFactory>) -> Self {
        Self { factory }
    }

    /// Submits `request` once and returns the reply. Never retries.
    pub async fn run(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> GeminiResult<GenerationResponse> {
        let generator = self.factory.connect(credential)?;

        tracing::debug!(model = request.model(), "submitting generation request");

        let response = generator.generate(request).await.inspect_err(|e| {
            tracing::debug!(category = e.category(), error = %e, "generation request failed");
        })?;

        tracing::debug!(
            model = request.model(),
            chars = response.text.len(),
            "generation request succeeded"
        );

        Ok(response)
    }

    /// As [`run`](Self::run), then writes the reply text and a newline to
    /// `out`. Nothing is written on failure.
    pub async fn run_to<W: Write + ?Sized>(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
        out: &mut W,
    ) -> GeminiResult<GenerationResponse> {
        let response = self.run(credential, request).await?;

        writeln!(out, "{}", response.text)?;
        out.flush()?;

        Ok(response)
    }
}

impl std::fmt::Debug for RequestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestRunner").finish_non_exhaustive()
    }
}
