//! Sends one fixed prompt to Gemini and prints the reply.
//!
//! The API key comes from `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), optionally
//! via a `.env` file in the working directory. The reply goes to stdout;
//! logs and errors go to stderr. The exit code encodes the error category.

use std::io::Write;
use std::process::ExitCode;

use gemini_prompt::observability::{init_tracing, DEFAULT_LOG_FILTER};
use gemini_prompt::{Credential, GeminiError, GeminiGeneratorFactory, GenerationRequest, RequestRunner};

async fn run() -> Result<(), GeminiError> {
    let credential = Credential::from_env()?;
    let runner = RequestRunner::new(GeminiGeneratorFactory::from_env()?);

    let mut stdout = std::io::stdout().lock();
    runner
        .run_to(&credential, &GenerationRequest::default(), &mut stdout)
        .await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Variables already set in the environment win over `.env`.
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_LOG_FILTER);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(category = error.category(), "request failed");
            let _ = writeln!(std::io::stderr(), "gemini-prompt: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}
