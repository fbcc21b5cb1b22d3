//! Completion client adapter.
//!
//! Single attempt, no retry: summarization is best-effort and one item's
//! failure must never abort a run. The adapter enforces the prompt-size
//! budget *before* any network call and degrades every failure to a fixed,
//! recognizable error string.

use llm_service::{AiLlmError, LlmModelConfig, LlmProvider, OpenAiService};
use tracing::warn;

use crate::config::{MAX_OUTPUT_TOKENS, MAX_PROMPT_CHARS, MODEL_NAME, TEMPERATURE};
use crate::errors::{Error, SummaryResult};

/// Fixed text substituted when a per-file/per-commit summary cannot be
/// generated; posted verbatim so the failure is visible on the PR.
pub const SUMMARY_ERROR_TEXT: &str = "エラー: 要約を生成できませんでした";

/// Minimal seam over the completion API so tests can substitute a fake.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiLlmError>;
}

impl<T: CompletionBackend> CompletionBackend for &T {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiLlmError> {
        (**self).complete(system, user).await
    }
}

impl CompletionBackend for OpenAiService {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiLlmError> {
        self.generate(user, Some(system)).await
    }
}

/// Model config for the fixed summarization model.
pub fn openai_model_config(endpoint: String, api_key: String) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: MODEL_NAME.to_string(),
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(MAX_OUTPUT_TOKENS),
        temperature: Some(TEMPERATURE),
        top_p: None,
        timeout_secs: Some(60),
    }
}

/// Wraps a completion backend with the budget pre-check and the error-string
/// degradation policy.
#[derive(Debug)]
pub struct CompletionAdapter<C> {
    backend: C,
}

impl<C: CompletionBackend> CompletionAdapter<C> {
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    /// Fallible request: rejects oversized prompts before sending, forwards
    /// backend failures. Used where the caller needs to tell
    /// [`Error::PromptTooLarge`] apart from completion failures.
    pub async fn request(&self, system: &str, user: &str) -> SummaryResult<String> {
        if user.len() > MAX_PROMPT_CHARS {
            return Err(Error::PromptTooLarge {
                len: user.len(),
                max: MAX_PROMPT_CHARS,
            });
        }
        let text = self.backend.complete(system, user).await?;
        Ok(text)
    }

    /// Best-effort request: any failure yields [`SUMMARY_ERROR_TEXT`].
    pub async fn request_summary(&self, system: &str, user: &str) -> String {
        match self.request(system, user).await {
            Ok(text) => text,
            Err(e) => {
                warn!("summary completion failed: {e}");
                SUMMARY_ERROR_TEXT.to_string()
            }
        }
    }
}
