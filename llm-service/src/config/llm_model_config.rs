use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// Carries both general parameters (model, endpoint) and sampling knobs.
/// Optional fields are omitted from the request body when unset.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gpt-4o-mini"`).
    pub model: String,

    /// API base URL (e.g., `"https://api.openai.com"`).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds (defaults to 60 when unset).
    pub timeout_secs: Option<u64>,
}
