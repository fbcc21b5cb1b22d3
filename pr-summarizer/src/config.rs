//! Fixed knobs for one summarization run.
//!
//! These are compile-time constants rather than environment switches: the
//! caps bound API spend per run, the prompt budget is a cheap character-based
//! proxy for the model's token limit.

/// Maximum characters in a user prompt before it is rejected as too large.
pub const MAX_PROMPT_CHARS: usize = 20_000;

/// Completion model identifier.
pub const MODEL_NAME: &str = "gpt-4o-mini";

/// Sampling temperature for summaries.
pub const TEMPERATURE: f32 = 0.5;

/// Maximum tokens the model may produce per summary.
pub const MAX_OUTPUT_TOKENS: u32 = 512;

/// Cap on newly generated file summaries per run.
pub const MAX_FILES_PER_RUN: usize = 20;

/// Cap on newly summarized commits per run.
pub const MAX_COMMITS_PER_RUN: usize = 20;

/// Sentinel blob id for files absent from the base tree (newly added).
pub const NONE_SHA: &str = "None";

/// Web origin used for blob links embedded in comments.
pub const GITHUB_WEB_URL: &str = "https://github.com";
