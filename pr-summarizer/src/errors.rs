//! Crate-wide error hierarchy for pr-summarizer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Host-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - No dynamic dispatch, ergonomic `?` via `From` impls.
//!
//! Model-call failures (`PromptTooLarge`, `Completion`) are caught at the
//! call site and turned into fixed error strings; they never abort a run.
//! Host failures and `MissingFileList` do propagate.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type SummaryResult<T> = Result<T, Error>;

/// Root error type for the pr-summarizer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Hosting API (GitHub) related failure.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Assembled prompt exceeds the character budget; never sent.
    #[error("prompt too large: {len} chars (budget {max})")]
    PromptTooLarge { len: usize, max: usize },

    /// Completion API failure (network, decode, empty choices).
    #[error(transparent)]
    Completion(#[from] llm_service::AiLlmError),

    /// Hosting API returned no file list for a commit; nothing downstream
    /// can diff that commit against its parent.
    #[error("no file list for commit {0}")]
    MissingFileList(String),

    /// Input validation errors (bad repo slug, bad PR number, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Detailed hosting-API error used inside the host layer.
#[derive(Debug, Error)]
pub enum HostError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of hosting-API response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Host(HostError::from(e))
    }
}

impl From<reqwest::Error> for HostError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return HostError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => HostError::Unauthorized,
                403 => HostError::Forbidden,
                404 => HostError::NotFound,
                429 => HostError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => HostError::Server(code),
                _ => HostError::HttpStatus(code),
            };
        }
        HostError::Network(e.to_string())
    }
}
