//! Unified error handling for `llm-service`.
//!
//! One top-level [`AiLlmError`] for the whole crate, with provider failures
//! grouped in [`ProviderError`]. Transport problems surface as
//! `HttpTransport`; everything else (bad config, non-2xx status, undecodable
//! payload, empty choices) is a provider error with a concrete kind.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Provider-level failure (config, status, decode, empty choices).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (`reqwest::Error`).
    #[error("[LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/// Which provider produced the error.
#[derive(Debug, Clone, Copy)]
pub enum Provider {
    OpenAI,
}

/// Provider error with its origin attached.
#[derive(Debug, Error)]
#[error("[LLM Service] {provider:?}: {kind}")]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/// Concrete provider failure kinds.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// The config names a different provider than this service implements.
    #[error("invalid provider for this service")]
    InvalidProvider,

    /// The config has no API key.
    #[error("missing API key")]
    MissingApiKey,

    /// Endpoint is empty or does not start with http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("{0}")]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// Completion response contained no usable choices.
    #[error("no choices in completion response")]
    EmptyChoices,
}

/// Details of a non-2xx HTTP response.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Trims a response body to a short, single-line snippet for logs and errors.
pub fn make_snippet(text: &str) -> String {
    let one_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut snippet: String = one_line.chars().take(300).collect();
    if one_line.chars().count() > 300 {
        snippet.push('…');
    }
    snippet
}
