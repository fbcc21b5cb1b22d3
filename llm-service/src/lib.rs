//! Thin LLM client crate.
//!
//! Provides a minimal, non-streaming OpenAI chat-completion client with a
//! unified error type. The caller owns prompt assembly and any degradation
//! policy; this crate only performs the HTTP call and normalizes failures.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, Provider, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::OpenAiService;
