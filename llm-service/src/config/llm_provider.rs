/// Backend used for large language model inference.
///
/// Only OpenAI-compatible chat completions are supported today; adding a
/// provider means extending this enum and supplying a matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI chat-completion API (`/v1/chat/completions`).
    OpenAI,
}
