//! Chat-completion provider seam and the OpenAI-compatible HTTP client.

pub mod completion;
pub mod openai;

pub use completion::{
    ChatChoice, ChatCompletion, ChatMessage, ChatRole, ChoiceMessage, CompletionError,
    CompletionProvider, CompletionRequest, CompletionResult,
};
pub use openai::OpenAiClient;

#[cfg(test)]
pub(crate) mod testing;
