//! Provider-agnostic chat-completion types.
//!
//! The dispatcher only talks to a [`CompletionProvider`]; the concrete client is
//! built once at startup and injected behind an `Arc<dyn CompletionProvider>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while invoking a completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        /// Status code returned by the upstream API.
        status: u16,
        /// Raw response body, kept for logging.
        body: String,
    },

    /// The upstream body was not a chat-completion document.
    #[error("failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenience result alias for provider calls.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Role of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model.
    System,
    /// End-user input.
    User,
}

/// One `{role, content}` entry of a completion request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A completion call: model identifier plus ordered messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier forwarded verbatim to the provider.
    pub model: String,
    /// Ordered conversation messages.
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build a `[system, user]` request.
    #[must_use]
    pub fn new(model: impl Into<String>, system: &str, user: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        }
    }

    /// Content of the system message, if any.
    #[must_use]
    pub fn system_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }

    /// Content of the user message, if any.
    #[must_use]
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Message payload of a returned choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text; upstream may send `null`.
    #[serde(default)]
    pub content: Option<String>,
}

/// A single returned choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatChoice {
    /// Choice message; absent on some malformed responses.
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Upstream chat-completion document, reduced to what we read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    /// Returned choices, possibly empty.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletion {
    /// Completion holding a single choice with `content`.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
            }],
        }
    }

    /// Text of the first choice, or an empty string when there is none.
    #[must_use]
    pub fn first_content(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone())
            .unwrap_or_default()
    }
}

/// Capability that turns a chat request into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<ChatCompletion>;
}
