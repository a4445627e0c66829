//! In-memory provider used by dispatcher and route tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::completion::{
    ChatCompletion, CompletionError, CompletionProvider, CompletionRequest, CompletionResult,
};
use crate::optimizer::MARKDOWN_TEMPLATE;

type Reply = Box<dyn Fn(&CompletionRequest) -> CompletionResult<ChatCompletion> + Send + Sync>;

/// Records every request and answers through a closure.
pub(crate) struct MockProvider {
    calls: Mutex<Vec<CompletionRequest>>,
    reply: Reply,
    barrier: Option<Barrier>,
}

impl MockProvider {
    pub(crate) fn new<F>(reply: F) -> Self
    where
        F: Fn(&CompletionRequest) -> CompletionResult<ChatCompletion> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Box::new(reply),
            barrier: None,
        }
    }

    /// Answers `"<format>:<prompt>"`, where format follows the system template.
    pub(crate) fn tagged() -> Self {
        Self::new(|request| Ok(ChatCompletion::from_text(tag_reply(request))))
    }

    /// Fails every call whose system message is `template`, tags the rest.
    pub(crate) fn failing_on(template: &'static str) -> Self {
        Self::new(move |request| {
            if request.system_content() == Some(template) {
                Err(CompletionError::Status {
                    status: 429,
                    body: "rate limited".to_string(),
                })
            } else {
                Ok(ChatCompletion::from_text(tag_reply(request)))
            }
        })
    }

    /// Returns a completion with no choices.
    pub(crate) fn empty() -> Self {
        Self::new(|_| Ok(ChatCompletion::default()))
    }

    /// Every call waits until `parties` calls are in flight at once.
    pub(crate) fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Barrier::new(parties));
        self
    }

    pub(crate) fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

fn tag_reply(request: &CompletionRequest) -> String {
    let tag = if request.system_content() == Some(MARKDOWN_TEMPLATE) {
        "markdown"
    } else {
        "xml"
    };
    format!("{tag}:{}", request.user_content().unwrap_or_default())
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<ChatCompletion> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        (self.reply)(request)
    }
}
