//! Mode dispatch: one or two completion calls per request.

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm::{CompletionProvider, CompletionRequest, CompletionResult};

use super::error::{OptimizeError, OptimizeResult};
use super::mode::OutputMode;
use super::request::{OptimizeOutput, OptimizeRequest};
use super::templates::{MARKDOWN_TEMPLATE, XML_TEMPLATE};

/// Model used when the request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Check that the prompt has non-whitespace content.
///
/// The prompt is returned as sent; trimming only decides emptiness.
///
/// # Errors
/// Returns [`OptimizeError::MissingPrompt`] for empty or whitespace-only input.
pub fn validate_prompt(prompt: &str) -> OptimizeResult<&str> {
    if prompt.trim().is_empty() {
        return Err(OptimizeError::MissingPrompt);
    }
    Ok(prompt)
}

/// Turns optimize requests into templated completion calls.
#[derive(Clone)]
pub struct PromptDispatcher {
    provider: Arc<dyn CompletionProvider>,
    default_model: String,
}

impl PromptDispatcher {
    /// Create a dispatcher over an injected provider.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model used when requests omit one.
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Model used when requests omit one.
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Validate, resolve the mode and dispatch.
    ///
    /// # Errors
    /// Fails with [`OptimizeError::MissingPrompt`] before any upstream call when
    /// the prompt is blank, otherwise with whatever [`Self::dispatch`] returns.
    pub async fn optimize(&self, request: OptimizeRequest) -> OptimizeResult<OptimizeOutput> {
        let prompt = validate_prompt(&request.prompt)?;
        let mode = OutputMode::resolve(request.mode.as_deref());
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        self.dispatch(mode, model, prompt).await
    }

    /// Invoke exactly the templates `mode` calls for.
    ///
    /// `Both` runs the two completions as separate tasks and waits for both;
    /// if either fails the whole dispatch fails.
    ///
    /// # Errors
    /// Returns an error if any completion call fails or its task panics.
    pub async fn dispatch(
        &self,
        mode: OutputMode,
        model: &str,
        prompt: &str,
    ) -> OptimizeResult<OptimizeOutput> {
        info!(%mode, model, prompt_chars = prompt.chars().count(), "Dispatching prompt");

        match mode {
            OutputMode::Markdown => {
                let markdown = self.optimize_once(model, MARKDOWN_TEMPLATE, prompt).await?;
                Ok(OptimizeOutput::markdown(markdown))
            }
            OutputMode::Xml => {
                let xml = self.optimize_once(model, XML_TEMPLATE, prompt).await?;
                Ok(OptimizeOutput::xml(xml))
            }
            OutputMode::Both => {
                let markdown = self.spawn_once(model, MARKDOWN_TEMPLATE, prompt);
                let xml = self.spawn_once(model, XML_TEMPLATE, prompt);
                let (markdown, xml) = tokio::join!(markdown, xml);
                Ok(OptimizeOutput::both(markdown??, xml??))
            }
        }
    }

    /// Run one completion with `template` as system content.
    ///
    /// # Errors
    /// Returns an error if the provider call fails.
    pub async fn optimize_once(
        &self,
        model: &str,
        template: &str,
        prompt: &str,
    ) -> OptimizeResult<String> {
        let request = CompletionRequest::new(model, template, prompt);
        Ok(complete_text(self.provider.as_ref(), &request).await?)
    }

    fn spawn_once(
        &self,
        model: &str,
        template: &'static str,
        prompt: &str,
    ) -> tokio::task::JoinHandle<CompletionResult<String>> {
        let provider = Arc::clone(&self.provider);
        let request = CompletionRequest::new(model, template, prompt);
        tokio::spawn(async move { complete_text(provider.as_ref(), &request).await })
    }
}

async fn complete_text(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
) -> CompletionResult<String> {
    let completion = provider.complete(request).await?;
    if completion.choices.is_empty() {
        debug!(model = %request.model, "Completion returned no choices");
    }
    Ok(completion.first_content())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::llm::testing::MockProvider;

    fn dispatcher(provider: &Arc<MockProvider>) -> PromptDispatcher {
        PromptDispatcher::new(Arc::clone(provider) as Arc<dyn CompletionProvider>)
    }

    #[test]
    fn test_validate_prompt() {
        assert!(matches!(validate_prompt(""), Err(OptimizeError::MissingPrompt)));
        assert!(matches!(
            validate_prompt(" \n\t "),
            Err(OptimizeError::MissingPrompt)
        ));
        assert_eq!(validate_prompt("  keep me  ").unwrap(), "  keep me  ");
    }

    #[tokio::test]
    async fn test_markdown_single_call() {
        let provider = Arc::new(MockProvider::tagged());
        let output = dispatcher(&provider)
            .optimize(OptimizeRequest::new("reverse a string"))
            .await
            .unwrap();

        assert_eq!(output, OptimizeOutput::markdown("markdown:reverse a string".into()));
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, DEFAULT_MODEL);
        assert_eq!(calls[0].system_content(), Some(MARKDOWN_TEMPLATE));
        assert_eq!(calls[0].user_content(), Some("reverse a string"));
    }

    #[tokio::test]
    async fn test_xml_single_call() {
        let provider = Arc::new(MockProvider::tagged());
        let output = dispatcher(&provider)
            .optimize(OptimizeRequest::new("p").with_mode("XML").with_model("gpt-4o-mini"))
            .await
            .unwrap();

        assert_eq!(output, OptimizeOutput::xml("xml:p".into()));
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-4o-mini");
        assert_eq!(calls[0].system_content(), Some(XML_TEMPLATE));
    }

    #[tokio::test]
    async fn test_unknown_mode_behaves_as_markdown() {
        let provider = Arc::new(MockProvider::tagged());
        let output = dispatcher(&provider)
            .optimize(OptimizeRequest::new("p").with_mode("yaml"))
            .await
            .unwrap();

        assert_eq!(output, OptimizeOutput::markdown("markdown:p".into()));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_both_runs_concurrently() {
        // Each call blocks until two are in flight, so a sequential dispatch would hang.
        let provider = Arc::new(MockProvider::tagged().with_barrier(2));
        let request = OptimizeRequest::new("Write a function to reverse a string")
            .with_mode("both")
            .with_model("gpt-4o");

        let output = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher(&provider).optimize(request),
        )
        .await
        .expect("both completions should overlap")
        .unwrap();

        assert_eq!(
            output,
            OptimizeOutput::both(
                "markdown:Write a function to reverse a string".into(),
                "xml:Write a function to reverse a string".into(),
            )
        );

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.model == "gpt-4o"));
        assert!(calls
            .iter()
            .all(|c| c.user_content() == Some("Write a function to reverse a string")));
        let mut systems: Vec<&str> = calls.iter().filter_map(|c| c.system_content()).collect();
        systems.sort_unstable();
        let mut expected = vec![MARKDOWN_TEMPLATE, XML_TEMPLATE];
        expected.sort_unstable();
        assert_eq!(systems, expected);
    }

    #[tokio::test]
    async fn test_both_fails_when_one_side_fails() {
        let provider = Arc::new(MockProvider::failing_on(XML_TEMPLATE));
        let err = dispatcher(&provider)
            .optimize(OptimizeRequest::new("p").with_mode("both"))
            .await
            .unwrap_err();

        assert!(matches!(err, OptimizeError::Completion(_)));
        assert!(!err.is_client_error());
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_prompt_skips_provider() {
        let provider = Arc::new(MockProvider::tagged());
        let err = dispatcher(&provider)
            .optimize(OptimizeRequest::new("   ").with_mode("both"))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Missing 'prompt' in request body.");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_completion_yields_empty_string() {
        let provider = Arc::new(MockProvider::empty());
        let output = dispatcher(&provider)
            .optimize(OptimizeRequest::new("p").with_mode("both"))
            .await
            .unwrap();

        assert_eq!(output, OptimizeOutput::both(String::new(), String::new()));
    }

    #[tokio::test]
    async fn test_default_model_override() {
        let provider = Arc::new(MockProvider::tagged());
        let dispatcher = dispatcher(&provider).with_default_model("gpt-4.1");
        assert_eq!(dispatcher.default_model(), "gpt-4.1");

        dispatcher.optimize(OptimizeRequest::new("p")).await.unwrap();
        assert_eq!(provider.calls()[0].model, "gpt-4.1");
    }
}
