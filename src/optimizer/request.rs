//! Request and response shapes of an optimize call.

use serde::Serialize;
use serde_json::Value;

/// Decoded optimize request, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptimizeRequest {
    /// Raw prompt text, untrimmed.
    pub prompt: String,
    /// Raw mode value, if a string was sent.
    pub mode: Option<String>,
    /// Model override, if a non-empty string was sent.
    pub model: Option<String>,
}

impl OptimizeRequest {
    /// Create a request for `prompt` with default mode and model.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: None,
            model: None,
        }
    }

    /// Set the requested mode.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the model override.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build a request from an arbitrary JSON body.
    ///
    /// The prompt is coerced to text the way a JavaScript client stringifies
    /// values (see [`coerce_text`]); `null`/missing is empty. Non-string modes
    /// and empty or non-string models count as absent.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let prompt = body.get("prompt").map(coerce_text).unwrap_or_default();
        let mode = body.get("mode").and_then(Value::as_str).map(str::to_string);
        let model = body
            .get("model")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            prompt,
            mode,
            model,
        }
    }
}

/// Stringify a JSON value like JavaScript's `String(value)`.
///
/// Arrays join their elements with `,` (nested `null` as empty), objects
/// become `[object Object]`, integral floats drop their fraction.
#[must_use]
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Formatted answers keyed by format name. Absent formats are not serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OptimizeOutput {
    /// Markdown-structured answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// XML-structured answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,
}

impl OptimizeOutput {
    /// Markdown-only output.
    #[must_use]
    pub const fn markdown(text: String) -> Self {
        Self {
            markdown: Some(text),
            xml: None,
        }
    }

    /// XML-only output.
    #[must_use]
    pub const fn xml(text: String) -> Self {
        Self {
            markdown: None,
            xml: Some(text),
        }
    }

    /// Output carrying both formats.
    #[must_use]
    pub const fn both(markdown: String, xml: String) -> Self {
        Self {
            markdown: Some(markdown),
            xml: Some(xml),
        }
    }
}
