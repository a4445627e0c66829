//! Prompt optimization: templates, mode resolution and dispatch.
//!
//! A request selects `markdown`, `xml` or `both`; each selected format is one
//! completion call with the matching template as system instructions and the
//! user's prompt, unmodified, as user content.

pub mod dispatcher;
pub mod error;
pub mod mode;
pub mod request;
pub mod templates;

pub use dispatcher::{DEFAULT_MODEL, PromptDispatcher, validate_prompt};
pub use error::{OptimizeError, OptimizeResult};
pub use mode::{OutputMode, UnknownMode};
pub use request::{OptimizeOutput, OptimizeRequest, coerce_text};
pub use templates::{MARKDOWN_TEMPLATE, XML_TEMPLATE};
