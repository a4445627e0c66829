//! Output mode requested by the client.

use std::fmt;
use std::str::FromStr;

/// Which formatted answers a request asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Markdown only.
    #[default]
    Markdown,
    /// XML only.
    Xml,
    /// Markdown and XML, generated concurrently.
    Both,
}

/// Mode name that is not one of `markdown`, `xml`, `both`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown output mode: {0}")]
pub struct UnknownMode(pub String);

impl OutputMode {
    /// Resolve a raw, case-insensitive mode value.
    ///
    /// Absent values mean Markdown, and so does anything unrecognized.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        raw.parse::<Self>().unwrap_or_else(|UnknownMode(value)| {
            tracing::warn!(mode = %value, "Unrecognized mode, falling back to markdown");
            Self::Markdown
        })
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Xml => "xml",
            Self::Both => "both",
        }
    }
}

impl FromStr for OutputMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" => Ok(Self::Markdown),
            "xml" => Ok(Self::Xml),
            "both" => Ok(Self::Both),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        assert_eq!(OutputMode::resolve(None), OutputMode::Markdown);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(OutputMode::resolve(Some("XML")), OutputMode::Xml);
        assert_eq!(OutputMode::resolve(Some("Both")), OutputMode::Both);
        assert_eq!(OutputMode::resolve(Some("MarkDown")), OutputMode::Markdown);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(OutputMode::resolve(Some("json")), OutputMode::Markdown);
        assert_eq!(OutputMode::resolve(Some("")), OutputMode::Markdown);
        assert_eq!(OutputMode::resolve(Some(" xml ")), OutputMode::Markdown);
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("both".parse::<OutputMode>(), Ok(OutputMode::Both));
        assert_eq!(
            "yaml".parse::<OutputMode>(),
            Err(UnknownMode("yaml".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputMode::Both.to_string(), "both");
        assert_eq!(OutputMode::Xml.as_str(), "xml");
    }
}
