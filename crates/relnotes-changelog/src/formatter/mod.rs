//! Release notes formatters

mod json;
mod markdown;
mod registry;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;
pub use text::TextFormatter;

use std::fmt;
use std::str::FromStr;

use relnotes_core::NotesError;

use crate::types::ReleaseNotesDocument;

/// Trait for release notes formatters
pub trait NotesFormatter: Send + Sync {
    /// Render a document
    fn format(&self, document: &ReleaseNotesDocument) -> Result<String, NotesError>;

    /// Format this formatter is registered under
    fn output_format(&self) -> OutputFormat;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Text,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::Markdown, Self::Json, Self::Text];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(NotesError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render a document in the named format with the built-in formatters
pub fn render(document: &ReleaseNotesDocument, format: &str) -> Result<String, NotesError> {
    let format: OutputFormat = format.parse()?;
    FormatterRegistry::new().render(document, format)
}
