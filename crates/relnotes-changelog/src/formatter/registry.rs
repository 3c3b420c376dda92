//! Formatter registry

use std::sync::Arc;

use relnotes_core::NotesError;
use tracing::debug;

use super::{JsonFormatter, MarkdownFormatter, NotesFormatter, OutputFormat, TextFormatter};
use crate::types::ReleaseNotesDocument;

/// Registry of available release notes formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn NotesFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new()),
                Arc::new(JsonFormatter::new()),
                Arc::new(TextFormatter::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter, replacing any earlier one for the same format
    pub fn register<F: NotesFormatter + 'static>(&mut self, formatter: F) {
        let format = formatter.output_format();
        self.formatters.retain(|f| f.output_format() != format);
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by output format
    pub fn get(&self, format: OutputFormat) -> Option<Arc<dyn NotesFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.output_format() == format)
            .cloned()
    }

    /// Get all registered formatters
    pub fn all(&self) -> &[Arc<dyn NotesFormatter>] {
        &self.formatters
    }

    /// Formats with a registered formatter
    pub fn formats(&self) -> Vec<OutputFormat> {
        self.formatters.iter().map(|f| f.output_format()).collect()
    }

    /// Render with the formatter registered for `format`
    pub fn render(
        &self,
        document: &ReleaseNotesDocument,
        format: OutputFormat,
    ) -> Result<String, NotesError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| NotesError::UnsupportedFormat(format.to_string()))?;
        let output = formatter.format(document)?;
        debug!(%format, output_len = output.len(), "release notes rendered");
        Ok(output)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
