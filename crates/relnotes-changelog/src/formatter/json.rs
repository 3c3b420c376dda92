//! JSON release notes formatter

use relnotes_core::NotesError;
use tracing::instrument;

use super::{NotesFormatter, OutputFormat};
use crate::types::ReleaseNotesDocument;

/// Lossless JSON encoding of the whole document
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a pretty-printing formatter
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a formatter that emits a single line
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesFormatter for JsonFormatter {
    #[instrument(skip(self, document), fields(commit_count = document.commits().len()))]
    fn format(&self, document: &ReleaseNotesDocument) -> Result<String, NotesError> {
        let output = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(output)
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}
