//! Plain text release notes formatter

use relnotes_core::{CommitCategory, NotesError};
use tracing::instrument;

use super::{NotesFormatter, OutputFormat};
use crate::types::ReleaseNotesDocument;

/// Plain grouped listing without markup
#[derive(Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self
    }
}

impl NotesFormatter for TextFormatter {
    #[instrument(skip(self, document), fields(from = document.from_ref(), to = document.to_ref()))]
    fn format(&self, document: &ReleaseNotesDocument) -> Result<String, NotesError> {
        let mut output = String::new();
        let stats = document.statistics();

        output.push_str("Release Notes\n=============\n\n");
        output.push_str(&format!(
            "From: {} ({})\n",
            document.from_ref(),
            document.from_id().short()
        ));
        output.push_str(&format!(
            "To: {} ({})\n",
            document.to_ref(),
            document.to_id().short()
        ));
        output.push_str(&format!(
            "Generated: {}\n\n",
            document.generated_at().format("%Y-%m-%d %H:%M:%S")
        ));

        output.push_str("Summary:\n");
        output.push_str(&format!("- Total Commits: {}\n", stats.total));
        for category in CommitCategory::ALL {
            output.push_str(&format!("- {}: {}\n", category.title(), stats.count(category)));
        }
        output.push('\n');

        for category in CommitCategory::SECTION_ORDER {
            if stats.count(category) == 0 {
                continue;
            }

            output.push_str(&format!("{}:\n", category.as_str().to_uppercase()));
            for commit in document.commits_in(category) {
                output.push_str(&format!(
                    "- {} ({}) - {}\n",
                    commit.subject,
                    commit.short_id(),
                    commit.author_name
                ));
                if let Some(line) = commit.body_summary() {
                    output.push_str(&format!("  {}\n", line));
                }
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}
