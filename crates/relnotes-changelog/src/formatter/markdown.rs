//! Markdown release notes formatter

use relnotes_core::{CommitCategory, NotesError};
use tracing::{debug, instrument};

use super::{NotesFormatter, OutputFormat};
use crate::types::{CommitRecord, ReleaseNotesDocument};

/// Categories listed in the summary block, after the total
const SUMMARY_ORDER: [CommitCategory; 9] = [
    CommitCategory::Feature,
    CommitCategory::Fix,
    CommitCategory::Docs,
    CommitCategory::Style,
    CommitCategory::Refactor,
    CommitCategory::Test,
    CommitCategory::Chore,
    CommitCategory::Breaking,
    CommitCategory::Unknown,
];

/// Markdown release notes formatter
pub struct MarkdownFormatter {
    /// Append the flat "All Commits" list
    pub include_commit_list: bool,
    /// Render category sections as tables instead of bullet lists
    pub use_table: bool,
    /// Repository web URL; short ids link to `{url}/commit/{id}` when set
    pub commit_url_base: Option<String>,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_commit_list: true,
            use_table: false,
            commit_url_base: None,
        }
    }

    /// Set whether the flat commit list is emitted
    pub fn with_commit_list(mut self, include: bool) -> Self {
        self.include_commit_list = include;
        self
    }

    /// Set whether category sections are rendered as tables
    pub fn with_table(mut self, use_table: bool) -> Self {
        self.use_table = use_table;
        self
    }

    /// Link short ids to commit pages under a repository web URL,
    /// e.g. `https://github.com/owner/repo`
    pub fn with_commit_links(mut self, repo_url: impl Into<String>) -> Self {
        self.commit_url_base = Some(repo_url.into().trim_end_matches('/').to_string());
        self
    }

    fn commit_ref(&self, commit: &CommitRecord) -> String {
        match &self.commit_url_base {
            Some(base) => format!("[{}]({}/commit/{})", commit.short_id(), base, commit.id),
            None => commit.short_id().to_string(),
        }
    }

    fn push_list_section(&self, output: &mut String, commits: &[&CommitRecord]) {
        for commit in commits {
            output.push_str(&format!(
                "- **{}** ({})\n",
                commit.subject,
                self.commit_ref(commit)
            ));
            if let Some(body) = &commit.body {
                for line in body.lines() {
                    output.push_str(&format!("  {}\n", line));
                }
            }
        }
    }

    fn push_table_section(&self, output: &mut String, commits: &[&CommitRecord]) {
        output.push_str("| Commit | Scope | Description | Author |\n");
        output.push_str("|--------|-------|-------------|--------|\n");
        for commit in commits {
            let mut description = escape_cell(&commit.subject);
            if let Some(body) = &commit.body {
                for line in body.lines() {
                    description.push_str("<br>");
                    description.push_str(&escape_cell(line));
                }
            }
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                self.commit_ref(commit),
                commit.scope.as_deref().map(escape_cell).unwrap_or_default(),
                description,
                escape_cell(&commit.author_name)
            ));
        }
    }
}

/// Pipes would end the table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesFormatter for MarkdownFormatter {
    #[instrument(skip(self, document), fields(from = document.from_ref(), to = document.to_ref()))]
    fn format(&self, document: &ReleaseNotesDocument) -> Result<String, NotesError> {
        let mut output = String::new();
        let stats = document.statistics();

        output.push_str("# Release Notes\n\n");
        output.push_str(&format!(
            "**From:** {} ({})\n",
            document.from_ref(),
            document.from_id().short()
        ));
        output.push_str(&format!(
            "**To:** {} ({})\n",
            document.to_ref(),
            document.to_id().short()
        ));
        output.push_str(&format!(
            "**Generated:** {}\n\n",
            document.generated_at().format("%Y-%m-%d %H:%M:%S")
        ));

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- **Total Commits:** {}\n", stats.total));
        for category in SUMMARY_ORDER {
            output.push_str(&format!(
                "- **{}:** {}\n",
                category.title(),
                stats.count(category)
            ));
        }
        output.push('\n');

        let mut section_count = 0;
        for category in CommitCategory::SECTION_ORDER {
            if stats.count(category) == 0 {
                continue;
            }
            section_count += 1;

            output.push_str(&format!("## {}\n\n", category.title()));
            let commits: Vec<&CommitRecord> = document.commits_in(category).collect();
            if self.use_table {
                self.push_table_section(&mut output, &commits);
            } else {
                self.push_list_section(&mut output, &commits);
            }
            output.push('\n');
        }

        if self.include_commit_list {
            output.push_str("## All Commits\n\n");
            for commit in document.commits() {
                output.push_str(&format!(
                    "- **{}:** {} ({}) - {} - {}\n",
                    commit.category,
                    commit.subject,
                    self.commit_ref(commit),
                    commit.author_name,
                    commit.timestamp.format("%Y-%m-%d")
                ));
            }
        }

        debug!(section_count, use_table = self.use_table, output_len = output.len(), "markdown release notes formatted");
        Ok(output)
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}
