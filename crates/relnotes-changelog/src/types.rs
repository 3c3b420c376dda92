//! Release notes types

use chrono::{DateTime, Utc};
use relnotes_core::CommitCategory;
use relnotes_git::{CommitId, CommitInfo};
use serde::{Deserialize, Serialize};

use crate::parser::CategoryFilter;
use crate::stats::CommitStatistics;

/// Fields extracted from a raw commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Final category, after breaking-change reconciliation
    pub category: CommitCategory,
    /// Scope from the header, if any
    pub scope: Option<String>,
    /// Header description, or the whole header when it did not parse
    pub subject: String,
    /// Free-form body
    pub body: Option<String>,
    /// Trailer block
    pub footer: Option<String>,
    /// Whether the commit announces an incompatible change
    pub breaking: bool,
}

/// A classified commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit id
    pub id: CommitId,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub timestamp: DateTime<Utc>,
    /// Original message, untouched
    pub raw_message: String,
    /// Category
    pub category: CommitCategory,
    /// Scope
    pub scope: Option<String>,
    /// Subject
    pub subject: String,
    /// Body
    pub body: Option<String>,
    /// Footer
    pub footer: Option<String>,
    /// Breaking change flag
    pub breaking: bool,
}

impl CommitRecord {
    /// Combine a raw commit with its classification
    pub fn new(commit: &CommitInfo, classification: Classification) -> Self {
        Self {
            id: commit.id.clone(),
            author_name: commit.author.clone(),
            author_email: commit.author_email.clone(),
            timestamp: commit.timestamp,
            raw_message: commit.message.clone(),
            category: classification.category,
            scope: classification.scope,
            subject: classification.subject,
            body: classification.body,
            footer: classification.footer,
            breaking: classification.breaking,
        }
    }

    /// Abbreviated commit id
    pub fn short_id(&self) -> &str {
        self.id.short()
    }

    /// First line of the body, if any
    pub fn body_summary(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| b.lines().next())
    }
}

/// Everything a renderer needs for one run.
///
/// Statistics are computed on construction and on every filter, never set
/// independently of the commits they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNotesDocument {
    from_ref: String,
    to_ref: String,
    from_id: CommitId,
    to_id: CommitId,
    generated_at: DateTime<Utc>,
    commits: Vec<CommitRecord>,
    statistics: CommitStatistics,
}

impl ReleaseNotesDocument {
    /// Build a document from a classified, oldest-first range
    pub fn new(
        from_ref: impl Into<String>,
        to_ref: impl Into<String>,
        from_id: CommitId,
        to_id: CommitId,
        commits: Vec<CommitRecord>,
    ) -> Self {
        let statistics = CommitStatistics::aggregate(&commits);
        Self {
            from_ref: from_ref.into(),
            to_ref: to_ref.into(),
            from_id,
            to_id,
            generated_at: Utc::now(),
            commits,
            statistics,
        }
    }

    /// Set the generation timestamp
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// New document keeping only the commits the filter accepts
    pub fn filtered(&self, filter: &CategoryFilter) -> Self {
        let commits = filter.apply(&self.commits);
        let statistics = CommitStatistics::aggregate(&commits);
        Self {
            from_ref: self.from_ref.clone(),
            to_ref: self.to_ref.clone(),
            from_id: self.from_id.clone(),
            to_id: self.to_id.clone(),
            generated_at: self.generated_at,
            commits,
            statistics,
        }
    }

    pub fn from_ref(&self) -> &str {
        &self.from_ref
    }

    pub fn to_ref(&self) -> &str {
        &self.to_ref
    }

    pub fn from_id(&self) -> &CommitId {
        &self.from_id
    }

    pub fn to_id(&self) -> &CommitId {
        &self.to_id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Commits, oldest-first
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn statistics(&self) -> &CommitStatistics {
        &self.statistics
    }

    /// Commits of one category, in range order
    pub fn commits_in(&self, category: CommitCategory) -> impl Iterator<Item = &CommitRecord> {
        self.commits.iter().filter(move |c| c.category == category)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{document, record};
    use super::*;

    #[test]
    fn test_document_computes_statistics() {
        let doc = document(vec![
            record(1, CommitCategory::Feature, "add login"),
            record(2, CommitCategory::Fix, "fix crash"),
            record(3, CommitCategory::Feature, "add logout"),
        ]);

        assert_eq!(doc.statistics().total, 3);
        assert_eq!(doc.statistics().features, 2);
        assert_eq!(doc.statistics().fixes, 1);
        assert_eq!(doc.commits_in(CommitCategory::Feature).count(), 2);
    }

    #[test]
    fn test_filtered_reaggregates() {
        let doc = document(vec![
            record(1, CommitCategory::Feature, "add login"),
            record(2, CommitCategory::Chore, "bump deps"),
            record(3, CommitCategory::Docs, "readme"),
            record(4, CommitCategory::Fix, "fix crash"),
        ]);
        let filter = CategoryFilter::default()
            .exclude_category(CommitCategory::Chore)
            .exclude_category(CommitCategory::Docs);

        let filtered = doc.filtered(&filter);

        assert_eq!(filtered.commits().len(), 2);
        assert_eq!(filtered.statistics().total, 2);
        assert_eq!(filtered.statistics().chore, 0);
        assert_eq!(filtered.statistics().category_sum(), 2);
        assert_eq!(filtered.generated_at(), doc.generated_at());
        // Source document is untouched
        assert_eq!(doc.statistics().total, 4);
    }

    #[test]
    fn test_record_from_commit_info() {
        let info = CommitInfo::new(
            "abcdef0123456789abcdef0123456789abcdef01",
            "feat: add thing\n\nmore detail",
            "Ana",
            "ana@example.com",
            Utc::now(),
        );
        let classification = Classification {
            category: CommitCategory::Feature,
            scope: None,
            subject: "add thing".to_string(),
            body: Some("more detail".to_string()),
            footer: None,
            breaking: false,
        };

        let record = CommitRecord::new(&info, classification);
        assert_eq!(record.short_id(), "abcdef0");
        assert_eq!(record.author_name, "Ana");
        assert_eq!(record.raw_message, info.message);
        assert_eq!(record.body_summary(), Some("more detail"));
    }
}
