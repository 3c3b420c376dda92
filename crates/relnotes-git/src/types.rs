//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message prefix the hosting platform writes on pull request merges
pub const PLATFORM_MERGE_PREFIX: &str = "Merge pull request";

/// Length of abbreviated commit ids in rendered output
pub const SHORT_ID_LEN: usize = 7;

/// Full hex object id of a commit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Create a commit id from its hex form
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into().to_lowercase())
    }

    /// Full hex form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated id (first 7 characters)
    pub fn short(&self) -> &str {
        // Deserialized ids bypass `new`, so cut on a char boundary
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<git2::Oid> for CommitId {
    fn from(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }
}

/// A commit as read from history, before classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit id
    pub id: CommitId,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub timestamp: DateTime<Utc>,
    /// Full raw message: header, blank line, body and trailers
    pub message: String,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        id: impl Into<CommitId>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
            message: message.into(),
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Whether this is a hosting-platform pull request merge
    pub fn is_platform_merge(&self) -> bool {
        is_platform_merge(&self.message)
    }
}

impl From<&str> for CommitId {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}

impl From<String> for CommitId {
    fn from(hex: String) -> Self {
        Self::new(hex)
    }
}

/// Check the textual merge convention on a raw message.
///
/// Only the first line is inspected; parent count is irrelevant.
pub fn is_platform_merge(message: &str) -> bool {
    message
        .lines()
        .next()
        .is_some_and(|line| line.trim_start().starts_with(PLATFORM_MERGE_PREFIX))
}

/// Warning raised when the two endpoints share no ancestry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisjointHistory {
    /// Lower endpoint
    pub from: CommitId,
    /// Upper endpoint
    pub to: CommitId,
}

impl std::fmt::Display for DisjointHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} and {} share no history; listing every ancestor of {}",
            self.from.short(),
            self.to.short(),
            self.to.short()
        )
    }
}

/// Result of walking a commit range
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Commits oldest-first, platform merges removed
    pub commits: Vec<CommitInfo>,
    /// Set when the endpoints have no common ancestor
    pub disjoint: Option<DisjointHistory>,
}
