//! Commit classification

mod conventional;
mod types;

pub use conventional::{classify, ConventionalParser};
pub use types::*;

use crate::types::CommitRecord;
use relnotes_git::CommitInfo;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Classify a commit. Unparseable messages degrade to `unknown`.
    fn parse(&self, commit: &CommitInfo) -> CommitRecord;
}
