//! Commit source abstraction

use crate::repository::Result;
use crate::types::{CommitId, WalkOutcome};

/// Anything that can resolve references and walk history between them.
///
/// Implementations exist for a local repository ([`crate::GitRepo`]) and for
/// a hosted repository API ([`crate::GitHubSource`]).
pub trait CommitSource {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Resolve a branch, tag or commit-id prefix to a commit.
    ///
    /// Strategies are tried in order: named reference, tag, id prefix of at
    /// least seven hex characters. Fails with `GitError::ReferenceNotFound`
    /// when none match.
    fn resolve(&self, reference: &str) -> Result<CommitId>;

    /// Collect commits reachable from `to` but not from `from`, oldest-first,
    /// with platform merge commits removed.
    fn walk(&self, from: &CommitId, to: &CommitId) -> Result<WalkOutcome>;
}

/// Whether `reference` can be tried as an abbreviated commit id
pub(crate) fn is_id_prefix(reference: &str) -> bool {
    (crate::types::SHORT_ID_LEN..=40).contains(&reference.len())
        && reference.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefix_length_bounds() {
        assert!(!is_id_prefix("abc123"));
        assert!(is_id_prefix("abc1234"));
        assert!(is_id_prefix(&"a".repeat(40)));
        assert!(!is_id_prefix(&"a".repeat(41)));
    }

    #[test]
    fn test_id_prefix_requires_hex() {
        assert!(!is_id_prefix("v1.0.0-rc1"));
        assert!(!is_id_prefix("abcdefg"));
        assert!(is_id_prefix("ABCDEF0"));
    }
}
