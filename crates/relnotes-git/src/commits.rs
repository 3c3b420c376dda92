//! Commit range walking

use chrono::{DateTime, Utc};
use git2::{ErrorCode, Oid, Sort};
use tracing::{debug, info, instrument, warn};

use crate::repository::{GitRepo, Result};
use crate::source::CommitSource;
use crate::types::{CommitId, CommitInfo, DisjointHistory, WalkOutcome};

impl GitRepo {
    /// Collect every commit reachable from `to` and not from `from`.
    ///
    /// All parents are followed. `from` itself is excluded. Platform merge
    /// commits are dropped and the result is returned oldest-first. When the
    /// endpoints share no ancestry the walk runs to the roots of `to` and the
    /// outcome carries a [`DisjointHistory`] warning.
    #[instrument(skip(self), fields(from = %from.short(), to = %to.short()))]
    pub fn walk_range(&self, from: &CommitId, to: &CommitId) -> Result<WalkOutcome> {
        let from_oid = Oid::from_str(from.as_str())?;
        let to_oid = Oid::from_str(to.as_str())?;

        let disjoint = match self.repo.merge_base(from_oid, to_oid) {
            Ok(_) => None,
            Err(e) if e.code() == ErrorCode::NotFound => {
                let warning = DisjointHistory {
                    from: from.clone(),
                    to: to.clone(),
                };
                warn!(%warning, "endpoints have no common ancestor");
                Some(warning)
            }
            Err(e) => return Err(e.into()),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut commits = Vec::new();
        let mut merges_skipped = 0usize;

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let info = commit_to_info(&commit);
            if info.is_platform_merge() {
                merges_skipped += 1;
                continue;
            }
            commits.push(info);
        }

        // Revwalk yields newest-first
        commits.reverse();

        info!(
            commit_count = commits.len(),
            merges_skipped,
            disjoint = disjoint.is_some(),
            "walked commit range"
        );

        Ok(WalkOutcome { commits, disjoint })
    }
}

impl CommitSource for GitRepo {
    fn name(&self) -> &str {
        "local"
    }

    fn resolve(&self, reference: &str) -> Result<CommitId> {
        self.resolve_reference(reference)
    }

    fn walk(&self, from: &CommitId, to: &CommitId) -> Result<WalkOutcome> {
        self.walk_range(from, to)
    }
}

/// Convert a git2 Commit to CommitInfo, using the author (not committer) time
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

    let timestamp = DateTime::<Utc>::from_timestamp(author.when().seconds(), 0).unwrap_or_default();

    debug!(id = %commit.id(), "read commit");

    CommitInfo::new(
        commit.id(),
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
}
