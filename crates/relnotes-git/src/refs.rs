//! Reference resolution

use git2::{BranchType, ErrorCode, Reference};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::source::is_id_prefix;
use crate::types::CommitId;
use relnotes_core::error::GitError;

/// Errors that mean "this strategy found nothing" rather than a broken repo
fn is_miss(err: &git2::Error) -> bool {
    matches!(
        err.code(),
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous | ErrorCode::Peel
    )
}

impl GitRepo {
    /// Resolve a reference string to a commit id.
    ///
    /// Tries, in order: a named reference (`HEAD`, a full `refs/...` path, a
    /// local or remote-tracking branch), a tag, then a commit-id prefix of at
    /// least seven hex characters. The first hit wins.
    #[instrument(skip(self))]
    pub fn resolve_reference(&self, reference: &str) -> Result<CommitId> {
        if let Some(id) = self.resolve_named(reference)? {
            debug!(reference, strategy = "named", id = %id.short(), "resolved reference");
            return Ok(id);
        }

        if let Some(id) = self.resolve_tag(reference)? {
            debug!(reference, strategy = "tag", id = %id.short(), "resolved reference");
            return Ok(id);
        }

        if let Some(id) = self.resolve_prefix(reference)? {
            debug!(reference, strategy = "prefix", id = %id.short(), "resolved reference");
            return Ok(id);
        }

        Err(GitError::ReferenceNotFound(reference.to_string()))
    }

    fn resolve_named(&self, reference: &str) -> Result<Option<CommitId>> {
        if reference == "HEAD" || reference.starts_with("refs/") {
            return match self.repo.find_reference(reference) {
                Ok(found) => peel(found),
                Err(e) if is_miss(&e) => Ok(None),
                Err(e) => Err(e.into()),
            };
        }

        for branch_type in [BranchType::Local, BranchType::Remote] {
            match self.repo.find_branch(reference, branch_type) {
                Ok(branch) => return peel(branch.into_reference()),
                Err(e) if is_miss(&e) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(None)
    }

    fn resolve_tag(&self, reference: &str) -> Result<Option<CommitId>> {
        let tag_ref = format!("refs/tags/{}", reference);

        match self.repo.find_reference(&tag_ref) {
            // Peeling follows annotated tag objects down to the commit
            Ok(found) => peel(found),
            Err(e) if is_miss(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_prefix(&self, reference: &str) -> Result<Option<CommitId>> {
        if !is_id_prefix(reference) {
            return Ok(None);
        }

        match self.repo.find_commit_by_prefix(reference) {
            Ok(commit) => Ok(Some(commit.id().into())),
            Err(e) if is_miss(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn peel(reference: Reference<'_>) -> Result<Option<CommitId>> {
    match reference.peel_to_commit() {
        Ok(commit) => Ok(Some(commit.id().into())),
        Err(e) if is_miss(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
