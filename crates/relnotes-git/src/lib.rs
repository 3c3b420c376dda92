//! Relnotes Git - commit history access for release notes
//!
//! This crate resolves human-supplied references to commits and walks the
//! ancestry range between two commits, either in a local repository or
//! through a hosted repository API.

mod commits;
mod refs;
mod remote;
mod repository;
mod source;
#[cfg(test)]
mod test_support;
pub mod types;

pub use remote::GitHubSource;
pub use repository::{GitRepo, Result};
pub use source::CommitSource;
pub use types::{is_platform_merge, CommitId, CommitInfo, DisjointHistory, WalkOutcome};
