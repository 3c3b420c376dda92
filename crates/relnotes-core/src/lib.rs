//! Relnotes Core - shared foundations for release notes generation
//!
//! This crate provides the error taxonomy, the commit category type and the
//! configuration layer used by the git, changelog and CLI crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ConfigError, GitError, NotesError, RelnotesError, Result};
pub use types::CommitCategory;
