//! Exit codes for the CLI

use relnotes_core::{ConfigError, GitError, NotesError, RelnotesError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git or reference error
pub const GIT_ERROR: i32 = 3;

/// Unsupported output format or unknown category
pub const NOTES_ERROR: i32 = 4;

/// Network failure the caller may retry
pub const TRANSIENT_ERROR: i32 = 6;

/// Map an error to its exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<RelnotesError>() {
        return match err {
            RelnotesError::Config(_) => CONFIG_ERROR,
            RelnotesError::Git(git) => for_git_error(git),
            RelnotesError::Notes(_) => NOTES_ERROR,
            _ => ERROR,
        };
    }
    if let Some(git) = err.downcast_ref::<GitError>() {
        return for_git_error(git);
    }
    if err.downcast_ref::<NotesError>().is_some() {
        return NOTES_ERROR;
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    ERROR
}

fn for_git_error(err: &GitError) -> i32 {
    match err {
        GitError::TransientNetwork { .. } => TRANSIENT_ERROR,
        _ => GIT_ERROR,
    }
}
