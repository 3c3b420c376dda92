//! Error types for relnotes

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnotesError
pub type Result<T> = std::result::Result<T, RelnotesError>;

/// Main error type for relnotes operations
#[derive(Debug, Error)]
pub enum RelnotesError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git and commit-source errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Classification and rendering errors
    #[error(transparent)]
    Notes(#[from] NotesError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelnotesError {
    /// Whether the caller may retry the operation that produced this error
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Git(GitError::TransientNetwork { .. }))
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving references and walking history
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No branch, tag or commit matches the reference
    #[error("Reference not found: '{0}'")]
    ReferenceNotFound(String),

    /// Timeout or connection failure talking to a hosted repository
    #[error("Network error calling {url}: {reason} (retry may succeed)")]
    TransientNetwork { url: String, reason: String },

    /// Hosted API base URL cannot carry repository paths
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Hosted repository API answered with an unexpected status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Errors raised while classifying commits and rendering notes
#[derive(Debug, Error)]
pub enum NotesError {
    /// Output format not supported by any registered formatter
    #[error("Unsupported output format: '{0}' (expected markdown, json or text)")]
    UnsupportedFormat(String),

    /// Category name in a filter that names no category
    #[error("Unknown commit category: '{0}'")]
    UnknownCategory(String),

    /// Failed to serialize the document
    #[error("Failed to serialize release notes: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_not_found_carries_reference() {
        let err: RelnotesError = GitError::ReferenceNotFound("v9.9.9".to_string()).into();
        assert!(err.to_string().contains("'v9.9.9'"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_unsupported_format_carries_format() {
        let err: RelnotesError = NotesError::UnsupportedFormat("html".to_string()).into();
        assert!(err.to_string().contains("'html'"));
    }

    #[test]
    fn test_transient_network_is_retryable() {
        let err: RelnotesError = GitError::TransientNetwork {
            url: "https://api.github.com/repos/o/r/compare/a...b".to_string(),
            reason: "operation timed out".to_string(),
        }
        .into();
        assert!(err.is_transient());
    }
}
