//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{DEFAULT_API_URL, DEFAULT_FORMAT, DEFAULT_TIMEOUT_SECS, DEFAULT_WEB_URL};

/// Main configuration for relnotes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release notes generation settings
    pub notes: NotesConfig,

    /// Where commits come from
    pub source: SourceConfig,
}

/// Release notes generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Output format (markdown, md, json, text)
    pub format: String,

    /// Categories to keep; empty keeps everything not excluded
    pub include_types: Vec<String>,

    /// Categories to drop
    pub exclude_types: Vec<String>,

    /// Default destination file
    pub output: Option<PathBuf>,

    /// Render markdown sections as tables
    pub table: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            include_types: Vec::new(),
            exclude_types: Vec::new(),
            output: None,
            table: false,
        }
    }
}

/// Commit source provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    /// Local git repository
    #[default]
    Local,
    /// GitHub REST API
    Github,
}

/// Commit source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Which provider to read history from
    pub provider: SourceProvider,

    /// Hosted repository as `owner/repo`
    pub github_repo: Option<String>,

    /// Base URL of the hosted API
    pub api_url: String,

    /// Base URL of the hosting web UI, used for commit links
    pub web_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: SourceProvider::Local,
            github_repo: None,
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    /// Split `github_repo` into owner and name
    pub fn owner_and_repo(&self) -> Option<(&str, &str)> {
        let (owner, repo) = self.github_repo.as_deref()?.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some((owner, repo))
    }

    /// Web URL of the hosted repository, when one is configured
    pub fn repo_web_url(&self) -> Option<String> {
        let (owner, repo) = self.owner_and_repo()?;
        Some(format!("{}/{}/{}", self.web_url.trim_end_matches('/'), owner, repo))
    }
}
