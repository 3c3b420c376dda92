//! Hosted repository commit source (GitHub REST API)
//!
//! Resolution and range walking go through the REST API instead of a local
//! clone. Every request carries a fixed timeout, capped by an optional
//! caller-supplied deadline. Timeouts, connection failures, 5xx/429 answers
//! and rate-limited 403s surface as `GitError::TransientNetwork`; the caller
//! decides whether to retry.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::repository::Result;
use crate::source::{is_id_prefix, CommitSource};
use crate::types::{CommitId, CommitInfo, DisjointHistory, WalkOutcome};
use relnotes_core::error::GitError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const PAGE_SIZE: usize = 100;
const USER_AGENT: &str = concat!("relnotes/", env!("CARGO_PKG_VERSION"));

/// Commit source backed by the GitHub REST API
pub struct GitHubSource {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
    timeout: Duration,
    deadline: Option<Instant>,
}

impl GitHubSource {
    /// Create a source for `owner/repo` on the given API base URL
    pub fn new(api_url: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            deadline: None,
        }
    }

    /// Authenticate requests with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bound every request by an overall deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Repository-scoped API URL; every `/`-separated part of `path` is
    /// percent-encoded as its own segment
    fn repo_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| GitError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| GitError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(path.split('/'));
        Ok(url)
    }

    /// Timeout for the next request, or an error once the deadline has passed
    fn request_timeout(&self, url: &Url) -> Result<Duration> {
        match self.deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(GitError::TransientNetwork {
                        url: url.to_string(),
                        reason: "deadline exceeded".to_string(),
                    });
                }
                Ok(remaining.min(self.timeout))
            }
            None => Ok(self.timeout),
        }
    }

    /// GET a JSON resource; `Ok(None)` on 404/422
    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        let timeout = self.request_timeout(&url)?;
        let start = Instant::now();

        let mut request = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        debug!(
            url = %url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "api response"
        );

        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(None);
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GitError::TransientNetwork {
                url: url.to_string(),
                reason: format!("server answered {}", status),
            });
        }
        if status == StatusCode::FORBIDDEN && rate_limited(response.headers()) {
            return Err(GitError::TransientNetwork {
                url: url.to_string(),
                reason: "rate limit exceeded".to_string(),
            });
        }
        if !status.is_success() {
            return Err(api_error(&url, response));
        }

        // The body read is bounded by the same timeout as the request
        let body = response.bytes().map_err(|e| transport_error(&url, e))?;
        serde_json::from_slice::<T>(&body)
            .map(Some)
            .map_err(|e| GitError::Api {
                status: status.as_u16(),
                message: format!("invalid response body: {}", e),
            })
    }

    fn resolve_branch(&self, reference: &str) -> Result<Option<CommitId>> {
        let url = self.repo_url(&format!("branches/{}", reference))?;
        let branch: Option<BranchResponse> = self.get_json(url)?;
        Ok(branch.map(|b| CommitId::new(b.commit.sha)))
    }

    /// Look up `refs/{path}` and peel annotated tags down to their commit
    fn resolve_git_ref(&self, path: &str) -> Result<Option<CommitId>> {
        let url = self.repo_url(&format!("git/ref/{}", path))?;
        let Some(git_ref) = self.get_json::<RefResponse>(url)? else {
            return Ok(None);
        };

        let mut object = git_ref.object;
        while object.kind == "tag" {
            let url = self.repo_url(&format!("git/tags/{}", object.sha))?;
            let Some(tag) = self.get_json::<TagObjectResponse>(url)? else {
                return Ok(None);
            };
            object = tag.object;
        }

        Ok((object.kind == "commit").then(|| CommitId::new(object.sha)))
    }

    fn resolve_prefix(&self, reference: &str) -> Result<Option<CommitId>> {
        if !is_id_prefix(reference) {
            return Ok(None);
        }
        let url = self.repo_url(&format!("commits/{}", reference))?;
        let commit: Option<ApiCommit> = self.get_json(url)?;
        Ok(commit.map(|c| CommitId::new(c.sha)))
    }

    /// Walk via the compare endpoint, which lists commits oldest-first
    fn compare(&self, from: &CommitId, to: &CommitId) -> Result<Option<Vec<ApiCommit>>> {
        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let mut url = self.repo_url(&format!("compare/{}...{}", from, to))?;
            set_page(&mut url, page);
            let Some(response) = self.get_json::<CompareResponse>(url)? else {
                return Ok(None);
            };

            let received = response.commits.len();
            commits.extend(response.commits);

            if received < PAGE_SIZE || commits.len() >= response.total_commits {
                return Ok(Some(commits));
            }
            page += 1;
        }
    }

    /// Full ancestry of `to`, used when the endpoints share no history
    fn ancestry(&self, to: &CommitId) -> Result<Vec<ApiCommit>> {
        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let mut url = self.repo_url("commits")?;
            url.query_pairs_mut().append_pair("sha", to.as_str());
            set_page(&mut url, page);
            let batch: Vec<ApiCommit> = self.get_json(url)?.unwrap_or_default();
            let received = batch.len();
            commits.extend(batch);

            if received < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        // The listing is newest-first
        commits.reverse();
        Ok(commits)
    }
}

impl CommitSource for GitHubSource {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip(self), fields(repo = %format!("{}/{}", self.owner, self.repo)))]
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        if !is_ref_path(reference) {
            return Err(GitError::ReferenceNotFound(reference.to_string()));
        }
        if let Some(path) = reference.strip_prefix("refs/") {
            if let Some(id) = self.resolve_git_ref(path)? {
                debug!(reference, strategy = "ref", id = %id.short(), "resolved reference");
                return Ok(id);
            }
        }
        if let Some(id) = self.resolve_branch(reference)? {
            debug!(reference, strategy = "branch", id = %id.short(), "resolved reference");
            return Ok(id);
        }
        if let Some(id) = self.resolve_git_ref(&format!("tags/{}", reference))? {
            debug!(reference, strategy = "tag", id = %id.short(), "resolved reference");
            return Ok(id);
        }
        if let Some(id) = self.resolve_prefix(reference)? {
            debug!(reference, strategy = "prefix", id = %id.short(), "resolved reference");
            return Ok(id);
        }
        Err(GitError::ReferenceNotFound(reference.to_string()))
    }

    #[instrument(skip(self), fields(from = %from.short(), to = %to.short()))]
    fn walk(&self, from: &CommitId, to: &CommitId) -> Result<WalkOutcome> {
        let (raw, disjoint) = match self.compare(from, to)? {
            Some(commits) => (commits, None),
            None => {
                // Compare answers 404 when there is no merge base
                let warning = DisjointHistory {
                    from: from.clone(),
                    to: to.clone(),
                };
                warn!(%warning, "endpoints have no common ancestor");
                (self.ancestry(to)?, Some(warning))
            }
        };

        let commits = collect_range(raw);
        info!(commit_count = commits.len(), disjoint = disjoint.is_some(), "walked commit range");
        Ok(WalkOutcome { commits, disjoint })
    }
}

/// Convert API commits (already oldest-first) and drop platform merges
fn collect_range(raw: Vec<ApiCommit>) -> Vec<CommitInfo> {
    raw.into_iter()
        .map(ApiCommit::into_info)
        .filter(|c| !c.is_platform_merge())
        .collect()
}

/// Path segments that would be rewritten by URL normalization name no ref
fn is_ref_path(reference: &str) -> bool {
    reference
        .split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn set_page(url: &mut Url, page: usize) {
    url.query_pairs_mut()
        .append_pair("per_page", &PAGE_SIZE.to_string())
        .append_pair("page", &page.to_string());
}

/// A 403 is only retryable when the rate limit is exhausted
fn rate_limited(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Timeouts, refused connections and broken bodies are all worth retrying
fn transport_error(url: &Url, err: reqwest::Error) -> GitError {
    let reason = if err.is_timeout() {
        format!("timed out: {}", err)
    } else {
        err.to_string()
    };
    GitError::TransientNetwork {
        url: url.to_string(),
        reason,
    }
}

fn api_error(url: &Url, response: Response) -> GitError {
    let status = response.status().as_u16();
    match response.bytes() {
        Ok(body) => {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| "unexpected response".to_string());
            GitError::Api { status, message }
        }
        Err(e) => transport_error(url, e),
    }
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    author: ApiSignature,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiSignature {
    name: String,
    email: String,
    date: DateTime<Utc>,
}

impl ApiCommit {
    fn into_info(self) -> CommitInfo {
        CommitInfo::new(
            self.sha,
            self.commit.message,
            self.commit.author.name,
            self.commit.author.email,
            self.commit.author.date,
        )
    }
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    total_commits: usize,
    commits: Vec<ApiCommit>,
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    commit: ShaOnly,
}

#[derive(Debug, Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct TagObjectResponse {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}
