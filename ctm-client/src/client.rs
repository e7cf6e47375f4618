//! Typed client over the backend's HTTP endpoints.
//!
//! One `ApiClient` is built at startup and cloned into every request task —
//! `reqwest::Client` is an `Arc` around a connection pool, so clones are cheap
//! and share the pool. Every method maps a non-2xx status to
//! `ApiError::Status` except [`ApiClient::remove_repo`], which deliberately
//! ignores the status (see its docs).

use reqwest::StatusCode;

use crate::types::{AnalysisResult, AnalyzeCommitRequest, CommitSummary};

/// Backend base URL used when no config override is present.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Fixed page size for `GET /commits`. The backend supports an arbitrary
/// `count` but the UI always asks for the 10 most recent commits.
pub const DEFAULT_HISTORY_COUNT: u32 = 10;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Errors produced by backend calls.
///
/// The UI collapses both variants into a single display string per operation,
/// so no finer taxonomy (timeout vs connect vs decode) is kept here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure: connect, timeout, or body decode.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {0}")]
    Status(StatusCode),
}

/// Client for the Code Time Machine backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url`. A trailing slash on the base URL is
    /// tolerated and stripped so endpoint paths can be joined naively.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying `reqwest::Client`
    /// cannot be constructed (TLS backend initialisation failure).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /` — reachability probe.
    ///
    /// The backend answers `{"message": "Code Time Machine"}` at its root.
    /// Only the status is inspected; the body is discarded.
    ///
    /// # Errors
    ///
    /// `ApiError::Transport` when the backend is unreachable,
    /// `ApiError::Status` on a non-2xx answer.
    pub async fn health(&self) -> Result<(), ApiError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;
        check_status(resp.status())?;
        Ok(())
    }

    /// `POST /rm-repo` — asks the backend to delete its working copy.
    ///
    /// Any HTTP response counts as success: cleanup is best-effort and the
    /// backend's answer carries no information the client acts on. Only a
    /// transport failure (backend unreachable) is reported.
    ///
    /// # Errors
    ///
    /// `ApiError::Transport` when the request cannot be sent at all.
    pub async fn remove_repo(&self) -> Result<(), ApiError> {
        self.http
            .post(format!("{}/rm-repo", self.base_url))
            .send()
            .await?;
        Ok(())
    }

    /// `GET /commits` — the `count` most recent commits of the working copy.
    ///
    /// `repo_url` is forwarded as a query parameter when present so the
    /// backend can (re)clone before listing; when absent the backend lists
    /// whatever working copy it already holds. Entries come back newest-first
    /// and their order is preserved.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` on a non-2xx answer, `ApiError::Transport` on
    /// network or JSON-decode failure.
    pub async fn commit_history(
        &self,
        repo_url: Option<&str>,
        count: u32,
    ) -> Result<Vec<CommitSummary>, ApiError> {
        let mut req = self
            .http
            .get(format!("{}/commits", self.base_url))
            .query(&[("count", count.to_string())]);
        if let Some(url) = repo_url {
            req = req.query(&[("repo_url", url)]);
        }
        let resp = req.send().await?;
        check_status(resp.status())?;
        Ok(resp.json().await?)
    }

    /// `POST /analyze-commit` — runs the backend's analysis pipeline.
    ///
    /// `commit_hash: None` is sent as JSON `null`, which the backend resolves
    /// to the repository's most recent commit.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` on a non-2xx answer (the backend uses 400 for bad
    /// repos/hashes and 500 for pipeline failures), `ApiError::Transport` on
    /// network or JSON-decode failure.
    pub async fn analyze_commit(
        &self,
        repo_url: &str,
        commit_hash: Option<&str>,
    ) -> Result<AnalysisResult, ApiError> {
        let body = AnalyzeCommitRequest {
            repo_url: repo_url.to_owned(),
            commit_hash: commit_hash.map(str::to_owned),
        };
        let resp = self
            .http
            .post(format!("{}/analyze-commit", self.base_url))
            .json(&body)
            .send()
            .await?;
        check_status(resp.status())?;
        Ok(resp.json().await?)
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}
