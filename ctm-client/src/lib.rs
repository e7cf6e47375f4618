//! HTTP client for the Code Time Machine backend.
//!
//! The backend owns a single working copy (a local clone of whatever remote
//! repository was last analyzed) and exposes four endpoints: a reachability
//! probe, working-copy cleanup, recent commit history, and AI commit analysis.
//! This crate holds the wire types and a thin typed client over them — no UI
//! concerns live here.

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL, DEFAULT_HISTORY_COUNT};
pub use reqwest::StatusCode;
pub use types::{AnalysisResult, AnalyzeCommitRequest, CommitMetadata, CommitSummary};
