//! Wire types for the Code Time Machine backend.
//!
//! All types are fully owned and mirror the backend's JSON shapes field for
//! field. `date` fields stay as strings at this layer — the backend emits
//! ISO-8601 timestamps and the UI decides how to render them.

use serde::{Deserialize, Serialize};

/// One entry in the commit-history listing returned by `GET /commits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Full commit SHA as hex text.
    pub hash: String,
    /// Commit message, stripped of trailing whitespace by the backend.
    pub message: String,
    /// Author name (not email).
    pub author: String,
    /// Authored date as an ISO-8601 string.
    pub date: String,
}

/// Metadata block for the commit an analysis was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMetadata {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

/// Response body of `POST /analyze-commit`.
///
/// `analysis` and `fix_suggestion` are opaque backend-produced text (often
/// markdown). They are rendered verbatim — interpretation is the backend's
/// business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub commit_metadata: CommitMetadata,
    pub analysis: String,
    pub fix_suggestion: String,
}

/// Request body of `POST /analyze-commit`.
///
/// `commit_hash: None` serializes as JSON `null` (not an absent key) — the
/// backend treats `null` as "analyze the most recent commit".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeCommitRequest {
    pub repo_url: String,
    pub commit_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_serializes_missing_hash_as_null() {
        let req = AnalyzeCommitRequest {
            repo_url: "https://github.com/acme/widgets".to_owned(),
            commit_hash: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"repo_url":"https://github.com/acme/widgets","commit_hash":null}"#
        );
    }

    #[test]
    fn analyze_request_serializes_explicit_hash() {
        let req = AnalyzeCommitRequest {
            repo_url: "https://github.com/acme/widgets".to_owned(),
            commit_hash: Some("90e5a216".to_owned()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["commit_hash"], "90e5a216");
    }

    #[test]
    fn commit_summary_deserializes_backend_shape() {
        let json = r#"{
            "hash": "90e5a21687fef349a765562ccb33600afec28d04",
            "message": "Fix widget alignment",
            "author": "Jo Developer",
            "date": "2024-03-01T12:34:56+00:00"
        }"#;
        let summary: CommitSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.author, "Jo Developer");
        assert!(summary.hash.starts_with("90e5a216"));
    }

    #[test]
    fn analysis_result_deserializes_nested_metadata() {
        let json = r#"{
            "commit_metadata": {
                "hash": "abc123",
                "author": "Jo Developer",
                "date": "2024-03-01T12:34:56+00:00",
                "message": "Fix widget alignment"
            },
            "analysis": "The commit changes alignment math.",
            "fix_suggestion": "Consider extracting a helper."
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.commit_metadata.hash, "abc123");
        assert!(result.fix_suggestion.contains("helper"));
    }
}
