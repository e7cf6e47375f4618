//! Spawned tokio tasks that execute backend calls.
//!
//! Each function clones nothing beyond what it is given: the `ApiClient`
//! (cheap — shared connection pool) and the event sender. Every task sends
//! exactly one `AppEvent::Api` and exits; send errors are ignored because a
//! dropped receiver means the application is already shutting down.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use ctm_client::{ApiClient, DEFAULT_HISTORY_COUNT};

use crate::event::AppEvent;
use crate::net::types::{ApiEnvelope, ApiOutcome, PROBE_SEQ};

fn send(tx: &UnboundedSender<AppEvent>, seq: u64, outcome: ApiOutcome) {
    let _ = tx.send(AppEvent::Api(Box::new(ApiEnvelope { seq, outcome })));
}

/// Probes backend reachability (`GET /`) once at startup.
///
/// Runs outside the request slot: it never sets the loading flag and its
/// result only drives the offline marker in the status bar.
pub fn spawn_probe(client: ApiClient, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = client.health().await;
        send(&tx, PROBE_SEQ, ApiOutcome::Probe(result));
    });
}

/// Requests working-copy cleanup (`POST /rm-repo`).
pub fn spawn_cleanup(
    client: ApiClient,
    seq: u64,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.remove_repo().await;
        send(&tx, seq, ApiOutcome::Cleanup(result));
    })
}

/// Fetches the 10 most recent commits (`GET /commits`).
pub fn spawn_history(
    client: ApiClient,
    repo_url: Option<String>,
    seq: u64,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client
            .commit_history(repo_url.as_deref(), DEFAULT_HISTORY_COUNT)
            .await;
        send(&tx, seq, ApiOutcome::History(result));
    })
}

/// Runs commit analysis (`POST /analyze-commit`).
pub fn spawn_analysis(
    client: ApiClient,
    repo_url: String,
    commit_hash: Option<String>,
    seq: u64,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client
            .analyze_commit(&repo_url, commit_hash.as_deref())
            .await;
        send(&tx, seq, ApiOutcome::Analysis(result));
    })
}
