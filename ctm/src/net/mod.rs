//! Backend request plumbing for ctm.
//!
//! Every user action maps to one HTTP call executed in a spawned tokio task
//! holding a clone of the `ApiClient`. Results travel back to the event loop
//! as `AppEvent::Api` carrying a sequence number; the state applier drops
//! responses whose sequence is stale, and [`types::RequestSlot`] aborts the
//! previous in-flight task whenever a new request begins, so a newer request
//! always supersedes an older one.
//!
//! The `request_*` functions here are the only place requests are issued.
//! They check the same guards the status bar displays, mutate `AppState`
//! (loading flag, error, view), and spawn the matching task from [`tasks`].

pub mod tasks;
pub mod types;

use crate::app::AppState;

/// Issues the New Analysis cleanup request (`POST /rm-repo`).
///
/// Always available. Resets the whole session — form fields, active view,
/// error — before the request goes out, so the screen is blank while the
/// backend deletes its working copy.
pub fn request_new_analysis(state: &mut AppState) {
    let seq = state.begin_new_analysis();
    if let (Some(client), Some(tx)) = (state.api.clone(), state.event_tx.clone()) {
        let handle = tasks::spawn_cleanup(client, seq, tx);
        state.requests.attach(handle);
    }
}

/// Issues the Commit History request (`GET /commits`).
///
/// Refused while a commit hash is entered or while a request is loading —
/// the same guard that dims the `h` hint in the status bar.
pub fn request_commit_history(state: &mut AppState) {
    if !state.can_fetch_history() {
        return;
    }
    let repo_url = (!state.repo_url.is_empty()).then(|| state.repo_url.as_str().to_owned());
    let seq = state.begin_commit_history();
    if let (Some(client), Some(tx)) = (state.api.clone(), state.event_tx.clone()) {
        let handle = tasks::spawn_history(client, repo_url, seq, tx);
        state.requests.attach(handle);
    }
}

/// Issues the Analyze Commit request (`POST /analyze-commit`).
///
/// Refused while the repo URL is empty or while a request is loading. An
/// empty commit-hash field is sent as `null` (backend analyzes the most
/// recent commit).
pub fn request_analyze_commit(state: &mut AppState) {
    if !state.can_analyze() {
        return;
    }
    let repo_url = state.repo_url.as_str().to_owned();
    let commit_hash =
        (!state.commit_hash.is_empty()).then(|| state.commit_hash.as_str().to_owned());
    let seq = state.begin_analyze_commit();
    if let (Some(client), Some(tx)) = (state.api.clone(), state.event_tx.clone()) {
        let handle = tasks::spawn_analysis(client, repo_url, commit_hash, seq, tx);
        state.requests.attach(handle);
    }
}
