//! Sequence-tagged response types for backend request tasks.
//!
//! All types here are fully owned and `Send` so they can travel from a
//! spawned request task to the main UI thread inside an `AppEvent`.

use ctm_client::{AnalysisResult, ApiError, CommitSummary};
use tokio::task::JoinHandle;

/// Sequence number reserved for the startup reachability probe, which runs
/// outside the request slot and never touches the loading flag.
pub const PROBE_SEQ: u64 = 0;

/// One finished backend call, tagged with the sequence number it was issued
/// under.
///
/// Carried inside `AppEvent::Api(Box<ApiEnvelope>)`. Using `Box` keeps the
/// event enum small on the channel — an `AnalysisResult` can hold multiple
/// kilobytes of backend text.
#[derive(Debug)]
pub struct ApiEnvelope {
    /// Sequence number from `RequestSlot::begin`, or [`PROBE_SEQ`].
    pub seq: u64,
    /// What the task did and how it went.
    pub outcome: ApiOutcome,
}

/// Outcome of a single backend call.
///
/// Each variant wraps the full `Result` so the state applier owns the
/// success/failure branching — tasks do no interpretation of their own.
#[derive(Debug)]
pub enum ApiOutcome {
    /// `GET /` reachability probe.
    Probe(Result<(), ApiError>),
    /// `POST /rm-repo` working-copy cleanup.
    Cleanup(Result<(), ApiError>),
    /// `GET /commits` history listing.
    History(Result<Vec<CommitSummary>, ApiError>),
    /// `POST /analyze-commit` analysis run.
    Analysis(Result<AnalysisResult, ApiError>),
}

/// The single outstanding-request slot.
///
/// The UI issues at most one meaningful request at a time: beginning a new
/// request aborts the previous task and bumps the sequence number, and the
/// state applier ignores any envelope whose sequence is not current. Together
/// these guarantee a stale response can never overwrite the result of a newer
/// action — the hole a bare loading flag leaves open.
#[derive(Debug, Default)]
pub struct RequestSlot {
    seq: u64,
    handle: Option<JoinHandle<()>>,
}

impl RequestSlot {
    /// Claims the slot for a new request: aborts any in-flight task and
    /// returns the fresh sequence number to tag it with.
    ///
    /// If the old task wins the race and its envelope is already queued, the
    /// stale sequence check discards it on arrival.
    pub fn begin(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.seq += 1;
        self.seq
    }

    /// Attaches the spawned task's handle so the next `begin` can abort it.
    pub fn attach(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    /// Whether `seq` identifies the most recently issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq && seq != PROBE_SEQ
    }
}
