//! Central application state for ctm.
//!
//! This module owns all mutable UI state: the current mode, which form field
//! has focus, the two text inputs, the active content view, the loading flag
//! and error message, and the outstanding-request slot. No ratatui rendering
//! logic lives here — `app.rs` is pure state that is read by the render module
//! and mutated by the keybinding dispatcher and the API response applier.

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use ctm_client::{AnalysisResult, ApiClient, CommitSummary};

use crate::event::AppEvent;
use crate::net::types::{ApiEnvelope, ApiOutcome, RequestSlot};

/// Error string shown when the history fetch fails, regardless of cause.
pub const HISTORY_ERROR: &str = "Failed to fetch commit history";
/// Error string shown when the analysis request fails, regardless of cause.
pub const ANALYZE_ERROR: &str = "Failed to analyze commit";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Editor mode controlling which keybinding set is active.
///
/// The default mode is `Normal`. Transitions are driven by the keybinding
/// dispatcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Vim-style command mode (default) — action and scroll keys.
    #[default]
    Normal,
    /// Text insertion mode for editing the focused form field.
    Insert,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
}

/// Which form field currently has keyboard focus.
///
/// The default focus is `RepoUrl`. With two fields the focus cycle is its own
/// inverse, so `next()` doubles as the previous-field move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FieldFocus {
    /// Remote repository URL input (required for analysis).
    #[default]
    RepoUrl,
    /// Commit hash input (optional; empty means "most recent commit").
    CommitHash,
}

impl FieldFocus {
    /// Returns the other field.
    pub fn next(self) -> Self {
        match self {
            FieldFocus::RepoUrl => FieldFocus::CommitHash,
            FieldFocus::CommitHash => FieldFocus::RepoUrl,
        }
    }
}

/// A single-line text input with cursor editing.
///
/// The cursor is a char index (not bytes), so arrow keys and deletions behave
/// correctly on multi-byte input such as URLs with escaped unicode.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    /// The current text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Inserts `c` at the cursor and advances past it.
    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Removes the char before the cursor, if any.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    /// Removes the char under the cursor, if any.
    pub fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the visible slice for a viewport `width` columns wide and the
    /// cursor column within it.
    ///
    /// When the value overflows the viewport, the window slides so the cursor
    /// stays on screen (pinned to the last column while typing at the end).
    pub fn window(&self, width: usize) -> (String, u16) {
        if width == 0 {
            return (String::new(), 0);
        }
        let chars: Vec<char> = self.value.chars().collect();
        let start = self.cursor.saturating_sub(width - 1);
        let end = (start + width).min(chars.len());
        let visible: String = chars[start..end].iter().collect();
        (visible, (self.cursor - start) as u16)
    }
}

/// The single active content view.
///
/// History and analysis results share one slot: each successful fetch replaces
/// the whole variant, so the two can never be displayed simultaneously and no
/// stale result lingers behind the current one.
#[derive(Debug, Default)]
pub enum ActiveView {
    /// Nothing fetched yet (or cleared by New Analysis).
    #[default]
    Empty,
    /// Commit history rows, in the order the backend returned them.
    History(Vec<CommitSummary>),
    /// One commit analysis.
    Analysis(AnalysisResult),
}

/// All mutable UI state passed through every render cycle.
///
/// Bundled so the render function receives a single mutable reference and the
/// keybinding dispatcher another. No logic resides in the render path.
pub struct AppState {
    /// Current editor mode governing which keybindings are active.
    pub mode: Mode,
    /// Which form field receives text in Insert mode.
    pub focus: FieldFocus,

    /// Remote repository URL input.
    pub repo_url: InputField,
    /// Optional commit hash input.
    pub commit_hash: InputField,

    /// The active content view (empty, history, or analysis).
    pub view: ActiveView,
    /// True from request issue until its response (of either kind) arrives.
    pub loading: bool,
    /// Most recent failure message; replaced wholesale, cleared on new requests.
    pub error: Option<String>,
    /// Result of the startup reachability probe; `None` until it lands.
    pub backend_online: Option<bool>,

    /// Stateful list widget backing the history view.
    pub history_list_state: ListState,
    /// Vertical scroll offset for the analysis `Paragraph`.
    pub analysis_scroll: u16,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,
    /// Inner height of the content panel after borders, cached after each
    /// render for half-page scroll calculations.
    pub content_viewport_height: u16,

    /// Advances while `loading` so the status bar spinner animates.
    pub spinner_frame: usize,

    /// The outstanding-request slot (sequence numbers + abort handle).
    pub requests: RequestSlot,

    /// Backend client; `None` only in unit tests, where actions mutate state
    /// without spawning tasks.
    pub api: Option<ApiClient>,
    /// Event channel sender handed to spawned request tasks.
    pub event_tx: Option<UnboundedSender<AppEvent>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: FieldFocus::default(),
            repo_url: InputField::default(),
            commit_hash: InputField::default(),
            view: ActiveView::default(),
            loading: false,
            error: None,
            backend_online: None,
            history_list_state: ListState::default(),
            analysis_scroll: 0,
            help_scroll: 0,
            content_viewport_height: 0,
            spinner_frame: 0,
            requests: RequestSlot::default(),
            api: None,
            event_tx: None,
        }
    }
}

impl AppState {
    /// The form field currently under the cursor.
    pub fn focused_field_mut(&mut self) -> &mut InputField {
        match self.focus {
            FieldFocus::RepoUrl => &mut self.repo_url,
            FieldFocus::CommitHash => &mut self.commit_hash,
        }
    }

    /// Commit History is available only with an empty commit-hash field and
    /// no request in flight.
    pub fn can_fetch_history(&self) -> bool {
        !self.loading && self.commit_hash.is_empty()
    }

    /// Analyze Commit is available only with a non-empty repo URL and no
    /// request in flight.
    pub fn can_analyze(&self) -> bool {
        !self.loading && !self.repo_url.is_empty()
    }

    /// Resets the session for New Analysis and claims the request slot.
    ///
    /// Clears both inputs, the active view, all scroll state, and the error,
    /// then raises the loading flag for the cleanup request.
    pub fn begin_new_analysis(&mut self) -> u64 {
        self.repo_url.clear();
        self.commit_hash.clear();
        self.focus = FieldFocus::RepoUrl;
        self.view = ActiveView::Empty;
        self.history_list_state = ListState::default();
        self.analysis_scroll = 0;
        self.error = None;
        self.loading = true;
        self.requests.begin()
    }

    /// Claims the request slot for a history fetch.
    pub fn begin_commit_history(&mut self) -> u64 {
        self.error = None;
        self.loading = true;
        self.requests.begin()
    }

    /// Claims the request slot for an analysis run.
    ///
    /// A currently displayed analysis is cleared up front, so a failed run
    /// never leaves yesterday's answer on screen next to today's error. A
    /// displayed history view stays — only a successful fetch replaces it.
    pub fn begin_analyze_commit(&mut self) -> u64 {
        self.error = None;
        if matches!(self.view, ActiveView::Analysis(_)) {
            self.view = ActiveView::Empty;
            self.analysis_scroll = 0;
        }
        self.loading = true;
        self.requests.begin()
    }

    /// Applies a finished backend call to the state.
    ///
    /// Probe results bypass the request slot and only set the offline marker.
    /// Everything else is dropped unless its sequence number is current, so a
    /// response that was superseded mid-flight cannot clobber newer state.
    pub fn apply_api(&mut self, envelope: ApiEnvelope) {
        let ApiEnvelope { seq, outcome } = envelope;

        if let ApiOutcome::Probe(result) = &outcome {
            self.backend_online = Some(result.is_ok());
            return;
        }
        if !self.requests.is_current(seq) {
            return;
        }

        self.loading = false;
        match outcome {
            ApiOutcome::Probe(_) => {}
            ApiOutcome::Cleanup(Ok(())) => {}
            ApiOutcome::Cleanup(Err(e)) => {
                self.error = Some(e.to_string());
            }
            ApiOutcome::History(Ok(commits)) => {
                self.history_list_state = ListState::default();
                if !commits.is_empty() {
                    self.history_list_state.select_first();
                }
                self.view = ActiveView::History(commits);
            }
            ApiOutcome::History(Err(_)) => {
                self.error = Some(HISTORY_ERROR.to_owned());
            }
            ApiOutcome::Analysis(Ok(result)) => {
                self.analysis_scroll = 0;
                self.view = ActiveView::Analysis(result);
            }
            ApiOutcome::Analysis(Err(_)) => {
                self.error = Some(ANALYZE_ERROR.to_owned());
            }
        }
    }

    /// Logic tick (4 Hz): advances the spinner while a request is in flight.
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// The spinner glyph for the current frame.
    pub fn spinner_glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Scrolls the content panel down by `lines` rows.
    ///
    /// History scrolls its `ListState` selection; analysis scrolls the
    /// paragraph offset. The empty view has nothing to scroll.
    pub fn scroll_down(&mut self, lines: u16) {
        match &self.view {
            ActiveView::History(commits) if !commits.is_empty() => {
                self.history_list_state.scroll_down_by(lines);
            }
            ActiveView::Analysis(_) => {
                self.analysis_scroll = self.analysis_scroll.saturating_add(lines);
            }
            _ => {}
        }
    }

    /// Scrolls the content panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match &self.view {
            ActiveView::History(commits) if !commits.is_empty() => {
                self.history_list_state.scroll_up_by(lines);
            }
            ActiveView::Analysis(_) => {
                self.analysis_scroll = self.analysis_scroll.saturating_sub(lines);
            }
            _ => {}
        }
    }

    /// Jumps the content panel to the top.
    pub fn scroll_top(&mut self) {
        match &self.view {
            ActiveView::History(commits) if !commits.is_empty() => {
                self.history_list_state.select_first();
            }
            ActiveView::Analysis(_) => self.analysis_scroll = 0,
            _ => {}
        }
    }

    /// Jumps the content panel to the bottom.
    ///
    /// For analysis the offset is set to `u16::MAX` and clamped by ratatui.
    pub fn scroll_bottom(&mut self) {
        match &self.view {
            ActiveView::History(commits) if !commits.is_empty() => {
                self.history_list_state.select_last();
            }
            ActiveView::Analysis(_) => self.analysis_scroll = u16::MAX,
            _ => {}
        }
    }

    /// Scrolls the content panel down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render. If the
    /// cached height is zero (first frame), scrolls by 1 to avoid a no-op.
    pub fn half_page_down(&mut self) {
        let half = self.content_viewport_height / 2;
        self.scroll_down(half.max(1));
    }

    /// Scrolls the content panel up by half its visible height.
    pub fn half_page_up(&mut self) {
        let half = self.content_viewport_height / 2;
        self.scroll_up(half.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctm_client::{AnalysisResult, ApiError, CommitMetadata, StatusCode};

    // A Status variant is the easiest failure to fabricate without a socket.
    fn status_500() -> ApiError {
        ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn commit(hash: &str) -> CommitSummary {
        CommitSummary {
            hash: hash.to_owned(),
            message: format!("commit {hash}"),
            author: "Jo Developer".to_owned(),
            date: "2024-03-01T12:34:56+00:00".to_owned(),
        }
    }

    fn analysis(hash: &str) -> AnalysisResult {
        AnalysisResult {
            commit_metadata: CommitMetadata {
                hash: hash.to_owned(),
                author: "Jo Developer".to_owned(),
                date: "2024-03-01T12:34:56+00:00".to_owned(),
                message: "tidy".to_owned(),
            },
            analysis: "Touches one file.".to_owned(),
            fix_suggestion: "Looks fine.".to_owned(),
        }
    }

    fn type_into(field: &mut InputField, text: &str) {
        for c in text.chars() {
            field.insert_char(c);
        }
    }

    #[test]
    fn analyze_guard_requires_repo_url() {
        let mut state = AppState::default();
        assert!(!state.can_analyze());

        type_into(&mut state.repo_url, "https://github.com/acme/widgets");
        assert!(state.can_analyze());

        state.loading = true;
        assert!(!state.can_analyze());
    }

    #[test]
    fn history_guard_blocks_on_commit_hash_and_loading() {
        let mut state = AppState::default();
        assert!(state.can_fetch_history());

        type_into(&mut state.commit_hash, "90e5a216");
        assert!(!state.can_fetch_history());

        state.commit_hash.clear();
        state.loading = true;
        assert!(!state.can_fetch_history());
    }

    #[test]
    fn new_analysis_resets_everything() {
        let mut state = AppState::default();
        type_into(&mut state.repo_url, "https://github.com/acme/widgets");
        type_into(&mut state.commit_hash, "90e5a216");
        state.view = ActiveView::History(vec![commit("c1")]);
        state.error = Some("old error".to_owned());

        state.begin_new_analysis();

        assert!(state.repo_url.is_empty());
        assert!(state.commit_hash.is_empty());
        assert!(matches!(state.view, ActiveView::Empty));
        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn history_success_replaces_view_in_server_order() {
        let mut state = AppState::default();
        let seq = state.begin_commit_history();

        state.apply_api(ApiEnvelope {
            seq,
            outcome: ApiOutcome::History(Ok(vec![commit("c3"), commit("c2"), commit("c1")])),
        });

        assert!(!state.loading);
        match &state.view {
            ActiveView::History(commits) => {
                let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
                assert_eq!(hashes, ["c3", "c2", "c1"]);
            }
            other => panic!("expected history view, got {other:?}"),
        }
    }

    #[test]
    fn history_failure_sets_error_and_keeps_view() {
        let mut state = AppState::default();
        state.view = ActiveView::History(vec![commit("c1")]);
        let seq = state.begin_commit_history();

        state.apply_api(ApiEnvelope {
            seq,
            outcome: ApiOutcome::History(Err(status_500())),
        });

        assert_eq!(state.error.as_deref(), Some(HISTORY_ERROR));
        assert!(matches!(&state.view, ActiveView::History(c) if c.len() == 1));
        assert!(!state.loading);
    }

    #[test]
    fn analysis_failure_leaves_no_analysis_displayed() {
        let mut state = AppState::default();
        type_into(&mut state.repo_url, "https://github.com/acme/widgets");
        state.view = ActiveView::Analysis(analysis("old"));
        let seq = state.begin_analyze_commit();

        // The stale analysis is cleared up front.
        assert!(matches!(state.view, ActiveView::Empty));

        state.apply_api(ApiEnvelope {
            seq,
            outcome: ApiOutcome::Analysis(Err(status_500())),
        });

        assert_eq!(state.error.as_deref(), Some(ANALYZE_ERROR));
        assert!(matches!(state.view, ActiveView::Empty));
    }

    #[test]
    fn analysis_success_replaces_history_view() {
        let mut state = AppState::default();
        state.view = ActiveView::History(vec![commit("c1")]);
        type_into(&mut state.repo_url, "https://github.com/acme/widgets");
        let seq = state.begin_analyze_commit();

        state.apply_api(ApiEnvelope {
            seq,
            outcome: ApiOutcome::Analysis(Ok(analysis("c9"))),
        });

        match &state.view {
            ActiveView::Analysis(result) => assert_eq!(result.commit_metadata.hash, "c9"),
            other => panic!("expected analysis view, got {other:?}"),
        }
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = AppState::default();
        let stale = state.begin_commit_history();
        let current = state.begin_commit_history();
        assert_ne!(stale, current);

        state.apply_api(ApiEnvelope {
            seq: stale,
            outcome: ApiOutcome::History(Ok(vec![commit("old")])),
        });

        // The superseded response must not touch loading, view, or error.
        assert!(state.loading);
        assert!(matches!(state.view, ActiveView::Empty));
        assert!(state.error.is_none());

        state.apply_api(ApiEnvelope {
            seq: current,
            outcome: ApiOutcome::History(Ok(vec![commit("new")])),
        });
        assert!(!state.loading);
        assert!(matches!(&state.view, ActiveView::History(c) if c[0].hash == "new"));
    }

    #[test]
    fn probe_result_only_sets_offline_marker() {
        let mut state = AppState::default();
        let seq = state.begin_commit_history();

        state.apply_api(ApiEnvelope {
            seq: crate::net::types::PROBE_SEQ,
            outcome: ApiOutcome::Probe(Err(status_500())),
        });

        assert_eq!(state.backend_online, Some(false));
        // The in-flight history request is untouched.
        assert!(state.loading);
        assert!(state.requests.is_current(seq));
    }

    #[test]
    fn cleanup_failure_surfaces_error_text() {
        let mut state = AppState::default();
        let seq = state.begin_new_analysis();

        state.apply_api(ApiEnvelope {
            seq,
            outcome: ApiOutcome::Cleanup(Err(status_500())),
        });

        assert!(!state.loading);
        assert!(state.error.is_some());
    }

    #[test]
    fn input_field_edits_at_char_boundaries() {
        let mut field = InputField::default();
        type_into(&mut field, "héllo");
        assert_eq!(field.as_str(), "héllo");

        field.move_home();
        field.move_right();
        field.move_right();
        field.backspace();
        assert_eq!(field.as_str(), "hllo");

        field.delete();
        assert_eq!(field.as_str(), "hlo");

        field.move_end();
        field.insert_char('!');
        assert_eq!(field.as_str(), "hlo!");
    }

    #[test]
    fn input_window_keeps_cursor_visible() {
        let mut field = InputField::default();
        type_into(&mut field, "abcdefghij");

        let (visible, col) = field.window(4);
        assert_eq!(visible, "hij");
        assert_eq!(col, 3);

        field.move_home();
        let (visible, col) = field.window(4);
        assert_eq!(visible, "abcd");
        assert_eq!(col, 0);
    }
}
