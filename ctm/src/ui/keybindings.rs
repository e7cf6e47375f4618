//! Keybinding dispatcher for ctm.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns
//! a `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so HelpOverlay, Insert, and
//! Normal have isolated handler functions.
//!
//! Action keys (`n`/`h`/`a`) go through the `net::request_*` functions, which
//! enforce the same guards the status bar displays: history is refused while
//! a commit hash is entered or a request is loading, analysis while the repo
//! URL is empty or a request is loading.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{AppState, Mode};
use crate::net;

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` proceeds to the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place and returns a `KeyAction` signalling whether to
/// continue or quit.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Insert => handle_insert(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Delegates scroll keys to `handle_scroll_key` and handles field focus,
/// action keys, and mode transitions inline.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // Field focus — two fields, so next() covers both directions.
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }

        // Enter editing of the focused field.
        KeyCode::Char('i') | KeyCode::Enter => {
            state.mode = Mode::Insert;
            KeyAction::Continue
        }

        // Backend actions (guards live in the request functions). New
        // Analysis is deliberately unguarded: pressing it mid-request
        // supersedes the in-flight fetch via the request slot.
        KeyCode::Char('n') => {
            net::request_new_analysis(state);
            KeyAction::Continue
        }
        KeyCode::Char('h') => {
            net::request_commit_history(state);
            KeyAction::Continue
        }
        KeyCode::Char('a') => {
            net::request_analyze_commit(state);
            KeyAction::Continue
        }

        // Help overlay
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        _ => KeyAction::Continue,
    }
}

/// Handles scroll-related keys in Normal mode: j / k / g / G and Ctrl combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('k') => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('g') => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('G') => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Handles a key event while editing the focused form field.
///
/// `Esc` and `Enter` return to Normal mode; `Tab` hops to the other field
/// without leaving Insert. Everything else edits the field, ignoring
/// Ctrl/Alt chords so terminal shortcuts don't leak characters into the URL.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = state.focus.next();
        }
        KeyCode::Left => state.focused_field_mut().move_left(),
        KeyCode::Right => state.focused_field_mut().move_right(),
        KeyCode::Home => state.focused_field_mut().move_home(),
        KeyCode::End => state.focused_field_mut().move_end(),
        KeyCode::Backspace => state.focused_field_mut().backspace(),
        KeyCode::Delete => state.focused_field_mut().delete(),
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            state.focused_field_mut().insert_char(c);
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// `?`, `Esc`, or `q` dismisses the overlay; j/k/g/G scroll it. All other
/// keys are silently ignored.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles scroll-wheel events: 3 lines per notch, matching typical terminal
/// scroll speed. Wheel events in HelpOverlay mode scroll the overlay.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ActiveView, FieldFocus};
    use crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        state.mode = Mode::Insert;
        for c in text.chars() {
            handle_key(press(KeyCode::Char(c)), state);
        }
        handle_key(press(KeyCode::Esc), state);
    }

    #[test]
    fn q_quits_from_normal_mode() {
        let mut state = AppState::default();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn insert_mode_edits_focused_field() {
        let mut state = AppState::default();
        handle_key(press(KeyCode::Char('i')), &mut state);
        assert_eq!(state.mode, Mode::Insert);

        for c in "https://x".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_key(press(KeyCode::Backspace), &mut state);
        assert_eq!(state.repo_url.as_str(), "https://");

        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn tab_switches_fields_in_both_modes() {
        let mut state = AppState::default();
        assert_eq!(state.focus, FieldFocus::RepoUrl);
        handle_key(press(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, FieldFocus::CommitHash);

        state.mode = Mode::Insert;
        handle_key(press(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, FieldFocus::RepoUrl);
        assert_eq!(state.mode, Mode::Insert, "Tab must not leave Insert mode");
    }

    #[test]
    fn analyze_key_is_inert_without_repo_url() {
        let mut state = AppState::default();
        handle_key(press(KeyCode::Char('a')), &mut state);
        assert!(!state.loading, "guard must block the request");
        assert!(state.error.is_none());
    }

    #[test]
    fn analyze_key_fires_with_repo_url() {
        let mut state = AppState::default();
        type_text(&mut state, "https://github.com/acme/widgets");
        handle_key(press(KeyCode::Char('a')), &mut state);
        assert!(state.loading);
    }

    #[test]
    fn history_key_is_inert_while_hash_is_entered() {
        let mut state = AppState::default();
        handle_key(press(KeyCode::Tab), &mut state); // focus hash field
        type_text(&mut state, "90e5a216");
        handle_key(press(KeyCode::Char('h')), &mut state);
        assert!(!state.loading, "guard must block the request");
    }

    #[test]
    fn new_analysis_key_resets_session() {
        let mut state = AppState::default();
        type_text(&mut state, "https://github.com/acme/widgets");
        state.error = Some("boom".to_owned());

        handle_key(press(KeyCode::Char('n')), &mut state);

        assert!(state.repo_url.is_empty());
        assert!(state.error.is_none());
        assert!(matches!(state.view, ActiveView::Empty));
        assert!(state.loading);
    }

    #[test]
    fn action_keys_are_inert_while_loading() {
        let mut state = AppState::default();
        type_text(&mut state, "https://github.com/acme/widgets");
        handle_key(press(KeyCode::Char('a')), &mut state);
        assert!(state.loading);

        // A second press while loading must not claim a new request slot.
        let seq_probe = state.requests.begin();
        state.loading = true;
        handle_key(press(KeyCode::Char('a')), &mut state);
        assert!(state.requests.is_current(seq_probe));
    }

    #[test]
    fn help_overlay_opens_and_dismisses() {
        let mut state = AppState::default();
        handle_key(press(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);

        handle_key(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);

        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }
}
