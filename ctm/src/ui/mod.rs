//! UI rendering module for ctm.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the single
//! entry point called by the event loop's `terminal.draw()` closure.
//!
//! Layout arithmetic and the status bar live in `layout.rs`. The form panel
//! lives in `form.rs`, the two content renderers in `history.rs` and
//! `analysis.rs`, the help overlay in `help.rs`, and all input dispatch in
//! `keybindings.rs`.

mod layout;
pub mod analysis;
pub mod form;
pub mod help;
pub mod history;
pub mod keybindings;

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{ActiveView, AppState, Mode};
use crate::theme::Theme;
use layout::{inner_rect, panel_block, render_status_bar};

/// Renders one complete frame: form panel, content panel, and status bar.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`. This
/// is the only location where `terminal.draw()` is called in the application
/// — never call it from anywhere else.
///
/// The content viewport height is written back into `state` before panels
/// render so half-page scroll distances triggered by the *next* keypress are
/// correct. The one-frame lag is imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [form_area, content_area, status_bar] = layout::compute_layout(frame);

    state.content_viewport_height = inner_rect(content_area).height;

    form::render_form(frame, form_area, state, theme);

    // Content panel: exactly one renderer draws, keyed by the view tag.
    // History needs the list state mutably alongside the rows, so it
    // destructures AppState itself.
    if matches!(state.view, ActiveView::History(_)) {
        history::render_history(frame, content_area, state, theme);
    } else if let ActiveView::Analysis(result) = &state.view {
        analysis::render_analysis(frame, content_area, result, state.analysis_scroll, theme);
    } else {
        render_placeholder(frame, content_area, state, theme);
    }

    render_status_bar(frame, status_bar, state, theme);

    // Help overlay: rendered after all panels so it sits on top.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

/// Renders the content panel when nothing has been fetched yet.
fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Results", false, theme);
    let msg = if state.loading {
        "Working..."
    } else {
        "Enter a repository URL, then press 'a' to analyze a commit or 'h' to list recent commits."
    };
    frame.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(theme.input_placeholder))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Formats a backend ISO-8601 timestamp for display.
///
/// Falls back to the raw string when the backend sends something chrono
/// cannot parse.
pub(crate) fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::format_date;

    #[test]
    fn format_date_renders_iso_timestamps() {
        assert_eq!(format_date("2024-03-01T12:34:56+00:00"), "2024-03-01 12:34");
    }

    #[test]
    fn format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
