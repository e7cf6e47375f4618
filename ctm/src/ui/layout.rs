//! Screen layout and status bar for ctm.
//!
//! This module is pure layout arithmetic plus the 1-row status bar — no
//! mutable application state lives here. It is called inside
//! `terminal.draw()` on every render so every frame gets a fresh layout that
//! automatically reflects the current terminal size.
//!
//! The screen is a vertical stack: form panel (fixed 8 rows — two bordered
//! inputs inside an outer titled block), content panel (fills the remaining
//! height), status bar (1 row).

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Height of the form panel: outer border (2) + two 3-row input blocks.
pub const FORM_HEIGHT: u16 = 8;

/// Returns `[form, content, status_bar]` `Rect`s for the current frame.
///
/// Called inside `terminal.draw()` on every render. The returned rects are
/// valid only for the current draw closure — never store them across frames.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(FORM_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on
/// each side.
///
/// Used to cache the content viewport height in `AppState` before panels are
/// rendered, so half-page scroll distances are available at keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Applies `BorderType::Thick` when the panel is focused and
/// `BorderType::Plain` otherwise. `MergeStrategy::Fuzzy` lets adjacent
/// borders merge their junction characters when blocks touch.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Left to right: mode indicator, guard-aware action hints (unavailable
/// actions are dimmed — the TUI rendition of disabled buttons), then the
/// transient segments: spinner + `Loading...` while a request is in flight,
/// an offline marker when the startup probe failed, and the current error.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };

    let hint = |key: &'static str, label: &'static str, enabled: bool| {
        let fg = if enabled { theme.hint_enabled } else { theme.hint_disabled };
        Span::styled(format!(" {key}:{label}"), Style::default().fg(fg))
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        hint("n", "new", true),
        hint("h", "history", state.can_fetch_history()),
        hint("a", "analyze", state.can_analyze()),
        hint("i", "edit", true),
        hint("?", "help", true),
        hint("q", "quit", true),
    ];

    if state.loading {
        spans.push(Span::styled(
            format!("  {} Loading...", state.spinner_glyph()),
            Style::default().fg(theme.loading),
        ));
    }
    if state.backend_online == Some(false) {
        spans.push(Span::styled(
            "  backend offline",
            Style::default().fg(theme.offline).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(error) = &state.error {
        spans.push(Span::styled(
            format!("  ✗ {error}"),
            Style::default().fg(theme.error),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
