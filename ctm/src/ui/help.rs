//! Help overlay renderer.
//!
//! Draws a centred modal box over the existing layout using ratatui's
//! `Clear` widget to erase the background first. The overlay is rendered
//! inside the same `terminal.draw()` closure as all other panels — calling
//! `frame.render_widget(Clear, area)` before the bordered `Paragraph`
//! achieves the modal effect without a second draw call.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the layout.
///
/// The paragraph scrolls vertically by `help_scroll` rows, enabling
/// navigation of the help text on short terminals. Skipped entirely on very
/// narrow terminals to avoid a zero-height `Rect`.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    // Erase the background behind the modal before drawing content.
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  — j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value, grouped by section.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Form"),
        Line::from("  Tab / Up / Down   Switch between URL and hash fields"),
        Line::from("  i / Enter         Edit the focused field"),
        Line::from("  Esc               Leave editing"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  n                 New analysis (clears everything, deletes the"),
        Line::from("                    backend's working copy)"),
        Line::from("  h                 Fetch commit history (needs an empty hash field)"),
        Line::from("  a                 Analyze commit (needs a repo URL; empty hash"),
        Line::from("                    analyzes the most recent commit)"),
        Line::from(""),
        Line::from("Content"),
        Line::from("  j / k             Scroll down / up one line"),
        Line::from("  g / G             Jump to top / bottom"),
        Line::from("  Ctrl-d / Ctrl-u   Scroll half page down / up"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?                 Open / close this help overlay"),
        Line::from("  q / Esc           Quit"),
    ])
}
