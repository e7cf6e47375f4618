//! Form panel renderer: the repo URL and commit hash inputs.
//!
//! The two inputs sit inside an outer titled block. The focused field gets
//! the active border, and in Insert mode the hardware cursor is positioned
//! inside it via `frame.set_cursor_position` so terminals render their native
//! cursor shape.

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, FieldFocus, InputField, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const REPO_URL_PLACEHOLDER: &str = "e.g. https://github.com/user/repo";
const COMMIT_HASH_PLACEHOLDER: &str = "optional, defaults to most recent";

/// Renders the form panel: outer titled block with the two input fields.
pub fn render_form(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let outer = panel_block(" Code Time Machine ", false, theme);
    let inner = inner_rect(area);
    frame.render_widget(outer, area);

    let [url_area, hash_area] = inner.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
    ]));

    render_input(
        frame,
        url_area,
        "Remote Repo URL",
        &state.repo_url,
        REPO_URL_PLACEHOLDER,
        FieldFocus::RepoUrl,
        state,
        theme,
    );
    render_input(
        frame,
        hash_area,
        "Commit Hash",
        &state.commit_hash,
        COMMIT_HASH_PLACEHOLDER,
        FieldFocus::CommitHash,
        state,
        theme,
    );
}

/// Renders one bordered input row and, when it is being edited, places the
/// hardware cursor at the field's cursor position.
#[allow(clippy::too_many_arguments)]
fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    field: &InputField,
    placeholder: &str,
    slot: FieldFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = state.focus == slot;
    let block = panel_block(title, is_focused, theme);
    let text_area = inner_rect(area);
    frame.render_widget(block, area);

    let (line, cursor_col) = if field.is_empty() {
        (
            Line::styled(placeholder.to_owned(), Style::default().fg(theme.input_placeholder)),
            0,
        )
    } else {
        let (visible, col) = field.window(text_area.width as usize);
        (
            Line::styled(visible, Style::default().fg(theme.input_text)),
            col,
        )
    };
    frame.render_widget(Paragraph::new(line), text_area);

    if is_focused && state.mode == Mode::Insert {
        frame.set_cursor_position(Position {
            x: text_area.x + cursor_col,
            y: text_area.y,
        });
    }
}
