//! Commit history panel renderer.
//!
//! Renders the history view as a stateful list, one row per commit in the
//! exact order the backend returned them: abbreviated hash, message subject,
//! author, and date.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use ctm_client::CommitSummary;

use crate::app::{ActiveView, AppState};
use crate::theme::Theme;
use crate::ui::format_date;
use crate::ui::layout::panel_block;

const HASH_WIDTH: usize = 8;

/// Renders the history view into the content panel.
///
/// Uses `render_stateful_widget` so the selection highlight follows j/k
/// scrolling. The commit count is shown in the panel title.
pub fn render_history(frame: &mut Frame, area: ratatui::layout::Rect, state: &mut AppState, theme: &Theme) {
    // Rows and list state are sibling fields; destructure so the borrows stay
    // disjoint while rendering.
    let AppState { view, history_list_state, .. } = state;
    let ActiveView::History(commits) = view else {
        return;
    };

    let title = format!("Commit History ({})", commits.len());
    let block = panel_block(&title, true, theme);

    let items: Vec<ListItem> = if commits.is_empty() {
        vec![ListItem::new(Line::raw("No commits returned."))]
    } else {
        commits.iter().map(|c| commit_item(c, theme)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active));

    frame.render_stateful_widget(list, area, history_list_state);
}

/// Converts one commit into a styled row.
///
/// Format: `90e5a216  Fix widget alignment  Jo Developer  2024-03-01 12:34`.
/// Only the first line of the message is shown; full messages belong to the
/// analysis view.
fn commit_item(c: &CommitSummary, theme: &Theme) -> ListItem<'static> {
    let short_hash: String = c.hash.chars().take(HASH_WIDTH).collect();
    let subject = c.message.lines().next().unwrap_or("").to_owned();

    ListItem::new(Line::from(vec![
        Span::styled(format!("{short_hash}  "), Style::default().fg(theme.commit_hash)),
        Span::styled(subject, Style::default().fg(theme.body_text)),
        Span::styled(format!("  {}", c.author), Style::default().fg(theme.commit_author)),
        Span::styled(
            format!("  {}", format_date(&c.date)),
            Style::default().fg(theme.commit_date),
        ),
    ]))
}
