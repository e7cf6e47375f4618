//! Commit analysis panel renderer.
//!
//! Renders one `AnalysisResult`: a commit metadata header followed by the
//! backend's analysis and fix-suggestion text, verbatim. The backend often
//! emits markdown — it is displayed as plain text, scrollable and wrapped.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use ctm_client::AnalysisResult;

use crate::theme::Theme;
use crate::ui::format_date;
use crate::ui::layout::panel_block;

/// Renders the analysis view into the content panel.
///
/// The paragraph scrolls vertically by `scroll` rows (j/k in Normal mode).
pub fn render_analysis(
    frame: &mut Frame,
    area: Rect,
    result: &AnalysisResult,
    scroll: u16,
    theme: &Theme,
) {
    let block = panel_block("Commit Analysis", true, theme);

    frame.render_widget(
        Paragraph::new(build_analysis_text(result, theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

/// Builds the full analysis text: metadata header, then the two backend
/// sections with styled headings.
fn build_analysis_text(result: &AnalysisResult, theme: &Theme) -> Text<'static> {
    let meta = &result.commit_metadata;
    let label_style = Style::default().fg(theme.commit_date);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Commit   ", label_style),
            Span::styled(meta.hash.clone(), Style::default().fg(theme.commit_hash)),
        ]),
        Line::from(vec![
            Span::styled("Author   ", label_style),
            Span::styled(meta.author.clone(), Style::default().fg(theme.commit_author)),
        ]),
        Line::from(vec![
            Span::styled("Date     ", label_style),
            Span::styled(format_date(&meta.date), Style::default().fg(theme.commit_date)),
        ]),
        Line::from(vec![
            Span::styled("Message  ", label_style),
            Span::styled(meta.message.clone(), Style::default().fg(theme.body_text)),
        ]),
    ];

    push_section(&mut lines, "Analysis", &result.analysis, theme);
    push_section(&mut lines, "Suggested Fix", &result.fix_suggestion, theme);

    Text::from(lines)
}

/// Appends a blank separator, a styled section heading, and the section body
/// line by line.
fn push_section(lines: &mut Vec<Line<'static>>, heading: &str, body: &str, theme: &Theme) {
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        heading.to_owned(),
        Style::default().fg(theme.section_heading).add_modifier(Modifier::BOLD),
    )));
    for raw in body.lines() {
        lines.push(Line::styled(raw.to_owned(), Style::default().fg(theme.body_text)));
    }
}
