use ratatui::style::Style;
use ratatui::text::Span;

use crate::model::Status;
use crate::tui::line_edit::LineEdit;
use crate::util::text;

/// Checkbox for a task's status
pub(super) fn status_symbol(status: Status) -> &'static str {
    match status {
        Status::Incomplete => "[ ]",
        Status::Complete => "[x]",
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| text::display_width(&s.content))
        .sum()
}

/// Buffer text with a `▌` cursor at the edit position
pub(super) fn cursor_spans(
    edit: &LineEdit,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let (before, after) = edit.as_str().split_at(edit.cursor());
    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), text_style));
    }
    spans.push(Span::styled("\u{258C}", cursor_style));
    if !after.is_empty() {
        spans.push(Span::styled(after.to_string(), text_style));
    }
    spans
}
