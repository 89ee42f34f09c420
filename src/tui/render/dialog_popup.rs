use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::dialog::{Dialog, FormField};
use crate::util::text::{display_width, fit_to_width};

use super::helpers::cursor_spans;

const LABEL_W: usize = 20;

/// Render the add/edit dialog centered over `area`
pub fn render_dialog_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };
    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", dialog.heading()),
        header_style,
    )));
    lines.push(Line::from(""));
    for field in FormField::ALL {
        lines.push(field_line(app, dialog, field, inner_w));
    }
    lines.push(Line::from(""));
    if let Some(err) = &dialog.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }
    lines.push(Line::from(Span::styled(
        " Enter confirmar  Esc cancelar  Tab campo  \u{2190}\u{2192} opção",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    // Dynamic height from content + 2 for borders
    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn field_line(app: &App, dialog: &Dialog, field: FormField, inner_w: usize) -> Line<'static> {
    let focused = dialog.focus == field;
    let bg = if focused {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let label_style = Style::default()
        .fg(if focused { app.theme.text_bright } else { app.theme.dim })
        .bg(bg);
    let value_style = Style::default().fg(app.theme.text).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut spans = vec![Span::styled(
        fit_to_width(&format!(" {}", field.label()), LABEL_W),
        label_style,
    )];
    let value_w = inner_w.saturating_sub(LABEL_W);

    if field.is_picker() {
        let value = match dialog.value_text(field) {
            "" => "\u{2014}",
            v => v,
        };
        if focused {
            spans.push(Span::styled("\u{2039} ", cursor_style));
            spans.push(Span::styled(value.to_string(), value_style));
            spans.push(Span::styled(" \u{203A}", cursor_style));
        } else {
            spans.push(Span::styled(fit_to_width(value, value_w), value_style));
        }
    } else if focused {
        let edit = match field {
            FormField::Title => &dialog.title,
            FormField::StartTime => &dialog.start_time,
            _ => &dialog.end_time,
        };
        spans.extend(cursor_spans(edit, value_style, cursor_style));
    } else {
        spans.push(Span::styled(
            fit_to_width(dialog.value_text(field), value_w),
            value_style,
        ));
    }

    // Fill the rest of the row so the focus band spans the popup
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < inner_w {
        spans.push(Span::styled(" ".repeat(inner_w - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
