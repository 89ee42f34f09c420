pub mod dialog_popup;
pub mod helpers;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};
use helpers::{cursor_spans, spans_width};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | quick-add | tab bar (2 rows) | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // quick-add field
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_quick_add(frame, app, chunks[1]);
    tab_bar::render_tab_bar(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3]);

    // Dialog (rendered on top of the list)
    if app.dialog.is_some() {
        dialog_popup::render_dialog_popup(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let mut spans = vec![Span::styled(
        " Minhas Tarefas",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    let count = format!("{} ", app.task_count());
    let used = spans_width(&spans) + count.len();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_quick_add(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::QuickAdd;
    let prompt_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut spans = vec![Span::styled(" + ", Style::default().fg(prompt_color).bg(bg))];

    if focused {
        let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
        let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
        spans.extend(cursor_spans(&app.quick_add, text_style, cursor_style));
    } else if app.quick_add.is_empty() {
        spans.push(Span::styled(
            "Adicionar tarefa",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            app.quick_add.as_str().to_string(),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
