use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Task, Weekday};
use crate::ops::grouping::{self, ListRow, UNSCHEDULED_LABEL};
use crate::tui::app::App;
use crate::util::text::fit_to_width;

use super::helpers::status_symbol;

/// Leading indent plus "[x] "
const PREFIX_W: usize = 6;
const MIN_NAME_W: usize = 30;

/// Optional columns, each rendered with one leading space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Day,
    Start,
    End,
    Difficulty,
    Activity,
}

impl Column {
    fn width(self) -> usize {
        match self {
            Column::Day => 14,
            Column::Start | Column::End => 6,
            Column::Difficulty => 8,
            Column::Activity => 9,
        }
    }
}

/// Columns that fit beside a readable name, widest layout first
fn columns_for(width: usize) -> &'static [Column] {
    const LAYOUTS: [&[Column]; 4] = [
        &[
            Column::Day,
            Column::Start,
            Column::End,
            Column::Difficulty,
            Column::Activity,
        ],
        &[
            Column::Start,
            Column::End,
            Column::Difficulty,
            Column::Activity,
        ],
        &[Column::Start, Column::End],
        &[],
    ];
    LAYOUTS
        .into_iter()
        .find(|cols| {
            let used: usize = cols.iter().map(|c| c.width() + 1).sum();
            PREFIX_W + used + MIN_NAME_W <= width || cols.is_empty()
        })
        .unwrap_or(&[])
}

/// Render day headers and task rows for the current snapshot
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    if app.list.is_empty() {
        let empty = Paragraph::new(" Nenhuma tarefa")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    let width = area.width as usize;
    let (lines, scroll) = {
        let groups = app.groups();
        let rows = grouping::build_rows(&groups);

        // Keep the selected row, and its day header when it opens a group, in view
        let selected_row = rows
            .iter()
            .position(|r| matches!(r, ListRow::Task { index, .. } if *index == app.cursor))
            .unwrap_or(0);
        let top_row = match selected_row.checked_sub(1).map(|i| &rows[i]) {
            Some(ListRow::Header(_)) => selected_row - 1,
            _ => selected_row,
        };
        let mut scroll = app.scroll_offset;
        if top_row < scroll {
            scroll = top_row;
        } else if visible_height > 0 && selected_row >= scroll + visible_height {
            scroll = selected_row + 1 - visible_height;
        }

        let columns = columns_for(width);
        let lines: Vec<Line> = rows
            .iter()
            .skip(scroll)
            .take(visible_height)
            .map(|row| match row {
                ListRow::Header(day) => header_line(app, *day, width),
                ListRow::Task { index, task } => {
                    task_line(app, task, *index == app.cursor, columns, width)
                }
            })
            .collect();
        (lines, scroll)
    };

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
    app.scroll_offset = scroll;
}

fn header_line(app: &App, day: Option<Weekday>, width: usize) -> Line<'static> {
    let label = day.map_or(UNSCHEDULED_LABEL, Weekday::label);
    let style = Style::default()
        .fg(app.theme.purple)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    Line::from(Span::styled(fit_to_width(&format!(" {}", label), width), style))
}

fn task_line(
    app: &App,
    task: &Task,
    selected: bool,
    columns: &[Column],
    width: usize,
) -> Line<'static> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let mut name_style = Style::default().fg(app.theme.status_color(task.status)).bg(bg);
    if task.status.is_complete() {
        name_style = name_style.add_modifier(Modifier::CROSSED_OUT);
    } else if selected {
        name_style = name_style.fg(app.theme.text_bright);
    }
    let check_color = if task.status.is_complete() {
        app.theme.green
    } else {
        app.theme.text
    };

    let cols_w: usize = columns.iter().map(|c| c.width() + 1).sum();
    let name_w = width.saturating_sub(PREFIX_W + cols_w).max(1);

    let mut spans = vec![
        Span::styled("  ", dim),
        Span::styled(
            status_symbol(task.status),
            Style::default().fg(check_color).bg(bg),
        ),
        Span::styled(" ", dim),
        Span::styled(fit_to_width(&task.name, name_w), name_style),
    ];

    for col in columns {
        let (text, style) = match col {
            Column::Day => (task.day.map_or("", Weekday::label), dim),
            Column::Start => (task.start_time_str(), dim),
            Column::End => (task.end_time_str(), dim),
            Column::Difficulty => match task.difficulty {
                Some(d) => (d.label(), Style::default().fg(app.theme.difficulty_color(d)).bg(bg)),
                None => ("", dim),
            },
            Column::Activity => (
                task.activity_type.map_or("", |a| a.label()),
                Style::default().fg(app.theme.cyan).bg(bg),
            ),
        };
        spans.push(Span::styled(" ", dim));
        spans.push(Span::styled(fit_to_width(text, col.width()), style));
    }
    Line::from(spans)
}
