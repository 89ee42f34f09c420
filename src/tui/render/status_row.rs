use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, NoticeKind};
use crate::util::text::truncate_to_width;

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if app.mode == Mode::Confirm {
        let name = app
            .pending_delete
            .and_then(|id| app.list.get(id))
            .map_or("", |t| t.name.as_str());
        spans.push(Span::styled(
            truncate_to_width(&format!(" Excluir \"{}\"?", name), width.saturating_sub(8)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" (y/n)", Style::default().fg(app.theme.highlight).bg(bg)));
    } else if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Warning => app.theme.yellow,
            NoticeKind::Error => app.theme.red,
        };
        spans.push(Span::styled(
            truncate_to_width(&format!(" {}", notice.text), width),
            Style::default().fg(color).bg(bg),
        ));
    }

    // Right-aligned key hints when there is room
    if app.show_key_hints {
        let hint = key_hint(app.mode);
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count() + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "i rápida  n nova  e editar  spc marcar  d excluir  1-3 abas  q sair",
        Mode::QuickAdd => "Enter adicionar  Esc voltar",
        Mode::Dialog => "Enter confirmar  Esc cancelar",
        Mode::Confirm => "y excluir  n manter",
    }
}
