use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Any key dismisses the current notice; Esc does nothing else
    if app.notice.take().is_some() && key.code == KeyCode::Esc {
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor_to(0),
        (_, KeyCode::Char('G') | KeyCode::End) => app.cursor_to(usize::MAX),
        (_, KeyCode::PageDown) => app.move_cursor(10),
        (_, KeyCode::PageUp) => app.move_cursor(-10),

        // Tabs
        (_, KeyCode::Char('1')) => app.set_filter(Filter::All),
        (_, KeyCode::Char('2')) => app.set_filter(Filter::Incomplete),
        (_, KeyCode::Char('3')) => app.set_filter(Filter::Complete),
        (KeyModifiers::NONE, KeyCode::Tab) => app.set_filter(app.filter().next()),
        (_, KeyCode::BackTab) => app.set_filter(app.filter().prev()),

        // Task actions
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => app.toggle_selected(),
        (_, KeyCode::Enter | KeyCode::Char('e')) => app.open_edit_dialog(),
        (_, KeyCode::Char('n')) => app.open_add_dialog(),
        (_, KeyCode::Char('i') | KeyCode::Char('a')) => app.start_quick_add(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => app.request_delete(),
        (_, KeyCode::Char('r')) => app.reload(app.selected_id()),
        _ => {}
    }
}
