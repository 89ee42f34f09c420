use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::common::edit_line;

pub(super) fn handle_quick_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_quick_add(),
        KeyCode::Esc => app.cancel_quick_add(),
        _ => {
            app.notice = None;
            edit_line(&mut app.quick_add, key);
        }
    }
}
