use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::common::edit_line;

pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_dialog();
            return;
        }
        KeyCode::Esc => {
            app.cancel_dialog();
            return;
        }
        _ => {}
    }

    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
        KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
        _ if dialog.focus.is_picker() => match key.code {
            KeyCode::Right | KeyCode::Char(' ') => dialog.cycle(true),
            KeyCode::Left => dialog.cycle(false),
            KeyCode::Backspace | KeyCode::Delete => dialog.clear_picker(),
            _ => return,
        },
        _ => {
            if let Some(edit) = dialog.focused_text()
                && !edit_line(edit, key)
            {
                return;
            }
        }
    }
    dialog.error = None;
}
