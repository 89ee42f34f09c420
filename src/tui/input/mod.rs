mod common;
mod confirm;
mod dialog;
mod navigate;
mod quick_add;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use common::{is_force_quit, normalize_key};
use confirm::handle_confirm;
use dialog::handle_dialog;
use navigate::handle_navigate;
use quick_add::handle_quick_add;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::QuickAdd => handle_quick_add(app, key),
        Mode::Dialog => handle_dialog(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::Store;
    use crate::model::{Config, Filter, Status, Weekday};
    use crate::tui::dialog::FormField;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn temp_app() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("tasks.db")).unwrap();
        let app = App::new(store, &Config::default()).unwrap();
        (tmp, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn quick_add_then_toggle() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, Mode::QuickAdd);
        type_str(&mut app, "Read book");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.task_count(), 1);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.selected_task().unwrap().status, Status::Complete);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.selected_task().unwrap().status, Status::Incomplete);
    }

    #[test]
    fn quick_add_keys_are_text_not_commands() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "q1");
        assert_eq!(app.mode, Mode::QuickAdd);
        assert!(!app.should_quit);
        assert_eq!(app.quick_add.as_str(), "q1");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        // Draft survives cancel
        assert_eq!(app.quick_add.as_str(), "q1");
    }

    #[test]
    fn tab_keys_switch_filter() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter(), Filter::Complete);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.filter(), Filter::All);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.filter(), Filter::Complete);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter(), Filter::Incomplete);
    }

    #[test]
    fn dialog_keyboard_flow() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Dialog);
        type_str(&mut app, "Yoga");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        type_str(&mut app, "06:30");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        let task = app.selected_task().unwrap();
        assert_eq!(task.name, "Yoga");
        assert_eq!(task.day, Some(Weekday::Tuesday));
        assert_eq!(task.start_time.as_deref(), Some("06:30"));
    }

    #[test]
    fn dialog_error_clears_on_edit() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert!(app.dialog.as_ref().unwrap().error.is_some());
        press(&mut app, KeyCode::Char('z'));
        let dialog = app.dialog.as_ref().unwrap();
        assert!(dialog.error.is_none());
        assert_eq!(dialog.focus, FormField::Title);
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_none());
        assert_eq!(app.task_count(), 0);
    }

    #[test]
    fn delete_with_confirm() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('i'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.task_count(), 1);

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.task_count(), 0);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn quit_keys() {
        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (_tmp, mut app) = temp_app();
        press(&mut app, KeyCode::Char('n'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
