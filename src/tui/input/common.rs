use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::line_edit::LineEdit;

/// Normalize key events so Shift+letter and uppercase letter compare equal.
/// Some terminals report Shift+g as `Char('g')` with SHIFT, others as `Char('G')`.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Ctrl+C leaves from any mode
pub(super) fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Apply a text-editing key to a line buffer. Returns false for keys that
/// are not editing keys, so the caller can handle them.
pub(super) fn edit_line(edit: &mut LineEdit, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            edit.insert(c)
        }
        KeyCode::Backspace => edit.backspace(),
        KeyCode::Delete => edit.delete(),
        KeyCode::Left => edit.left(),
        KeyCode::Right => edit.right(),
        KeyCode::Home => edit.home(),
        KeyCode::End => edit.end(),
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => edit.home(),
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => edit.end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_letter_becomes_uppercase() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('G'));
        let key = normalize_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE));
        assert_eq!(key.code, KeyCode::Char('g'));
    }

    #[test]
    fn edit_line_ignores_control_chars() {
        let mut e = LineEdit::with_text("ab");
        assert!(edit_line(&mut e, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert_eq!(e.cursor(), 0);
        assert!(!edit_line(&mut e, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)));
        assert!(!edit_line(&mut e, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(e.as_str(), "ab");
    }
}
