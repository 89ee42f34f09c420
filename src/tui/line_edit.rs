use crate::util::text::{next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text buffer with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEdit {
    buffer: String,
    cursor: usize,
}

impl LineEdit {
    /// Start with `text`, cursor at the end
    pub fn with_text(text: &str) -> Self {
        LineEdit {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Empty the buffer and return what was in it
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_deleting() {
        let mut e = LineEdit::default();
        for c in "Buy mlk".chars() {
            e.insert(c);
        }
        e.left();
        e.left();
        e.insert('i');
        assert_eq!(e.as_str(), "Buy milk");
        e.end();
        e.backspace();
        assert_eq!(e.as_str(), "Buy mil");
        e.home();
        e.delete();
        assert_eq!(e.as_str(), "uy mil");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut e = LineEdit::with_text("Sábado");
        e.home();
        e.right();
        e.right();
        e.backspace();
        assert_eq!(e.as_str(), "Sbado");
        assert_eq!(e.cursor(), 1);
    }

    #[test]
    fn take_clears() {
        let mut e = LineEdit::with_text("x");
        assert_eq!(e.take(), "x");
        assert!(e.is_empty());
        assert_eq!(e.cursor(), 0);
        e.backspace();
        e.left();
        assert_eq!(e.cursor(), 0);
    }
}
