/// Single-line text buffer with a byte-offset cursor on char boundaries.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_move() {
        let mut input = InputState::new();
        input.insert_char('a');
        input.insert_char('c');
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.as_str(), "abc");
        assert_eq!(input.cursor_column(), 2);

        input.move_home();
        input.move_left();
        assert_eq!(input.cursor_column(), 0);
        input.move_end();
        input.move_right();
        assert_eq!(input.cursor_column(), 3);
    }

    #[test]
    fn test_backspace_and_delete_multibyte() {
        let mut input = InputState::new();
        input.insert_char('a');
        input.insert_char('\u{00e9}');
        input.insert_char('b');
        input.backspace();
        assert_eq!(input.as_str(), "a\u{00e9}");

        input.move_home();
        input.move_right();
        input.delete();
        assert_eq!(input.as_str(), "a");
        assert_eq!(input.cursor_column(), 1);

        input.move_home();
        input.backspace();
        assert_eq!(input.as_str(), "a");
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut input = InputState::new();
        input.insert_char(' ');
        assert!(input.is_empty());
        input.insert_char('x');
        assert!(!input.is_empty());
        input.clear();
        assert_eq!(input.as_str(), "");
    }
}
