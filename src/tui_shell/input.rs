/// Editable text with a cursor counted in chars, not bytes.
#[derive(Debug, Default, Clone)]
pub(super) struct Input {
    pub(super) buf: String,
    pub(super) cursor: usize,
}

impl Input {
    pub(super) fn with_text(s: &str) -> Self {
        let mut input = Self::default();
        input.set(s.to_string());
        input
    }

    fn byte_at(&self, cursor: usize) -> usize {
        self.buf
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buf.len())
    }

    fn char_len(&self) -> usize {
        self.buf.chars().count()
    }

    pub(super) fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.buf.insert(at, c);
        self.cursor += 1;
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.buf.remove(at);
    }

    pub(super) fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.buf.remove(at);
    }

    pub(super) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub(super) fn move_home(&mut self) {
        let before = &self.buf[..self.byte_at(self.cursor)];
        self.cursor = match before.rfind('\n') {
            Some(nl) => before[..=nl].chars().count(),
            None => 0,
        };
    }

    pub(super) fn move_end(&mut self) {
        let at = self.byte_at(self.cursor);
        let rest = &self.buf[at..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        self.cursor += rest[..line_len].chars().count();
    }

    pub(super) fn set(&mut self, s: String) {
        self.buf = s;
        self.cursor = self.char_len();
    }

    /// Cursor as (row, column) within a multi-line buffer.
    pub(super) fn cursor_pos(&self) -> (u16, u16) {
        let before = &self.buf[..self.byte_at(self.cursor)];
        let row = before.matches('\n').count();
        let col = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count(),
            None => before.chars().count(),
        };
        (row as u16, col as u16)
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/input_tests.rs"]
mod tests;
