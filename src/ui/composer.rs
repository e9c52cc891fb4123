use unicode_width::UnicodeWidthStr;

/// Multi-line text buffer behind the message composer. Holds the draft and a
/// byte-indexed cursor; [`Composer::take`] drains it on submit.
#[derive(Debug, Default, Clone)]
pub struct Composer {
    text: String,
    cursor: usize,
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Return the full draft and reset the buffer to empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor = self.text[..self.cursor]
            .rfind('\n')
            .map(|idx| idx + 1)
            .unwrap_or(0);
    }

    pub fn move_line_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map(|idx| self.cursor + idx)
            .unwrap_or(self.text.len());
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Cursor location as (row, display column) for terminal placement.
    pub fn cursor_rowcol(&self) -> (u16, u16) {
        let head = &self.text[..self.cursor];
        let row = head.matches('\n').count();
        let line_head = head.rsplit_once('\n').map(|(_, rest)| rest).unwrap_or(head);
        (row as u16, line_head.width() as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer_with(text: &str) -> Composer {
        let mut composer = Composer::default();
        composer.insert_str(text);
        composer
    }

    #[test]
    fn take_returns_draft_and_clears() {
        let mut composer = composer_with("hello");
        assert_eq!(composer.take(), "hello");
        assert!(composer.is_empty());
        assert_eq!(composer.cursor_rowcol(), (0, 0));
    }

    #[test]
    fn newline_extends_draft_without_submitting_anything() {
        let mut composer = composer_with("line one");
        composer.newline();
        composer.insert_str("line two");
        assert_eq!(composer.text(), "line one\nline two");
        assert_eq!(composer.line_count(), 2);
    }

    #[test]
    fn backspace_removes_whole_multibyte_char() {
        let mut composer = composer_with("héllo");
        for _ in 0..4 {
            composer.backspace();
        }
        assert_eq!(composer.text(), "h");
    }

    #[test]
    fn delete_forward_at_cursor() {
        let mut composer = composer_with("abc");
        composer.move_line_start();
        composer.delete_forward();
        assert_eq!(composer.text(), "bc");
        composer.move_right();
        composer.move_right();
        composer.delete_forward();
        assert_eq!(composer.text(), "bc");
    }

    #[test]
    fn cursor_movement_stays_on_char_boundaries() {
        let mut composer = composer_with("aé");
        composer.move_left();
        composer.insert_char('x');
        assert_eq!(composer.text(), "axé");
    }

    #[test]
    fn rowcol_tracks_lines_and_columns() {
        let mut composer = composer_with("ab\ncde");
        assert_eq!(composer.cursor_rowcol(), (1, 3));
        composer.move_line_start();
        assert_eq!(composer.cursor_rowcol(), (1, 0));
        composer.move_line_end();
        assert_eq!(composer.cursor_rowcol(), (1, 3));
    }
}
