/// How a rename prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
}

/// Single-line text entry used to pick a new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePrompt {
    /// Virtual path of the entry being renamed.
    pub target: String,
    pub input: String,
    /// Cursor position as a byte offset into `input`.
    pub cursor_position: usize,
}

impl RenamePrompt {
    /// Start editing with `initial` as the prefilled text, cursor at the end.
    pub fn new(target: impl Into<String>, initial: &str) -> Self {
        Self {
            target: target.into(),
            input: initial.to_string(),
            cursor_position: initial.len(),
        }
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    /// Move cursor left by one character.
    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input.len();
    }

    /// Finish editing. Blank input counts as cancellation.
    pub fn submit(self) -> PromptOutcome {
        let name = self.input.trim();
        if name.is_empty() {
            PromptOutcome::Cancelled
        } else {
            PromptOutcome::Submitted(name.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefills_with_cursor_at_end() {
        let prompt = RenamePrompt::new("/dir/hello.txt", "hello.txt");
        assert_eq!(prompt.input, "hello.txt");
        assert_eq!(prompt.cursor_position, 9);
    }

    #[test]
    fn insert_and_delete() {
        let mut prompt = RenamePrompt::new("/a", "");
        prompt.insert_char('a');
        prompt.insert_char('b');
        prompt.insert_char('c');
        prompt.delete_char();
        assert_eq!(prompt.input, "ab");
        assert_eq!(prompt.cursor_position, 2);
    }

    #[test]
    fn delete_at_start_is_noop() {
        let mut prompt = RenamePrompt::new("/a", "xy");
        prompt.cursor_home();
        prompt.delete_char();
        assert_eq!(prompt.input, "xy");
        assert_eq!(prompt.cursor_position, 0);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut prompt = RenamePrompt::new("/a", "añb");
        prompt.move_cursor_left();
        prompt.move_cursor_left();
        assert_eq!(prompt.cursor_position, 1);
        prompt.insert_char('_');
        assert_eq!(prompt.input, "a_ñb");
        prompt.move_cursor_right();
        prompt.move_cursor_right();
        prompt.move_cursor_right();
        assert_eq!(prompt.cursor_position, prompt.input.len());
    }

    #[test]
    fn home_and_end() {
        let mut prompt = RenamePrompt::new("/a", "abc");
        prompt.cursor_home();
        assert_eq!(prompt.cursor_position, 0);
        prompt.cursor_end();
        assert_eq!(prompt.cursor_position, 3);
    }

    #[test]
    fn submit_returns_trimmed_name() {
        let prompt = RenamePrompt::new("/a", " new.txt ");
        assert_eq!(prompt.submit(), PromptOutcome::Submitted("new.txt".into()));
    }

    #[test]
    fn blank_submit_is_cancel() {
        let prompt = RenamePrompt::new("/a", "   ");
        assert_eq!(prompt.submit(), PromptOutcome::Cancelled);
    }
}
