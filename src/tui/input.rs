//! Single-line text field used by the Add view.
//!
//! The caret is a char index into `value` (0..=char count), so multi-byte
//! input never splits a character.

pub const DEFAULT_PLACEHOLDER: &str = "Do the thing";
pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_CHAR_LIMIT: usize = 156;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    caret: usize,
    pub placeholder: String,
    pub width: usize,
    pub char_limit: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            caret: 0,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            width: DEFAULT_WIDTH,
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }

    #[cfg(test)]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Clears the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        self.caret = 0;
        std::mem::take(&mut self.value)
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.caret = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() || self.char_count() >= self.char_limit {
            return;
        }
        let at = self.byte_offset(self.caret);
        self.value.insert(at, c);
        self.caret += 1;
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_offset(self.caret);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.caret < self.char_count() {
            let at = self.byte_offset(self.caret);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.caret < self.char_count() {
            self.caret += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.caret = self.char_count();
    }

    /// Deletes back to the start of the previous word, skipping any
    /// whitespace directly before the caret first.
    pub fn delete_word_backward(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.caret;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(self.caret);
        self.value.replace_range(from..to, "");
        self.caret = start;
    }

    pub fn delete_to_start(&mut self) {
        let to = self.byte_offset(self.caret);
        self.value.replace_range(..to, "");
        self.caret = 0;
    }

    pub fn delete_to_end(&mut self) {
        let from = self.byte_offset(self.caret);
        self.value.truncate(from);
    }

    /// The slice of the value that fits in `width` columns while keeping
    /// the caret visible, and the caret's column inside that slice.
    pub fn visible(&self) -> (String, usize) {
        let width = self.width.max(1);
        // One column is reserved for the caret when it sits past the end.
        let first = (self.caret + 1).saturating_sub(width);
        let text: String = self.value.chars().skip(first).take(width).collect();
        (text, self.caret - first)
    }
}
