use unicode_width::UnicodeWidthChar;

/// Single-line text buffer backing an inline card editor.
///
/// The cursor is a character index; [`EditBuffer::window`] converts it to a
/// terminal column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer seeded with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn insert(&mut self, c: char) {
        if c == '\n' || c == '\r' {
            return;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Visible slice of the buffer for a field `width` cells wide, and the
    /// cursor's cell column inside that slice.
    pub fn window(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // The cursor cell itself needs room, one cell past the end of text.
        let mut used = self.chars.get(self.cursor).map_or(1, |c| cell_width(*c).max(1));
        let mut start = self.cursor;
        while start > 0 {
            let cells = cell_width(self.chars[start - 1]);
            if used + cells > width {
                break;
            }
            used += cells;
            start -= 1;
        }

        let mut visible = String::new();
        let mut cells = 0;
        for &c in &self.chars[start..] {
            let w = cell_width(c);
            if cells + w > width {
                break;
            }
            visible.push(c);
            cells += w;
        }
        let column = self.chars[start..self.cursor].iter().map(|c| cell_width(*c)).sum();
        (visible, column)
    }
}

fn cell_width(c: char) -> usize {
    c.width().unwrap_or(0)
}
