//! Cursor position and horizontal scrolling for the single-line SearchBar.
//!
//! `CursorState` owns the cursor byte offset and the first visible column.
//! The text itself is owned by `SearchBar` and passed in explicitly.
//!
//! Column math is done in `usize`: the query has no length limit, so its
//! width can exceed what a terminal coordinate holds.

use unicode_width::UnicodeWidthChar;

/// Terminal columns a character occupies in the search field.
/// Control characters (pasted newlines, tabs) are drawn as a single `↵`.
pub(super) fn char_cols(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

pub(super) fn display_char(c: char) -> char {
    if c.is_control() { '↵' } else { c }
}

/// Total display width of `text` in columns.
pub(super) fn text_cols(text: &str) -> usize {
    text.chars().map(char_cols).sum()
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible display column (non-zero once text overflows the field)
    pub scroll_cols: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_cols: 0,
        }
    }

    /// Display column of the cursor, counted from the start of the text.
    pub fn column(&self, buffer: &str) -> usize {
        text_cols(&buffer[..self.pos])
    }

    /// Cursor column relative to the visible window, clamped to `width`.
    pub fn screen_column(&self, buffer: &str, width: u16) -> u16 {
        let col = self.column(buffer).saturating_sub(self.scroll_cols);
        col.min(usize::from(width)) as u16
    }

    /// Shift the visible window so the cursor stays inside `width` columns.
    pub fn update_scroll(&mut self, buffer: &str, width: u16) {
        let width = usize::from(width);
        if width == 0 {
            self.scroll_cols = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll_cols {
            self.scroll_cols = col;
        } else if col >= self.scroll_cols + width {
            self.scroll_cols = col + 1 - width;
        }
        // Don't leave blank space on the right when text shrinks
        let max_scroll = (text_cols(buffer) + 1).saturating_sub(width);
        self.scroll_cols = self.scroll_cols.min(max_scroll);
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_home(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = 0;
        true
    }

    pub fn move_end(&mut self, buffer: &str) -> bool {
        if self.pos == buffer.len() {
            return false;
        }
        self.pos = buffer.len();
        true
    }
}

/// The slice of `buffer` visible from column `scroll_cols`, at most `width` columns wide.
///
/// A wide character cut by the left edge is replaced by spaces so the text
/// stays aligned with `CursorState::screen_column`.
pub(super) fn visible_text(buffer: &str, scroll_cols: usize, width: u16) -> String {
    let width = usize::from(width);
    let mut skipped = 0usize;
    let mut used = 0usize;
    let mut out = String::new();
    for c in buffer.chars() {
        let cols = char_cols(c);
        if skipped < scroll_cols {
            skipped += cols;
            let overhang = skipped.saturating_sub(scroll_cols).min(width);
            for _ in 0..overhang {
                out.push(' ');
            }
            used += overhang;
            continue;
        }
        if used + cols > width {
            break;
        }
        used += cols;
        out.push(display_char(c));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_respect_multibyte_chars() {
        let text = "aé b";
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn test_movement_stops_at_edges() {
        let mut cursor = CursorState::new();
        assert!(!cursor.move_left("ab"));
        assert!(cursor.move_right("ab"));
        assert!(cursor.move_end("ab"));
        assert_eq!(cursor.pos, 2);
        assert!(!cursor.move_right("ab"));
        assert!(cursor.move_home());
        assert!(!cursor.move_home());
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let buffer = "abcdefghij";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll(buffer, 4);
        // Cursor at column 10 must be the last visible column
        assert_eq!(cursor.scroll_cols, 7);
        assert_eq!(visible_text(buffer, cursor.scroll_cols, 4), "hij");

        cursor.pos = 0;
        cursor.update_scroll(buffer, 4);
        assert_eq!(cursor.scroll_cols, 0);
        assert_eq!(visible_text(buffer, 0, 4), "abcd");
    }

    #[test]
    fn test_control_chars_are_drawn_as_one_column() {
        assert_eq!(text_cols("a\nb"), 3);
        assert_eq!(visible_text("a\nb", 0, 10), "a↵b");
    }

    #[test]
    fn test_wide_char_cut_by_left_edge_is_padded() {
        // "好" spans columns 1..3; starting at column 2 cuts it in half
        let buffer = "a好bc";
        assert_eq!(visible_text(buffer, 2, 10), " bc");

        let cursor = CursorState {
            pos: buffer.len(),
            scroll_cols: 2,
        };
        // Cursor after "c" is 3 cells into the drawn text
        assert_eq!(cursor.screen_column(buffer, 10), 3);
        assert_eq!(
            visible_text(buffer, 2, 10).chars().count(),
            usize::from(cursor.screen_column(buffer, 10))
        );
    }

    #[test]
    fn test_widths_beyond_u16_range() {
        let buffer = "a".repeat(70_000);
        assert_eq!(text_cols(&buffer), 70_000);

        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll(&buffer, 20);
        assert_eq!(cursor.scroll_cols, 70_000 + 1 - 20);
        assert_eq!(cursor.screen_column(&buffer, 20), 19);
        assert_eq!(visible_text(&buffer, cursor.scroll_cols, 20), "a".repeat(19));
    }
}
