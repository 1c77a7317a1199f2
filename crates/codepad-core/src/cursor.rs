//! Cursor position, selection anchor, and movement over a `TextBuffer`.

use anyhow::{Context, Result};

use crate::buffer::TextBuffer;

/// A (line, column) position; both 0-based, column counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// The editing cursor, with an optional selection anchor.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub position: Position,
    pub selection_anchor: Option<Position>,
    /// Column remembered across vertical moves through shorter lines.
    pub desired_col: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected char range `(start, end)`, ordered, if a selection exists.
    pub fn selection_char_range(&self, buffer: &TextBuffer) -> Result<Option<(usize, usize)>> {
        match self.selection_anchor {
            Some(anchor) => {
                let anchor_char = pos_to_char(buffer, anchor)?;
                let head_char = pos_to_char(buffer, self.position)?;
                Ok(Some((anchor_char.min(head_char), anchor_char.max(head_char))))
            }
            None => Ok(None),
        }
    }

    pub fn to_char_index(&self, buffer: &TextBuffer) -> Result<usize> {
        pos_to_char(buffer, self.position)
    }

    /// Anchors a selection at the current position unless one is active.
    pub fn start_selection(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.position);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    pub fn move_to(&mut self, pos: Position, buffer: &TextBuffer) {
        self.position = clamp_position(pos, buffer);
        self.desired_col = None;
    }

    pub fn move_right(&mut self, buffer: &TextBuffer) {
        let line_len = buffer.line_len_chars(self.position.line).unwrap_or(0);
        if self.position.col < line_len {
            self.position.col += 1;
        } else if self.position.line + 1 < buffer.len_lines() {
            self.position.line += 1;
            self.position.col = 0;
        }
        self.desired_col = None;
    }

    pub fn move_left(&mut self, buffer: &TextBuffer) {
        if self.position.col > 0 {
            self.position.col -= 1;
        } else if self.position.line > 0 {
            self.position.line -= 1;
            self.position.col = buffer.line_len_chars(self.position.line).unwrap_or(0);
        }
        self.desired_col = None;
    }

    pub fn move_up(&mut self, buffer: &TextBuffer) {
        if self.position.line == 0 {
            return;
        }
        self.move_vertically(self.position.line - 1, buffer);
    }

    pub fn move_down(&mut self, buffer: &TextBuffer) {
        if self.position.line + 1 >= buffer.len_lines() {
            return;
        }
        self.move_vertically(self.position.line + 1, buffer);
    }

    fn move_vertically(&mut self, line: usize, buffer: &TextBuffer) {
        let desired = self.desired_col.unwrap_or(self.position.col);
        let line_len = buffer.line_len_chars(line).unwrap_or(0);
        self.position = Position::new(line, desired.min(line_len));
        self.desired_col = Some(desired);
    }

    pub fn move_to_line_start(&mut self) {
        self.position.col = 0;
        self.desired_col = None;
    }

    pub fn move_to_line_end(&mut self, buffer: &TextBuffer) {
        self.position.col = buffer.line_len_chars(self.position.line).unwrap_or(0);
        self.desired_col = None;
    }

    pub fn move_to_start(&mut self) {
        self.position = Position::default();
        self.desired_col = None;
    }

    pub fn move_to_end(&mut self, buffer: &TextBuffer) {
        self.position = char_to_pos(buffer, buffer.len_chars());
        self.desired_col = None;
    }
}

/// Converts a `Position` to a char index, clamping it to the buffer first.
pub fn pos_to_char(buffer: &TextBuffer, pos: Position) -> Result<usize> {
    let clamped = clamp_position(pos, buffer);
    let line_start = buffer
        .line_to_char(clamped.line)
        .context("converting position to char index")?;
    Ok(line_start + clamped.col)
}

/// Converts a char index to a `Position`; indices past the end clamp to it.
pub fn char_to_pos(buffer: &TextBuffer, char_idx: usize) -> Position {
    let clamped = char_idx.min(buffer.len_chars());
    let line = buffer.char_to_line(clamped).unwrap_or(0);
    let line_start = buffer.line_to_char(line).unwrap_or(0);
    Position::new(line, clamped - line_start)
}

pub fn clamp_position(pos: Position, buffer: &TextBuffer) -> Position {
    let line = pos.line.min(buffer.len_lines().saturating_sub(1));
    let line_len = buffer.line_len_chars(line).unwrap_or(0);
    Position::new(line, pos.col.min(line_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_buffer() -> TextBuffer {
        TextBuffer::from("hello world\nfoo bar\nbaz")
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(0, 11), &buf);
        cursor.move_right(&buf);
        assert_eq!(cursor.position, Position::new(1, 0));
    }

    #[test]
    fn test_move_left_wraps_to_previous_line_end() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(1, 0), &buf);
        cursor.move_left(&buf);
        assert_eq!(cursor.position, Position::new(0, 11));
    }

    #[test]
    fn test_vertical_moves_remember_column() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(0, 10), &buf);
        cursor.move_down(&buf);
        assert_eq!(cursor.position, Position::new(1, 7));
        cursor.move_down(&buf);
        assert_eq!(cursor.position, Position::new(2, 3));
        cursor.move_up(&buf);
        cursor.move_up(&buf);
        assert_eq!(cursor.position, Position::new(0, 10));
    }

    #[test]
    fn test_moves_stop_at_edges() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_up(&buf);
        cursor.move_left(&buf);
        assert_eq!(cursor.position, Position::new(0, 0));
        cursor.move_to_end(&buf);
        assert_eq!(cursor.position, Position::new(2, 3));
        cursor.move_down(&buf);
        cursor.move_right(&buf);
        assert_eq!(cursor.position, Position::new(2, 3));
    }

    #[test]
    fn test_line_start_and_end() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(1, 2), &buf);
        cursor.move_to_line_end(&buf);
        assert_eq!(cursor.position.col, 7);
        cursor.move_to_line_start();
        assert_eq!(cursor.position.col, 0);
    }

    #[test]
    fn test_selection_range_is_ordered() {
        let buf = test_buffer();
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(1, 3), &buf);
        cursor.start_selection();
        cursor.move_to(Position::new(0, 6), &buf);
        assert_eq!(cursor.selection_char_range(&buf).unwrap(), Some((6, 15)));
        cursor.clear_selection();
        assert_eq!(cursor.selection_char_range(&buf).unwrap(), None);
    }

    #[test]
    fn test_position_conversions_clamp() {
        let buf = test_buffer();
        assert_eq!(pos_to_char(&buf, Position::new(1, 100)).unwrap(), 19);
        assert_eq!(pos_to_char(&buf, Position::new(99, 0)).unwrap(), 20);
        assert_eq!(char_to_pos(&buf, 14), Position::new(1, 2));
        assert_eq!(char_to_pos(&buf, 999), Position::new(2, 3));
    }
}
