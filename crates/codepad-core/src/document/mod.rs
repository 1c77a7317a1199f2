//! Document model: text buffer, cursor, file metadata and per-block formats.
//!
//! Every edit goes through [`Document::replace_range`], which keeps the
//! format slots aligned with the block count, records the edit in the undo
//! history and reports which blocks changed as a [`BlockChange`]. Line
//! breaks are stored as `\n` only. File I/O lives in the `io` submodule.

mod io;

use std::borrow::Cow;
use std::ops::Range;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::buffer::TextBuffer;
use crate::cursor::{char_to_pos, Cursor, Position};
use crate::highlight::{flatten_spans, StyleSpan, StyledRun};
use crate::history::{EditOperation, UndoManager};
use crate::observer::TextBlocks;

pub use io::LineEnding;

pub const UNTITLED: &str = "Untitled";

/// Converts `\r\n` and lone `\r` line breaks to `\n`.
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Blocks touched by one edit: `removed` blocks starting at `first` were
/// replaced by `inserted` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChange {
    pub first: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl BlockChange {
    /// Blocks whose text is new or modified after the edit.
    pub fn changed_range(&self) -> Range<usize> {
        self.first..self.first + self.inserted
    }

    pub fn changes_block_count(&self) -> bool {
        self.removed != self.inserted
    }
}

/// Cursor motions understood by [`Document::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMotion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

#[derive(Debug)]
pub struct Document {
    pub buffer: TextBuffer,
    pub cursor: Cursor,
    pub file_path: Option<PathBuf>,
    /// Display name for the tab.
    pub title: String,
    pub modified: bool,
    /// Line terminator written back on save.
    pub line_ending: LineEnding,
    /// Language label shown in the status bar.
    pub language: String,
    /// Highlight spans per block; always one slot per block.
    formats: Vec<Vec<StyleSpan>>,
    /// Bumped on every buffer mutation.
    pub content_version: u64,
    pub history: UndoManager,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// An untitled, unmodified document holding `text`.
    pub fn from_text(text: &str) -> Self {
        let buffer = TextBuffer::from(&*normalize_line_breaks(text));
        let formats = vec![Vec::new(); buffer.len_lines()];
        Self {
            buffer,
            cursor: Cursor::new(),
            file_path: None,
            title: UNTITLED.to_string(),
            modified: false,
            line_ending: LineEnding::default(),
            language: String::new(),
            formats,
            content_version: 0,
            history: UndoManager::default(),
        }
    }

    /// Replaces the char range `[start..end)` with `text`, normalizing its
    /// line breaks.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds; the document is
    /// left unchanged in that case.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> Result<BlockChange> {
        let text = normalize_line_breaks(text);
        let inserted_len = text.chars().count();
        let first = self
            .buffer
            .char_to_line(start)
            .context("edit start out of bounds")?;
        let last_old = self
            .buffer
            .char_to_line(end)
            .context("edit end out of bounds")?;
        let deleted = self.buffer.slice(start, end)?;
        self.buffer.replace(start, end, &text)?;

        let last_new = self
            .buffer
            .char_to_line(start + inserted_len)
            .context("edit end out of bounds after replace")?;

        let change = BlockChange {
            first,
            removed: last_old - first + 1,
            inserted: last_new - first + 1,
        };
        self.formats.splice(
            change.first..change.first + change.removed,
            std::iter::repeat_with(Vec::new).take(change.inserted),
        );
        debug_assert_eq!(self.formats.len(), self.buffer.len_lines());

        if !(deleted.is_empty() && text.is_empty()) {
            self.history.record(EditOperation {
                position: start,
                inserted: text.into_owned(),
                deleted,
                cursor_before: self.cursor.position,
                cursor_after: char_to_pos(&self.buffer, start + inserted_len),
            });
        }
        self.modified = true;
        self.content_version = self.content_version.wrapping_add(1);
        Ok(change)
    }

    /// Replaces the selection (or inserts at the cursor) and leaves the
    /// cursor after the new text.
    pub fn insert_text(&mut self, text: &str) -> Result<BlockChange> {
        let text = normalize_line_breaks(text);
        let (start, end) = match self.cursor.selection_char_range(&self.buffer)? {
            Some(range) => range,
            None => {
                let idx = self.cursor.to_char_index(&self.buffer)?;
                (idx, idx)
            }
        };
        let change = self.replace_range(start, end, &text)?;
        self.cursor.clear_selection();
        self.cursor.position = char_to_pos(&self.buffer, start + text.chars().count());
        self.cursor.desired_col = None;
        Ok(change)
    }

    pub fn insert_newline(&mut self) -> Result<BlockChange> {
        self.insert_text("\n")
    }

    /// Deletes the selection, or the char before the cursor.
    /// Returns `None` when there is nothing to delete.
    pub fn backspace(&mut self) -> Result<Option<BlockChange>> {
        if let Some(change) = self.delete_selection()? {
            return Ok(Some(change));
        }
        let idx = self.cursor.to_char_index(&self.buffer)?;
        if idx == 0 {
            return Ok(None);
        }
        let change = self.replace_range(idx - 1, idx, "")?;
        self.cursor.position = char_to_pos(&self.buffer, idx - 1);
        self.cursor.desired_col = None;
        Ok(Some(change))
    }

    /// Deletes the selection, or the char after the cursor.
    pub fn delete_forward(&mut self) -> Result<Option<BlockChange>> {
        if let Some(change) = self.delete_selection()? {
            return Ok(Some(change));
        }
        let idx = self.cursor.to_char_index(&self.buffer)?;
        if idx >= self.buffer.len_chars() {
            return Ok(None);
        }
        let change = self.replace_range(idx, idx + 1, "")?;
        self.cursor.desired_col = None;
        Ok(Some(change))
    }

    /// Deletes the selected text, if any.
    pub fn delete_selection(&mut self) -> Result<Option<BlockChange>> {
        let Some((start, end)) = self.cursor.selection_char_range(&self.buffer)? else {
            return Ok(None);
        };
        self.cursor.clear_selection();
        if start == end {
            return Ok(None);
        }
        let change = self.replace_range(start, end, "")?;
        self.cursor.position = char_to_pos(&self.buffer, start);
        self.cursor.desired_col = None;
        Ok(Some(change))
    }

    /// Replaces the whole text and puts the cursor at the start.
    pub fn set_text(&mut self, text: &str) -> Result<BlockChange> {
        let change = self.replace_range(0, self.buffer.len_chars(), text)?;
        self.cursor = Cursor::new();
        Ok(change)
    }

    /// Selects the char range `[start..end)`, leaving the cursor at `end`.
    pub fn select_range(&mut self, start: usize, end: usize) {
        self.cursor.selection_anchor = Some(char_to_pos(&self.buffer, start));
        self.cursor.position = char_to_pos(&self.buffer, end);
        self.cursor.desired_col = None;
    }

    pub fn selected_text(&self) -> Option<String> {
        match self.cursor.selection_char_range(&self.buffer) {
            Ok(Some((start, end))) if start != end => self.buffer.slice(start, end).ok(),
            _ => None,
        }
    }

    /// Moves the cursor. With `extend`, the selection grows from its anchor;
    /// otherwise any selection is dropped.
    pub fn move_cursor(&mut self, motion: CursorMotion, extend: bool) {
        if extend {
            self.cursor.start_selection();
        } else {
            self.cursor.clear_selection();
        }
        let buffer = &self.buffer;
        match motion {
            CursorMotion::Left => self.cursor.move_left(buffer),
            CursorMotion::Right => self.cursor.move_right(buffer),
            CursorMotion::Up => self.cursor.move_up(buffer),
            CursorMotion::Down => self.cursor.move_down(buffer),
            CursorMotion::LineStart => self.cursor.move_to_line_start(),
            CursorMotion::LineEnd => self.cursor.move_to_line_end(buffer),
            CursorMotion::DocumentStart => self.cursor.move_to_start(),
            CursorMotion::DocumentEnd => self.cursor.move_to_end(buffer),
        }
    }

    /// Places the cursor at `pos` (clamped), optionally extending the selection.
    pub fn set_cursor(&mut self, pos: Position, extend: bool) {
        if extend {
            self.cursor.start_selection();
        } else {
            self.cursor.clear_selection();
        }
        self.cursor.move_to(pos, &self.buffer);
    }

    pub fn block_count(&self) -> usize {
        self.buffer.len_lines()
    }

    pub fn block_formats(&self, block: usize) -> &[StyleSpan] {
        self.formats.get(block).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stores the spans of one block. Out-of-range blocks are ignored.
    pub fn set_block_formats(&mut self, block: usize, spans: Vec<StyleSpan>) {
        if let Some(slot) = self.formats.get_mut(block) {
            *slot = spans;
        }
    }

    /// Paint runs of one block, covering its whole text.
    pub fn block_runs(&self, block: usize) -> Vec<StyledRun> {
        let len = self.buffer.line_text(block).map(|t| t.len()).unwrap_or(0);
        flatten_spans(len, self.block_formats(block))
    }

    /// Title shown on the tab, with a marker when there are unsaved changes.
    pub fn display_title(&self) -> String {
        if self.modified {
            format!("{} *", self.title)
        } else {
            self.title.clone()
        }
    }
}

impl TextBlocks for Document {
    fn block_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn block_text(&self, block: usize) -> Option<String> {
        self.buffer.line_text(block).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.buffer.is_empty());
        assert_eq!(doc.title, "Untitled");
        assert!(!doc.modified);
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_insert_text_moves_cursor() {
        let mut doc = Document::new();
        let change = doc.insert_text("hello").unwrap();
        assert_eq!(doc.buffer.to_string(), "hello");
        assert_eq!(doc.cursor.position, Position::new(0, 5));
        assert!(doc.modified);
        assert_eq!(change, BlockChange { first: 0, removed: 1, inserted: 1 });
    }

    #[test]
    fn test_newline_splits_block() {
        let mut doc = Document::from_text("abcdef");
        doc.set_cursor(Position::new(0, 3), false);
        let change = doc.insert_newline().unwrap();
        assert_eq!(change, BlockChange { first: 0, removed: 1, inserted: 2 });
        assert!(change.changes_block_count());
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.cursor.position, Position::new(1, 0));
    }

    #[test]
    fn test_backspace_joins_blocks() {
        let mut doc = Document::from_text("ab\ncd");
        doc.set_cursor(Position::new(1, 0), false);
        let change = doc.backspace().unwrap().unwrap();
        assert_eq!(change, BlockChange { first: 0, removed: 2, inserted: 1 });
        assert_eq!(doc.buffer.to_string(), "abcd");
        assert_eq!(doc.cursor.position, Position::new(0, 2));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut doc = Document::from_text("ab");
        assert_eq!(doc.backspace().unwrap(), None);
        assert!(!doc.modified);
    }

    #[test]
    fn test_delete_forward() {
        let mut doc = Document::from_text("hello");
        doc.delete_forward().unwrap();
        assert_eq!(doc.buffer.to_string(), "ello");
        doc.move_cursor(CursorMotion::DocumentEnd, false);
        assert_eq!(doc.delete_forward().unwrap(), None);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut doc = Document::from_text("hello world");
        doc.select_range(0, 5);
        assert_eq!(doc.selected_text().as_deref(), Some("hello"));
        doc.insert_text("bye").unwrap();
        assert_eq!(doc.buffer.to_string(), "bye world");
        assert_eq!(doc.cursor.position, Position::new(0, 3));
        assert_eq!(doc.selected_text(), None);
    }

    #[test]
    fn test_shift_motion_extends_selection() {
        let mut doc = Document::from_text("one\ntwo");
        doc.move_cursor(CursorMotion::LineEnd, true);
        assert_eq!(doc.selected_text().as_deref(), Some("one"));
        doc.move_cursor(CursorMotion::Down, true);
        assert_eq!(doc.selected_text().as_deref(), Some("one\ntwo"));
        doc.move_cursor(CursorMotion::Left, false);
        assert_eq!(doc.selected_text(), None);
    }

    #[test]
    fn test_format_slots_follow_block_edits() {
        let mut doc = Document::from_text("a\nb\nc");
        let marker = |start| StyleSpan {
            start,
            len: 1,
            style: codepad_config::SyntaxTheme::default().style(codepad_config::TokenClass::Keyword),
            class: codepad_config::TokenClass::Keyword,
        };
        doc.set_block_formats(0, vec![marker(0)]);
        doc.set_block_formats(2, vec![marker(0)]);

        // Insert two blocks after "a"
        doc.set_cursor(Position::new(0, 1), false);
        doc.insert_text("\nx\ny").unwrap();
        assert_eq!(doc.block_count(), 5);
        assert_eq!(doc.block_formats(0).len(), 0, "edited block is reset");
        assert_eq!(doc.block_formats(4).len(), 1, "untouched block keeps its spans");
    }

    #[test]
    fn test_set_text_resets_cursor() {
        let mut doc = Document::from_text("old");
        doc.move_cursor(CursorMotion::DocumentEnd, false);
        let change = doc.set_text("new\ntext").unwrap();
        assert_eq!(change.changed_range(), 0..2);
        assert_eq!(doc.cursor.position, Position::new(0, 0));
    }

    #[test]
    fn test_replace_range_out_of_bounds() {
        let mut doc = Document::from_text("abc");
        assert!(doc.replace_range(1, 10, "x").is_err());
        assert_eq!(doc.buffer.to_string(), "abc");
        assert!(!doc.modified);
    }

    #[test]
    fn test_block_runs_cover_text() {
        let doc = Document::from_text("hello\nworld!");
        let runs = doc.block_runs(1);
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].start, runs[0].end), (0, 6));
    }

    #[test]
    fn test_pasted_crlf_becomes_one_break() {
        let mut doc = Document::new();
        let change = doc.insert_text("x = 1\r\ny = 2").unwrap();
        assert_eq!(doc.buffer.to_string(), "x = 1\ny = 2");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(change.inserted, 2);
        assert_eq!(doc.block_text(0).as_deref(), Some("x = 1"));
        assert_eq!(doc.cursor.position, Position::new(1, 5));
    }

    #[test]
    fn test_lone_carriage_return_is_a_line_break() {
        let mut doc = Document::from_text("a\rb");
        assert_eq!(doc.block_count(), 2);
        doc.replace_range(0, 0, "z\r").unwrap();
        assert_eq!(doc.buffer.to_string(), "z\na\nb");
    }

    #[test]
    fn test_edits_are_recorded_with_cursors() {
        let mut doc = Document::from_text("ab");
        doc.set_cursor(Position::new(0, 2), false);
        doc.insert_text("c").unwrap();
        let ops = doc.history.undo().unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!((ops[0].position, ops[0].inserted.as_str(), ops[0].deleted.as_str()), (2, "c", ""));
        assert_eq!(ops[0].cursor_before, Position::new(0, 2));
        assert_eq!(ops[0].cursor_after, Position::new(0, 3));
    }

    #[test]
    fn test_replacing_selection_records_deleted_text() {
        let mut doc = Document::from_text("hello world");
        doc.select_range(0, 5);
        doc.insert_text("bye").unwrap();
        let ops = doc.history.undo().unwrap();
        assert_eq!(ops[0].deleted, "hello");
        assert_eq!(ops[0].inserted, "bye");
    }

    #[test]
    fn test_display_title_marks_modified() {
        let mut doc = Document::new();
        assert_eq!(doc.display_title(), "Untitled");
        doc.insert_text("x").unwrap();
        assert_eq!(doc.display_title(), "Untitled *");
    }
}
