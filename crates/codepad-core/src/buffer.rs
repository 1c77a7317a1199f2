/// Text buffer wrapping `ropey::Rope`. Each line of the buffer is one block.
use std::fmt;

use anyhow::{bail, Result};
use ropey::Rope;

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of lines. An empty buffer still has one (empty) line.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    fn check_line(&self, line_idx: usize) -> Result<()> {
        if line_idx >= self.rope.len_lines() {
            bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(())
    }

    /// Text of one line without its trailing newline.
    pub fn line_text(&self, line_idx: usize) -> Result<String> {
        self.check_line(line_idx)?;
        let mut text = self.rope.line(line_idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    /// Length of a line in chars, excluding the trailing newline.
    pub fn line_len_chars(&self, line_idx: usize) -> Result<usize> {
        self.check_line(line_idx)?;
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            return Ok(len - 1);
        }
        Ok(len)
    }

    pub fn line_to_char(&self, line_idx: usize) -> Result<usize> {
        self.check_line(line_idx)?;
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Line containing `char_idx`; the past-the-end index is allowed.
    pub fn char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    pub fn char_at(&self, char_idx: usize) -> Result<char> {
        if char_idx >= self.rope.len_chars() {
            bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char(char_idx))
    }

    pub fn byte_to_char(&self, byte_idx: usize) -> Result<usize> {
        if byte_idx > self.rope.len_bytes() {
            bail!(
                "byte index {} out of bounds (buffer has {} bytes)",
                byte_idx,
                self.rope.len_bytes()
            );
        }
        Ok(self.rope.byte_to_char(byte_idx))
    }

    pub fn char_to_byte(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_byte(char_idx))
    }

    /// Text of the char range `[start..end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            bail!(
                "insert position {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    pub fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.rope.remove(start..end);
        Ok(())
    }

    /// Replaces `[start..end)` with `text`. The range is checked before
    /// anything is removed.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        self.check_range(start, end)?;
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_lines(), 1);
        assert_eq!(buf.line_text(0).unwrap(), "");
    }

    #[test]
    fn test_line_text_strips_newline() {
        let buf = TextBuffer::from("def foo():\n    pass\n");
        assert_eq!(buf.len_lines(), 3);
        assert_eq!(buf.line_text(0).unwrap(), "def foo():");
        assert_eq!(buf.line_text(1).unwrap(), "    pass");
        assert_eq!(buf.line_text(2).unwrap(), "");
        assert!(buf.line_text(3).is_err());
    }

    #[test]
    fn test_insert_remove_replace() {
        let mut buf = TextBuffer::from("hello");
        buf.insert(5, " world").unwrap();
        assert_eq!(buf.to_string(), "hello world");
        buf.remove(5, 11).unwrap();
        assert_eq!(buf.to_string(), "hello");
        buf.replace(0, 5, "goodbye").unwrap();
        assert_eq!(buf.to_string(), "goodbye");
    }

    #[test]
    fn test_replace_out_of_bounds_leaves_buffer_untouched() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.replace(2, 100, "x").is_err());
        assert!(buf.replace(3, 1, "x").is_err());
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_line_len_chars() {
        let buf = TextBuffer::from("hello\n\nworld");
        assert_eq!(buf.line_len_chars(0).unwrap(), 5);
        assert_eq!(buf.line_len_chars(1).unwrap(), 0);
        assert_eq!(buf.line_len_chars(2).unwrap(), 5);
    }

    #[test]
    fn test_char_and_line_conversion() {
        let buf = TextBuffer::from("abc\ndef\nghi");
        assert_eq!(buf.line_to_char(2).unwrap(), 8);
        assert_eq!(buf.char_to_line(3).unwrap(), 0);
        assert_eq!(buf.char_to_line(4).unwrap(), 1);
        assert_eq!(buf.char_to_line(11).unwrap(), 2);
        assert!(buf.char_to_line(12).is_err());
    }

    #[test]
    fn test_unicode_offsets() {
        let buf = TextBuffer::from("héllo 🌍");
        assert_eq!(buf.len_chars(), 7);
        assert_eq!(buf.char_at(6).unwrap(), '🌍');
        // 'é' is two bytes
        assert_eq!(buf.byte_to_char(3).unwrap(), 2);
        assert_eq!(buf.slice(1, 5).unwrap(), "éllo");
    }

    #[test]
    fn test_out_of_bounds() {
        let buf = TextBuffer::from("hello");
        assert!(buf.char_at(10).is_err());
        assert!(buf.slice(0, 100).is_err());
        assert!(buf.line_to_char(5).is_err());
        assert!(buf.byte_to_char(100).is_err());
    }
}
