/// Search engine supporting plain text and regex search with wrap-around.
use anyhow::{Context, Result};
use regex::Regex;

use crate::buffer::TextBuffer;
use crate::surface::EditorSurface;

/// A single search match in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Start char index in the buffer.
    pub start: usize,
    /// End char index in the buffer (exclusive).
    pub end: usize,
    /// 0-indexed line where the match starts.
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub query: String,
    pub use_regex: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    compiled: Option<Regex>,
    /// Options the cached regex was compiled for.
    compiled_for: Option<SearchOptions>,
    pub matches: Vec<SearchMatch>,
    pub current_match: Option<usize>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_pattern(options: &SearchOptions) -> Result<Regex> {
        let mut pattern = if options.use_regex {
            options.query.clone()
        } else {
            regex::escape(&options.query)
        };

        if options.whole_word {
            pattern = format!(r"\b(?:{pattern})\b");
        }
        if !options.case_sensitive {
            pattern = format!("(?i){pattern}");
        }

        Regex::new(&pattern).context("invalid search pattern")
    }

    /// Finds all matches in the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn find_all(&mut self, buffer: &TextBuffer, options: &SearchOptions) -> Result<()> {
        self.matches.clear();
        self.current_match = None;
        if options.query.is_empty() {
            return Ok(());
        }

        if self.compiled_for.as_ref() != Some(options) {
            self.compiled = Some(Self::build_pattern(options)?);
            self.compiled_for = Some(options.clone());
        }
        let Some(regex) = &self.compiled else {
            return Ok(());
        };

        let text = buffer.to_string();
        for mat in regex.find_iter(&text) {
            if mat.is_empty() {
                continue;
            }
            let start = buffer.byte_to_char(mat.start())?;
            let end = buffer.byte_to_char(mat.end())?;
            self.matches.push(SearchMatch {
                start,
                end,
                line: buffer.char_to_line(start)?,
            });
        }

        if !self.matches.is_empty() {
            self.current_match = Some(0);
        }
        Ok(())
    }

    /// Selects the first match starting at or after `cursor_char_idx`,
    /// wrapping to the first match.
    pub fn find_next(&mut self, cursor_char_idx: usize) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        // `>=`: after selecting a match the cursor sits at its end, where
        // the next match may start.
        let idx = self
            .matches
            .iter()
            .position(|m| m.start >= cursor_char_idx)
            .unwrap_or(0);
        self.current_match = Some(idx);
        Some(idx)
    }

    /// Selects the last match starting before `cursor_char_idx`, wrapping
    /// to the last match.
    pub fn find_prev(&mut self, cursor_char_idx: usize) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let idx = self
            .matches
            .iter()
            .rposition(|m| m.start < cursor_char_idx)
            .unwrap_or(self.matches.len() - 1);
        self.current_match = Some(idx);
        Some(idx)
    }

    pub fn current(&self) -> Option<&SearchMatch> {
        self.current_match.and_then(|i| self.matches.get(i))
    }

    /// Replacement text for `mat`; regex mode expands `$1`-style references.
    /// Captures are taken at the match's position in the whole `text`, so
    /// anchors and word boundaries see the surrounding context.
    fn expand(
        &self,
        text: &str,
        buffer: &TextBuffer,
        mat: &SearchMatch,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<String> {
        let Some(regex) = self.compiled.as_ref().filter(|_| options.use_regex) else {
            return Ok(replacement.to_string());
        };
        let byte_start = buffer.char_to_byte(mat.start)?;
        let caps = regex
            .captures_at(text, byte_start)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == byte_start))
            .context("match is no longer in the buffer")?;
        let mut expanded = String::new();
        caps.expand(replacement, &mut expanded);
        Ok(expanded)
    }

    /// Replaces the current match through the surface, then searches again.
    /// Returns whether a replacement was made.
    pub fn replace_current(
        &mut self,
        surface: &mut EditorSurface,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<bool> {
        let Some(mat) = self.current().cloned() else {
            return Ok(false);
        };
        let buffer = &surface.document().buffer;
        let text = self.expand(&buffer.to_string(), buffer, &mat, replacement, options)?;
        surface
            .replace_range(mat.start, mat.end, &text)
            .context("failed to replace match")?;

        let after = mat.start + text.chars().count();
        surface.select_range(mat.start, after);
        self.find_all(&surface.document().buffer, options)?;
        self.find_next(after);
        Ok(true)
    }

    /// Replaces every match, last to first so earlier offsets stay valid.
    /// Returns the number of replacements.
    pub fn replace_all(
        &mut self,
        surface: &mut EditorSurface,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<usize> {
        self.find_all(&surface.document().buffer, options)?;
        let matches = std::mem::take(&mut self.matches);
        let buffer = &surface.document().buffer;
        let original = buffer.to_string();
        let replacements = matches
            .iter()
            .map(|mat| self.expand(&original, buffer, mat, replacement, options))
            .collect::<Result<Vec<_>>>()?;
        for (mat, text) in matches.iter().zip(&replacements).rev() {
            surface.replace_range(mat.start, mat.end, text)?;
        }
        self.current_match = None;
        tracing::debug!("Replaced {} matches", matches.len());
        Ok(matches.len())
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::gutter::GutterMetrics;

    fn opts(query: &str) -> SearchOptions {
        SearchOptions {
            query: query.to_string(),
            case_sensitive: true,
            ..Default::default()
        }
    }

    fn surface(text: &str) -> EditorSurface {
        EditorSurface::new(Document::from_text(text), GutterMetrics::default(), 20.0)
    }

    #[test]
    fn test_find_all_plain() {
        let buf = TextBuffer::from("hello world hello");
        let mut engine = SearchEngine::new();
        engine.find_all(&buf, &opts("hello")).unwrap();
        assert_eq!(engine.match_count(), 2);
        assert_eq!((engine.matches[1].start, engine.matches[1].end), (12, 17));
    }

    #[test]
    fn test_plain_query_is_escaped() {
        let buf = TextBuffer::from("f(x) + f(y)");
        let mut engine = SearchEngine::new();
        engine.find_all(&buf, &opts("f(")).unwrap();
        assert_eq!(engine.match_count(), 2);
    }

    #[test]
    fn test_case_and_whole_word() {
        let buf = TextBuffer::from("Pass pass passing");
        let mut engine = SearchEngine::new();
        let mut o = opts("pass");
        o.case_sensitive = false;
        engine.find_all(&buf, &o).unwrap();
        assert_eq!(engine.match_count(), 3);
        o.whole_word = true;
        engine.find_all(&buf, &o).unwrap();
        assert_eq!(engine.match_count(), 2);
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        let buf = TextBuffer::from("abc");
        let mut engine = SearchEngine::new();
        let mut o = opts("(unclosed");
        o.use_regex = true;
        let err = engine.find_all(&buf, &o).unwrap_err();
        assert!(format!("{err:#}").contains("invalid search pattern"));
    }

    #[test]
    fn test_find_next_prev_wrap() {
        let buf = TextBuffer::from("ab ab ab");
        let mut engine = SearchEngine::new();
        engine.find_all(&buf, &opts("ab")).unwrap();
        assert_eq!(engine.find_next(0), Some(0));
        assert_eq!(engine.find_next(2), Some(1));
        assert_eq!(engine.find_next(7), Some(0));
        assert_eq!(engine.find_prev(4), Some(1));
        assert_eq!(engine.find_prev(0), Some(2));
    }

    #[test]
    fn test_matches_use_char_offsets_and_lines() {
        let buf = TextBuffer::from("héllo\nwörld wörld");
        let mut engine = SearchEngine::new();
        engine.find_all(&buf, &opts("wörld")).unwrap();
        assert_eq!(engine.matches[0], SearchMatch { start: 6, end: 11, line: 1 });
    }

    #[test]
    fn test_empty_query_clears_matches() {
        let buf = TextBuffer::from("abc");
        let mut engine = SearchEngine::new();
        engine.find_all(&buf, &opts("b")).unwrap();
        engine.find_all(&buf, &opts("")).unwrap();
        assert_eq!(engine.match_count(), 0);
        assert_eq!(engine.current_match, None);
    }

    #[test]
    fn test_replace_current_goes_through_surface() {
        let mut s = surface("x = 1\ny = 1");
        let mut engine = SearchEngine::new();
        let o = opts("x");
        engine.find_all(&s.document().buffer, &o).unwrap();
        assert!(engine.replace_current(&mut s, "pass", &o).unwrap());
        assert_eq!(s.document().buffer.to_string(), "pass = 1\ny = 1");
        // The new keyword is highlighted
        let first = s.block_runs(0)[0];
        assert_eq!(first.class, Some(codepad_config::TokenClass::Keyword));
        assert_eq!(engine.match_count(), 0);
    }

    #[test]
    fn test_replace_all_counts_and_expands_groups() {
        let mut s = surface("a1 b2\nc3");
        let mut engine = SearchEngine::new();
        let mut o = opts(r"([a-z])(\d)");
        o.use_regex = true;
        let count = engine.replace_all(&mut s, "$2$1", &o).unwrap();
        assert_eq!(count, 3);
        assert_eq!(s.document().buffer.to_string(), "1a 2b\n3c");
        assert!(s.document().modified);
    }

    #[test]
    fn test_replace_expands_context_dependent_patterns() {
        // `\B` depends on the chars around the match
        let mut s = surface("ab ab");
        let mut engine = SearchEngine::new();
        let mut o = opts(r"(a)\B");
        o.use_regex = true;
        assert_eq!(engine.replace_all(&mut s, "[$1]", &o).unwrap(), 2);
        assert_eq!(s.document().buffer.to_string(), "[a]b [a]b");

        let mut s = surface("ab ab");
        let mut o = opts(r"\B(b)");
        o.use_regex = true;
        engine.find_all(&s.document().buffer, &o).unwrap();
        assert!(engine.replace_current(&mut s, "<$1>", &o).unwrap());
        assert_eq!(s.document().buffer.to_string(), "a<b> ab");
    }

    #[test]
    fn test_replace_all_with_newlines_keeps_blocks_in_sync() {
        let mut s = surface("a;b;c");
        let mut engine = SearchEngine::new();
        let count = engine.replace_all(&mut s, "\n", &opts(";")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(s.document().block_count(), 3);
        assert_eq!(s.viewport().visible_block_count(), 3);
    }
}
