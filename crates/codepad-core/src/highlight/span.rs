//! Styled spans emitted by the highlighter and their flattened paint form.

use codepad_config::{TokenClass, TokenStyle};

/// One rule match within a block. Offsets are UTF-8 byte offsets into the
/// block text and always fall on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    pub start: usize,
    pub len: usize,
    pub style: TokenStyle,
    pub class: TokenClass,
}

impl StyleSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// A non-overlapping byte range of a block with its winning style.
/// Unstyled ranges have `class == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun {
    pub start: usize,
    pub end: usize,
    pub class: Option<TokenClass>,
    pub style: Option<TokenStyle>,
}

/// Flattens spans into runs covering `0..text_len` exactly.
///
/// Spans are applied in order; where they overlap, the later span wins.
/// Spans reaching past `text_len` are cut off.
pub fn flatten_spans(text_len: usize, spans: &[StyleSpan]) -> Vec<StyledRun> {
    if text_len == 0 {
        return Vec::new();
    }

    // Winning span index per byte
    let mut owner: Vec<Option<usize>> = vec![None; text_len];
    for (idx, span) in spans.iter().enumerate() {
        let end = span.end().min(text_len);
        if span.start < end {
            owner[span.start..end].fill(Some(idx));
        }
    }

    let key = |o: Option<usize>| o.map(|i| (spans[i].class, spans[i].style));
    let mut runs: Vec<StyledRun> = Vec::new();
    let mut run_start = 0;
    for pos in 1..=text_len {
        if pos == text_len || key(owner[pos]) != key(owner[run_start]) {
            let style = key(owner[run_start]);
            runs.push(StyledRun {
                start: run_start,
                end: pos,
                class: style.map(|(c, _)| c),
                style: style.map(|(_, s)| s),
            });
            run_start = pos;
        }
    }
    runs
}
