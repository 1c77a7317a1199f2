//! Rule-based, per-block syntax highlighting.
//!
//! Each block is scanned on its own with every rule in registration order;
//! nothing carries over between blocks. Spans are emitted in rule order then
//! match order, so when they overlap the later one paints last.

mod rules;
mod span;

use std::ops::Range;
use std::path::Path;

use codepad_config::SyntaxTheme;

use crate::observer::{RequestQueue, SurfaceObserver, SurfaceRequest, TextBlocks};

pub use rules::{build_rules, rule_sources, HighlightRule, KEYWORDS, OPERATORS};
pub use span::{flatten_spans, StyleSpan, StyledRun};

#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: SyntaxTheme,
    rules: Vec<HighlightRule>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(SyntaxTheme::default())
    }
}

impl Highlighter {
    pub fn new(theme: SyntaxTheme) -> Self {
        let rules = build_rules(&theme);
        Self { theme, rules }
    }

    pub fn theme(&self) -> &SyntaxTheme {
        &self.theme
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Reads a theme file and rebuilds the rules. Never fails; a bad file
    /// yields default colors.
    pub fn load_theme(&mut self, path: &Path) {
        self.set_theme(SyntaxTheme::load(path));
    }

    /// Replaces the theme and rebuilds the rule list from scratch.
    pub fn set_theme(&mut self, theme: SyntaxTheme) {
        self.rules = build_rules(&theme);
        self.theme = theme;
        tracing::debug!("Rebuilt {} highlight rules", self.rules.len());
    }

    /// Scans one block. Pure: the same text always yields the same spans.
    pub fn highlight_block(&self, text: &str) -> Vec<StyleSpan> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                let Some(m) = caps.get(rule.group) else {
                    continue;
                };
                if m.is_empty() {
                    continue;
                }
                spans.push(StyleSpan {
                    start: m.start(),
                    len: m.len(),
                    style: rule.style,
                    class: rule.class,
                });
            }
        }
        spans
    }

    /// Re-scans every block, e.g. after a theme change.
    pub fn rehighlight_all(&self, blocks: &dyn TextBlocks, requests: &mut RequestQueue) {
        self.rehighlight(blocks, 0..blocks.block_count(), requests);
    }

    fn rehighlight(&self, blocks: &dyn TextBlocks, range: Range<usize>, requests: &mut RequestQueue) {
        for block in range {
            let Some(text) = blocks.block_text(block) else {
                break;
            };
            requests.push(SurfaceRequest::SetBlockFormats {
                block,
                spans: self.highlight_block(&text),
            });
        }
    }
}

impl SurfaceObserver for Highlighter {
    fn on_text_changed(
        &mut self,
        blocks: &dyn TextBlocks,
        changed: Range<usize>,
        requests: &mut RequestQueue,
    ) {
        tracing::trace!("Highlighting blocks {changed:?}");
        self.rehighlight(blocks, changed, requests);
    }
}
