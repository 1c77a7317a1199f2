//! The built-in rule set: reserved words, operators, strings, comments and
//! function-call names.

use codepad_config::{SyntaxTheme, TokenClass, TokenStyle};
use regex::Regex;

pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Operator patterns, already regex-escaped. `:` and `.` are not operators here.
pub const OPERATORS: &[&str] = &[
    "=", r"\+", "-", r"\*", "/", "%", "!", "==", "!=", ">", "<", ">=", "<=", r"\(", r"\)",
    r"\[", r"\]", r"\{", r"\}", ",",
];

pub const SINGLE_QUOTED_STRING: &str = r"'[^']*'";
pub const DOUBLE_QUOTED_STRING: &str = r#""[^"]*""#;
pub const LINE_COMMENT: &str = r"#.*";
/// Identifier directly followed by `(`; capture group 1 is the span.
pub const FUNCTION_CALL: &str = r"\b([A-Za-z0-9_]+)\(";

/// Pattern source, capture group to style, and token class.
pub type RuleSource = (String, usize, TokenClass);

/// One compiled rule.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pub pattern: Regex,
    /// Capture group whose range becomes the span (0 = whole match).
    pub group: usize,
    pub class: TokenClass,
    pub style: TokenStyle,
}

/// All rule sources in registration order.
pub fn rule_sources() -> Vec<RuleSource> {
    let mut sources: Vec<RuleSource> = Vec::new();
    sources.extend(
        KEYWORDS
            .iter()
            .map(|kw| (format!(r"\b{kw}\b"), 0, TokenClass::Keyword)),
    );
    sources.extend(
        OPERATORS
            .iter()
            .map(|op| (op.to_string(), 0, TokenClass::Operator)),
    );
    sources.push((SINGLE_QUOTED_STRING.to_string(), 0, TokenClass::String));
    sources.push((DOUBLE_QUOTED_STRING.to_string(), 0, TokenClass::String));
    sources.push((LINE_COMMENT.to_string(), 0, TokenClass::Comment));
    sources.push((FUNCTION_CALL.to_string(), 1, TokenClass::Function));
    sources
}

/// Compiles the rule list for `theme`.
///
/// # Panics
///
/// Panics if a built-in pattern fails to compile, which is a defect in the
/// pattern tables above.
pub fn build_rules(theme: &SyntaxTheme) -> Vec<HighlightRule> {
    rule_sources()
        .into_iter()
        .map(|(source, group, class)| {
            let pattern = Regex::new(&source).unwrap_or_else(|e| {
                panic!("built-in highlight pattern {source:?} does not compile: {e}")
            });
            HighlightRule {
                pattern,
                group,
                class,
                style: theme.style(class),
            }
        })
        .collect()
}
