//! Syntax themes: the five token classes, their colors and font styles.
//!
//! Themes are read from small sectioned key-value files (`*.lib`) whose
//! `[colors]` section maps a token class to a color:
//!
//! ```text
//! [colors]
//! keyword = #5151F0
//! operator = #F79F34
//! string = #F54141
//! comment = #2AC52A
//! function = #D8AA37
//! ```
//!
//! Loading never fails. A missing or unreadable file, a malformed file, or
//! a bad color value falls back to the built-in default for the affected
//! classes and logs a warning.

use std::fmt;
use std::path::Path;

use crate::color::HexColor;
use crate::ini::IniDocument;

/// Section of a theme file holding the class colors.
pub const COLORS_SECTION: &str = "colors";

/// Token classes in rule registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Operator,
    String,
    Comment,
    Function,
}

impl TokenClass {
    pub const ALL: [TokenClass; 5] = [
        TokenClass::Keyword,
        TokenClass::Operator,
        TokenClass::String,
        TokenClass::Comment,
        TokenClass::Function,
    ];

    /// Key used for this class in theme files.
    pub fn key(self) -> &'static str {
        match self {
            TokenClass::Keyword => "keyword",
            TokenClass::Operator => "operator",
            TokenClass::String => "string",
            TokenClass::Comment => "comment",
            TokenClass::Function => "function",
        }
    }

    /// Built-in color used when a theme does not define this class.
    pub fn default_color(self) -> HexColor {
        match self {
            TokenClass::Keyword => HexColor::rgb(0x51, 0x51, 0xF0),
            TokenClass::Operator => HexColor::rgb(0xF7, 0x9F, 0x34),
            TokenClass::String => HexColor::rgb(0xF5, 0x41, 0x41),
            TokenClass::Comment => HexColor::rgb(0x2A, 0xC5, 0x2A),
            TokenClass::Function => HexColor::rgb(0xD8, 0xAA, 0x37),
        }
    }

    /// Font style fixed per class; theme files only choose colors.
    pub fn font_style(self) -> FontStyle {
        match self {
            TokenClass::Keyword => FontStyle::Bold,
            TokenClass::Comment => FontStyle::Italic,
            _ => FontStyle::Plain,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
}

/// Resolved paint style of one token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenStyle {
    pub color: HexColor,
    pub font_style: FontStyle,
}

impl TokenStyle {
    pub fn is_bold(&self) -> bool {
        self.font_style == FontStyle::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.font_style == FontStyle::Italic
    }
}

/// An immutable set of styles for the five token classes.
///
/// To switch themes, build a new value; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTheme {
    styles: [TokenStyle; 5],
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        Self::from_colors(|_| None)
    }
}

impl SyntaxTheme {
    /// Builds a theme, asking `lookup` for each class color and falling
    /// back to the class default when it returns `None`.
    pub fn from_colors(mut lookup: impl FnMut(TokenClass) -> Option<HexColor>) -> Self {
        let styles = TokenClass::ALL.map(|class| TokenStyle {
            color: lookup(class).unwrap_or_else(|| class.default_color()),
            font_style: class.font_style(),
        });
        Self { styles }
    }

    /// Reads a theme file. Never fails; see the module docs.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let theme = Self::from_source(&contents, &path.display().to_string());
                tracing::debug!("Loaded syntax theme from {}", path.display());
                theme
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read syntax theme {}: {e}; using default colors",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Parses theme file contents. `origin` only labels log messages.
    pub fn from_source(contents: &str, origin: &str) -> Self {
        let doc = match IniDocument::parse(contents) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Malformed syntax theme {origin}: {e:#}; using default colors");
                return Self::default();
            }
        };

        Self::from_colors(|class| {
            let raw = doc.get(COLORS_SECTION, class.key())?;
            match HexColor::from_hex(raw) {
                Some(color) => Some(color),
                None => {
                    tracing::warn!(
                        "Invalid color {raw:?} for `{class}` in {origin}; using {}",
                        class.default_color()
                    );
                    None
                }
            }
        })
    }

    pub fn style(&self, class: TokenClass) -> TokenStyle {
        self.styles[class.index()]
    }

    pub fn color(&self, class: TokenClass) -> HexColor {
        self.style(class).color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_uses_builtin_colors() {
        let theme = SyntaxTheme::default();
        assert_eq!(theme.color(TokenClass::Keyword).to_hex(), "#5151F0");
        assert_eq!(theme.color(TokenClass::Operator).to_hex(), "#F79F34");
        assert_eq!(theme.color(TokenClass::String).to_hex(), "#F54141");
        assert_eq!(theme.color(TokenClass::Comment).to_hex(), "#2AC52A");
        assert_eq!(theme.color(TokenClass::Function).to_hex(), "#D8AA37");
    }

    #[test]
    fn font_styles_are_fixed_per_class() {
        let theme = SyntaxTheme::from_source("[colors]\nkeyword = #000000", "test");
        assert!(theme.style(TokenClass::Keyword).is_bold());
        assert!(theme.style(TokenClass::Comment).is_italic());
        for class in [TokenClass::Operator, TokenClass::String, TokenClass::Function] {
            assert_eq!(theme.style(class).font_style, FontStyle::Plain);
        }
    }

    #[test]
    fn partial_theme_mixes_configured_and_default() {
        let theme = SyntaxTheme::from_source("[colors]\nstring = #00FF00\n", "test");
        assert_eq!(theme.color(TokenClass::String), HexColor::rgb(0, 255, 0));
        assert_eq!(
            theme.color(TokenClass::Keyword),
            TokenClass::Keyword.default_color()
        );
        assert_eq!(
            theme.color(TokenClass::Function),
            TokenClass::Function.default_color()
        );
    }

    #[test]
    fn every_subset_of_missing_keys_falls_back() {
        let configured = HexColor::rgb(1, 2, 3);
        // Each bit of `mask` decides whether that class is present in the file.
        for mask in 0u8..32 {
            let mut text = String::from("[colors]\n");
            for (i, class) in TokenClass::ALL.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    text.push_str(&format!("{} = {}\n", class.key(), configured));
                }
            }
            let theme = SyntaxTheme::from_source(&text, "mask");
            for (i, class) in TokenClass::ALL.iter().enumerate() {
                let expected = if mask & (1 << i) != 0 {
                    configured
                } else {
                    class.default_color()
                };
                assert_eq!(theme.color(*class), expected, "mask {mask:05b}, {class}");
            }
        }
    }

    #[test]
    fn malformed_source_falls_back_to_defaults() {
        let theme = SyntaxTheme::from_source("keyword = #FF0000", "test");
        assert_eq!(theme, SyntaxTheme::default());
    }

    #[test]
    fn invalid_color_value_falls_back_for_that_class_only() {
        let theme = SyntaxTheme::from_source(
            "[colors]\nkeyword = not-a-color\ncomment = #ABCDEF",
            "test",
        );
        assert_eq!(
            theme.color(TokenClass::Keyword),
            TokenClass::Keyword.default_color()
        );
        assert_eq!(theme.color(TokenClass::Comment), HexColor::rgb(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn colors_outside_the_colors_section_are_ignored() {
        let theme = SyntaxTheme::from_source("[other]\nkeyword = #FF0000", "test");
        assert_eq!(theme, SyntaxTheme::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let theme = SyntaxTheme::load(Path::new("/definitely/not/here/theme.lib"));
        assert_eq!(theme, SyntaxTheme::default());
    }
}
