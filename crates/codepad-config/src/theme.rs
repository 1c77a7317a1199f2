/// Editor color themes: text area, gutter and egui widget palettes.
///
/// These are distinct from syntax themes (`syntax_theme.rs`), which only
/// color tokens and are chosen per language.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Colors for the editor widget (text area and line-number gutter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorColors {
    pub bg_color: HexColor,
    pub text_color: HexColor,
    pub cursor_color: HexColor,
    pub selection_color: HexColor,
    pub line_number_color: HexColor,
    pub line_number_bg: HexColor,
    pub current_line_highlight: HexColor,
    pub gutter_separator_color: HexColor,
    pub find_match_color: HexColor,
}

impl Default for EditorColors {
    fn default() -> Self {
        Self {
            bg_color: HexColor::rgb(0x28, 0x2A, 0x36),
            text_color: HexColor::rgb(0xF8, 0xF8, 0xF2),
            cursor_color: HexColor::rgb(0xF8, 0xF8, 0xF2),
            selection_color: HexColor::rgba(68, 71, 90, 200),
            line_number_color: HexColor::rgb(0x62, 0x72, 0xA4),
            line_number_bg: HexColor::rgb(0x38, 0x3A, 0x59),
            current_line_highlight: HexColor::rgb(0x31, 0x33, 0x42),
            gutter_separator_color: HexColor::rgb(0x44, 0x47, 0x5A),
            find_match_color: HexColor::rgba(100, 100, 50, 80),
        }
    }
}

/// Colors for egui UI elements (panels, widgets, backgrounds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiColors {
    pub panel_fill: HexColor,
    pub window_fill: HexColor,
    pub faint_bg_color: HexColor,
    pub extreme_bg_color: HexColor,
    pub widget_inactive_bg: HexColor,
    pub widget_hovered_bg: HexColor,
    pub widget_active_bg: HexColor,
    pub accent_color: HexColor,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            panel_fill: HexColor::rgb(0x21, 0x22, 0x2C),
            window_fill: HexColor::rgb(0x21, 0x22, 0x2C),
            faint_bg_color: HexColor::rgb(0x28, 0x2A, 0x36),
            extreme_bg_color: HexColor::rgb(0x19, 0x1A, 0x21),
            widget_inactive_bg: HexColor::rgb(0x34, 0x37, 0x46),
            widget_hovered_bg: HexColor::rgb(0x44, 0x47, 0x5A),
            widget_active_bg: HexColor::rgb(0x62, 0x72, 0xA4),
            accent_color: HexColor::rgb(0xBD, 0x93, 0xF9),
        }
    }
}

/// A complete editor color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub dark_mode: bool,
    #[serde(default)]
    pub editor: EditorColors,
    #[serde(default)]
    pub ui: UiColors,
}

/// Built-in dark theme.
pub fn builtin_dark() -> ThemeDefinition {
    ThemeDefinition {
        name: "Dark".to_string(),
        dark_mode: true,
        editor: EditorColors::default(),
        ui: UiColors::default(),
    }
}

/// Built-in light theme.
pub fn builtin_light() -> ThemeDefinition {
    ThemeDefinition {
        name: "Light".to_string(),
        dark_mode: false,
        editor: EditorColors {
            bg_color: HexColor::rgb(255, 255, 255),
            text_color: HexColor::rgb(30, 30, 30),
            cursor_color: HexColor::rgb(0, 0, 0),
            selection_color: HexColor::rgba(100, 150, 230, 100),
            line_number_color: HexColor::rgb(130, 130, 130),
            line_number_bg: HexColor::rgb(240, 240, 240),
            current_line_highlight: HexColor::rgb(232, 242, 254),
            gutter_separator_color: HexColor::rgb(200, 200, 200),
            find_match_color: HexColor::rgba(255, 210, 80, 80),
        },
        ui: UiColors {
            panel_fill: HexColor::rgb(240, 240, 240),
            window_fill: HexColor::rgb(250, 250, 250),
            faint_bg_color: HexColor::rgb(245, 245, 245),
            extreme_bg_color: HexColor::rgb(255, 255, 255),
            widget_inactive_bg: HexColor::rgb(220, 220, 220),
            widget_hovered_bg: HexColor::rgb(210, 210, 210),
            widget_active_bg: HexColor::rgb(200, 200, 200),
            accent_color: HexColor::rgb(50, 120, 200),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_gutter_colors() {
        let dark = builtin_dark();
        assert_eq!(dark.editor.line_number_bg.to_hex(), "#383A59");
        assert_eq!(dark.editor.line_number_color.to_hex(), "#6272A4");
        assert_eq!(dark.editor.bg_color.to_hex(), "#282A36");
        assert_eq!(dark.editor.text_color.to_hex(), "#F8F8F2");
    }

    #[test]
    fn test_builtin_light_round_trip() {
        let theme = builtin_light();
        let json = serde_json::to_string_pretty(&theme).unwrap();
        let parsed: ThemeDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, theme);
    }

    #[test]
    fn test_partial_editor_colors_fills_defaults() {
        let json = r##"{"bg_color": "#FF0000"}"##;
        let colors: EditorColors = serde_json::from_str(json).unwrap();
        assert_eq!(colors.bg_color, HexColor::rgb(255, 0, 0));
        assert_eq!(colors.text_color, EditorColors::default().text_color);
    }

    #[test]
    fn test_partial_theme_definition() {
        let json = r#"{"name": "Custom", "dark_mode": true}"#;
        let theme: ThemeDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(theme.name, "Custom");
        assert_eq!(theme.editor, EditorColors::default());
        assert_eq!(theme.ui, UiColors::default());
    }
}
