//! Editor theme configuration.
//!
//! Colors for the text area and the line-number gutter, plus the font and
//! spacing the widget lays blocks out with.

use codepad_config::{AppConfig, EditorColors, HexColor};
use codepad_core::GutterColors;
use egui::{Color32, FontId};

use super::fonts::bold_font_id;

/// Converts a `HexColor` to egui `Color32`.
pub(crate) fn hex_to_color32(c: HexColor) -> Color32 {
    Color32::from_rgba_premultiplied(c.r, c.g, c.b, c.a)
}

/// Configuration for the editor widget appearance.
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub font_size: f32,
    pub font_id: FontId,
    /// Font for bold tokens, set once the bold family is registered.
    pub bold_font_id: Option<FontId>,
    /// Block height as a multiple of the font row height.
    pub line_height_factor: f32,
    pub gutter_padding: f32,
    pub gutter_right_margin: f32,
    pub bg_color: Color32,
    pub text_color: Color32,
    pub cursor_color: Color32,
    pub selection_color: Color32,
    pub current_line_highlight: Color32,
    pub gutter_separator_color: Color32,
    pub find_match_color: Color32,
    /// Gutter colors stay in config form; the core renderer paints with them.
    pub gutter: GutterColors,
}

impl Default for EditorTheme {
    fn default() -> Self {
        let config = AppConfig::default();
        Self::from_config(&EditorColors::default(), &config)
    }
}

impl EditorTheme {
    /// Builds an `EditorTheme` from theme colors and the font/spacing settings.
    pub fn from_config(editor: &EditorColors, config: &AppConfig) -> Self {
        Self {
            font_size: config.font_size,
            font_id: FontId::monospace(config.font_size),
            bold_font_id: None,
            line_height_factor: config.line_height_factor,
            gutter_padding: config.gutter_padding,
            gutter_right_margin: config.gutter_right_margin,
            bg_color: hex_to_color32(editor.bg_color),
            text_color: hex_to_color32(editor.text_color),
            cursor_color: hex_to_color32(editor.cursor_color),
            selection_color: hex_to_color32(editor.selection_color),
            current_line_highlight: hex_to_color32(editor.current_line_highlight),
            gutter_separator_color: hex_to_color32(editor.gutter_separator_color),
            find_match_color: hex_to_color32(editor.find_match_color),
            gutter: GutterColors {
                background: editor.line_number_bg,
                number: editor.line_number_color,
            },
        }
    }

    /// Same spacing, new colors.
    pub fn with_colors(&self, editor: &EditorColors) -> Self {
        let mut config = AppConfig::default();
        config.font_size = self.font_size;
        config.line_height_factor = self.line_height_factor;
        config.gutter_padding = self.gutter_padding;
        config.gutter_right_margin = self.gutter_right_margin;
        Self {
            bold_font_id: self.bold_font_id.clone(),
            ..Self::from_config(editor, &config)
        }
    }

    /// Renders bold tokens with the registered bold family.
    pub fn with_bold_font(mut self) -> Self {
        self.bold_font_id = Some(bold_font_id(self.font_size));
        self
    }
}
