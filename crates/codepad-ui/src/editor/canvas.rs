//! `GutterCanvas` over an egui painter.

use codepad_config::HexColor;
use codepad_core::{GutterCanvas, PixelRect};
use egui::{Align2, FontId, Painter, Pos2, Rect, Vec2};

use super::theme::hex_to_color32;

/// Maps a gutter-local rectangle to screen space.
pub(crate) fn to_screen(origin: Pos2, rect: PixelRect) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + rect.x, origin.y + rect.y),
        Vec2::new(rect.width, rect.height),
    )
}

/// Paints the gutter for one frame. `origin` is the screen position of the
/// gutter's top-left corner.
pub struct EguiGutterCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
    font_id: FontId,
}

impl<'a> EguiGutterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, font_id: FontId) -> Self {
        Self {
            painter,
            origin,
            font_id,
        }
    }
}

impl GutterCanvas for EguiGutterCanvas<'_> {
    fn fill_rect(&mut self, rect: PixelRect, color: HexColor) {
        self.painter
            .rect_filled(to_screen(self.origin, rect), 0.0, hex_to_color32(color));
    }

    fn draw_number(&mut self, rect: PixelRect, text: &str, color: HexColor) {
        let row = to_screen(self.origin, rect);
        self.painter.text(
            row.right_center(),
            Align2::RIGHT_CENTER,
            text,
            self.font_id.clone(),
            hex_to_color32(color),
        );
    }

    fn scroll(&mut self, _dy: f32) {
        // egui keeps nothing between frames, so there is nothing to shift;
        // the widget repaints the whole gutter every frame.
    }
}
