//! Core editor widget: layout, painting, scrolling, and mouse interaction.
//!
//! `EditorWidget` feeds egui input into an [`EditorSurface`] and paints the
//! result each frame: the gutter through [`EguiGutterCanvas`] and the text
//! from each block's styled runs.

use codepad_core::cursor::Position;
use codepad_core::{EditorSurface, GutterMetrics, SurfaceRequest, ViewportSource};
use egui::{text::LayoutJob, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, TextFormat, Ui, Vec2};

use super::canvas::EguiGutterCanvas;
use super::layout::{block_job, BlockFonts};
use super::theme::EditorTheme;

/// Left padding inside the text area so content doesn't touch the gutter edge.
const TEXT_LEFT_PADDING: f32 = 6.0;

/// Columns `[start, end)` of `line` covered by the char range `[start, end)`.
///
/// The line's newline counts as one extra column so selections spanning
/// lines stay visible on empty lines.
fn span_columns(line_start: usize, line_chars: usize, start: usize, end: usize) -> Option<(usize, usize)> {
    let line_end = line_start + line_chars + 1;
    let from = start.max(line_start);
    let to = end.min(line_end);
    (from < to).then(|| (from - line_start, to - line_start))
}

/// The custom editor widget that renders an `EditorSurface`.
pub struct EditorWidget<'a> {
    pub surface: &'a mut EditorSurface,
    pub theme: &'a EditorTheme,
    pub show_line_numbers: bool,
    /// When true, the editor won't grab focus on its own, so text fields
    /// elsewhere keep it.
    pub dialog_open: bool,
    /// Char ranges painted with the find-match color.
    pub highlights: &'a [(usize, usize)],
}

impl<'a> EditorWidget<'a> {
    pub fn new(surface: &'a mut EditorSurface, theme: &'a EditorTheme) -> Self {
        Self {
            surface,
            theme,
            show_line_numbers: true,
            dialog_open: false,
            highlights: &[],
        }
    }

    /// Shows the editor widget and returns a response.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let rect = response.rect;

        let glyph = measure_glyph(ui, &self.theme.font_id);
        let char_width = glyph.x.max(1.0);
        let block_height = (glyph.y * self.theme.line_height_factor).round().max(1.0);
        self.sync_geometry(rect.height(), char_width, block_height);

        let (_, text_area) = self.split(rect);

        // ── Input ───────────────────────────────────────────────

        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                // egui reports content motion; the surface wants document motion
                self.surface.scroll_by(-scroll_delta);
            }
        }

        let cursor_before = self.surface.document().cursor.position;

        if response.clicked() || response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                if text_area.contains(pos) {
                    let extend = response.drag_started() && ui.input(|i| i.modifiers.shift);
                    let target = self.screen_to_position(pos, &text_area, char_width);
                    self.surface.set_cursor(target, extend);
                }
            }
            response.request_focus();
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let target = self.screen_to_position(pos, &text_area, char_width);
                self.surface.set_cursor(target, true);
            }
        }

        if !self.dialog_open && !response.has_focus() && !response.lost_focus() {
            response.request_focus();
        }

        // Keep Tab and arrows away from egui's focus navigation.
        if response.has_focus() {
            ui.memory_mut(|mem| {
                mem.set_focus_lock_filter(
                    response.id,
                    egui::EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                );
            });
            self.handle_keyboard_input(ui, block_height);
        }

        if self.surface.document().cursor.position != cursor_before {
            self.surface.ensure_cursor_visible();
        }

        self.drain_requests();

        // ── Paint ───────────────────────────────────────────────

        // The gutter may have widened during input
        let (gutter_rect, text_area) = self.split(rect);

        painter.rect_filled(rect, 0.0, self.theme.bg_color);
        self.paint_text(ui, &painter, &text_area, char_width, block_height);
        if self.show_line_numbers {
            self.paint_gutter(&painter, gutter_rect);
        }
        if response.has_focus() {
            self.paint_cursor(&painter, &text_area, char_width, block_height);
        }

        response
    }

    /// Pushes this frame's font metrics and size into the surface.
    fn sync_geometry(&mut self, height: f32, char_width: f32, block_height: f32) {
        if (self.surface.viewport().block_height(0) - block_height).abs() > f32::EPSILON {
            self.surface.set_block_height(block_height);
        }
        self.surface.set_gutter_metrics(GutterMetrics {
            digit_width: char_width,
            padding: self.theme.gutter_padding,
            right_margin: self.theme.gutter_right_margin,
        });
        self.surface.set_gutter_colors(self.theme.gutter);
        self.surface.resize_viewport(height);
    }

    /// Gutter and text area for the current gutter width.
    fn split(&self, rect: Rect) -> (Rect, Rect) {
        let gutter_width = if self.show_line_numbers {
            self.surface.gutter_width()
        } else {
            0.0
        };
        let gutter_rect = Rect::from_min_size(rect.min, Vec2::new(gutter_width, rect.height()));
        let text_area = Rect::from_min_max(
            Pos2::new(rect.min.x + gutter_width + TEXT_LEFT_PADDING, rect.min.y),
            rect.max,
        );
        (gutter_rect, text_area)
    }

    /// Empties the surface's request queue. The whole gutter is repainted
    /// every frame, so paint and scroll requests need no further action.
    fn drain_requests(&mut self) {
        for request in self.surface.take_requests() {
            match request {
                SurfaceRequest::GeometryInvalidated => {
                    tracing::trace!("Gutter width now {}", self.surface.gutter_width());
                }
                SurfaceRequest::PaintRegion(_)
                | SurfaceRequest::ScrollGutter { .. }
                | SurfaceRequest::SetBlockFormats { .. } => {}
            }
        }
        self.surface.take_gutter_dirty();
    }

    fn paint_gutter(&self, painter: &Painter, gutter_rect: Rect) {
        let gutter_painter = painter.with_clip_rect(gutter_rect);
        let mut canvas =
            EguiGutterCanvas::new(&gutter_painter, gutter_rect.min, self.theme.font_id.clone());
        let region = self.surface.viewport().rect(gutter_rect.width());
        self.surface.paint_gutter(region, &mut canvas);

        painter.line_segment(
            [gutter_rect.right_top(), gutter_rect.right_bottom()],
            Stroke::new(1.0, self.theme.gutter_separator_color),
        );
    }

    /// Paints visible blocks: current-line band, find matches, selection, text.
    fn paint_text(&self, ui: &Ui, painter: &Painter, text_area: &Rect, char_width: f32, block_height: f32) {
        let text_painter = painter.with_clip_rect(*text_area);
        let fonts = BlockFonts {
            regular: self.theme.font_id.clone(),
            bold_spacing: self
                .theme
                .bold_font_id
                .as_ref()
                .map_or(0.0, |bold| char_width - measure_glyph(ui, bold).x),
            bold: self.theme.bold_font_id.clone(),
        };
        let viewport = self.surface.viewport();
        let doc = self.surface.document();
        let selection = doc.cursor.selection_char_range(&doc.buffer).ok().flatten();
        let cursor_line = doc.cursor.position.line;

        let mut block = viewport.first_visible_block();
        let mut top = text_area.min.y + viewport.first_block_top();
        while block < viewport.block_count() && top < text_area.max.y {
            if viewport.is_hidden(block) {
                block += 1;
                continue;
            }
            let Ok(text) = doc.buffer.line_text(block) else {
                break;
            };
            let line_start = doc.buffer.line_to_char(block).unwrap_or(0);
            let line_chars = text.chars().count();
            let row = Rect::from_min_size(
                Pos2::new(text_area.min.x, top),
                Vec2::new(text_area.width(), block_height),
            );

            if block == cursor_line && selection.is_none() {
                text_painter.rect_filled(row, 0.0, self.theme.current_line_highlight);
            }
            let band = |from: usize, to: usize| {
                Rect::from_min_max(
                    Pos2::new(row.min.x + from as f32 * char_width, row.min.y),
                    Pos2::new(row.min.x + to as f32 * char_width, row.max.y),
                )
            };
            for &(start, end) in self.highlights {
                if let Some((from, to)) = span_columns(line_start, line_chars, start, end) {
                    text_painter.rect_filled(band(from, to), 0.0, self.theme.find_match_color);
                }
            }
            if let Some((start, end)) = selection {
                if let Some((from, to)) = span_columns(line_start, line_chars, start, end) {
                    text_painter.rect_filled(band(from, to), 0.0, self.theme.selection_color);
                }
            }

            // Tabs and spaces are both one byte, so run offsets stay valid
            let render = text.replace('\t', " ");
            let job = block_job(
                &render,
                &self.surface.block_runs(block),
                &fonts,
                self.theme.text_color,
            );
            let galley = ui.fonts_mut(|f| f.layout_job(job));
            let text_y = top + (block_height - galley.size().y) / 2.0;
            text_painter.galley(Pos2::new(text_area.min.x, text_y), galley, self.theme.text_color);

            top += block_height;
            block += 1;
        }
    }

    fn paint_cursor(&self, painter: &Painter, text_area: &Rect, char_width: f32, block_height: f32) {
        let pos = self.surface.document().cursor.position;
        let Some(top) = self.surface.viewport().block_top(pos.line) else {
            return;
        };
        let x = text_area.min.x + pos.col as f32 * char_width;
        let y = text_area.min.y + top;
        if y + block_height < text_area.min.y || y > text_area.max.y {
            return;
        }
        painter.with_clip_rect(*text_area).line_segment(
            [Pos2::new(x, y), Pos2::new(x, y + block_height)],
            Stroke::new(2.0, self.theme.cursor_color),
        );
    }

    /// Converts a screen position in the text area to a document position.
    fn screen_to_position(&self, pos: Pos2, text_area: &Rect, char_width: f32) -> Position {
        let block = self.surface.viewport().block_at_y(pos.y - text_area.min.y);
        let col = ((pos.x - text_area.min.x) / char_width).round().max(0.0) as usize;
        Position::new(block, col)
    }
}

/// Size of the digit `9` in the editor font.
fn measure_glyph(ui: &Ui, font_id: &FontId) -> Vec2 {
    let mut job = LayoutJob::default();
    job.append(
        "9",
        0.0,
        TextFormat {
            font_id: font_id.clone(),
            ..Default::default()
        },
    );
    let galley = ui.fonts_mut(|f| f.layout_job(job));
    galley.size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_inside_line() {
        // Line "hello" starting at char 10
        assert_eq!(span_columns(10, 5, 11, 13), Some((1, 3)));
    }

    #[test]
    fn span_crossing_lines_is_clipped() {
        assert_eq!(span_columns(10, 5, 0, 100), Some((0, 6)));
        assert_eq!(span_columns(10, 5, 14, 100), Some((4, 6)));
    }

    #[test]
    fn span_outside_line() {
        assert_eq!(span_columns(10, 5, 0, 10), None);
        assert_eq!(span_columns(10, 5, 16, 20), None);
        assert_eq!(span_columns(10, 5, 12, 12), None);
    }

    #[test]
    fn selected_empty_line_shows_one_column() {
        assert_eq!(span_columns(4, 0, 0, 8), Some((0, 1)));
    }
}
