//! Turns a block's styled runs into an egui `LayoutJob`.

use codepad_core::StyledRun;
use egui::{text::LayoutJob, Color32, FontId, TextFormat};

use super::theme::hex_to_color32;

/// Fonts a block is laid out with.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFonts {
    pub regular: FontId,
    /// `None` when no bold face is registered; bold runs then use `regular`.
    pub bold: Option<FontId>,
    /// Added to each bold glyph so it advances like a regular one.
    pub bold_spacing: f32,
}

impl BlockFonts {
    pub fn regular(font_id: FontId) -> Self {
        Self {
            regular: font_id,
            bold: None,
            bold_spacing: 0.0,
        }
    }
}

/// Builds the layout for one block. Runs index `text` by byte and must
/// cover it exactly; unstyled runs use `default_color`.
pub fn block_job(text: &str, runs: &[StyledRun], fonts: &BlockFonts, default_color: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for run in runs {
        let Some(piece) = text.get(run.start..run.end) else {
            tracing::trace!("Skipping run {}..{} outside block text", run.start, run.end);
            continue;
        };
        let (color, italics, bold) = match run.style {
            Some(style) => (hex_to_color32(style.color), style.is_italic(), style.is_bold()),
            None => (default_color, false, false),
        };
        let (font_id, extra_letter_spacing) = match &fonts.bold {
            Some(bold_font) if bold => (bold_font.clone(), fonts.bold_spacing),
            _ => (fonts.regular.clone(), 0.0),
        };
        job.append(
            piece,
            0.0,
            TextFormat {
                font_id,
                extra_letter_spacing,
                color,
                italics,
                ..Default::default()
            },
        );
    }
    job
}
