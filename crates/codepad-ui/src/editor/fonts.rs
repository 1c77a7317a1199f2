//! Bold font family for bold tokens.
//!
//! egui ships only regular faces, so a bold monospace font is loaded from
//! disk and registered under [`BOLD_FAMILY`]. Without one, bold tokens fall
//! back to the regular face.

use std::path::{Path, PathBuf};

use egui::{FontData, FontDefinitions, FontFamily, FontId};

/// Name of the registered bold family.
pub const BOLD_FAMILY: &str = "codepad-bold";

/// Bold monospace fonts commonly present on Linux, Windows and macOS.
const SYSTEM_BOLD_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
    "C:\\Windows\\Fonts\\consolab.ttf",
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
];

/// TrueType, OpenType or font collection signature.
fn looks_like_font(data: &[u8]) -> bool {
    const SIGNATURES: [&[u8]; 4] = [&[0, 1, 0, 0], b"OTTO", b"true", b"ttcf"];
    SIGNATURES.iter().any(|sig| data.starts_with(sig))
}

/// Reads the configured bold font, or the first system one that exists.
pub fn load_bold_font(configured: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_BOLD_FONTS.iter().map(PathBuf::from));
    for path in candidates {
        match std::fs::read(&path) {
            Ok(data) if looks_like_font(&data) => return Some((path, data)),
            Ok(_) => tracing::warn!("Not a font file: {}", path.display()),
            Err(e) if configured == Some(path.as_path()) => {
                tracing::warn!("Failed to read bold font {}: {e}", path.display());
            }
            Err(_) => {}
        }
    }
    None
}

/// Default font definitions plus the bold family. Glyphs missing from the
/// bold font come from the monospace fonts.
pub fn bold_font_definitions(data: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(BOLD_FAMILY.to_string(), FontData::from_owned(data).into());
    let mut family = vec![BOLD_FAMILY.to_string()];
    family.extend(
        fonts
            .families
            .get(&FontFamily::Monospace)
            .cloned()
            .unwrap_or_default(),
    );
    fonts.families.insert(FontFamily::Name(BOLD_FAMILY.into()), family);
    fonts
}

/// Registers the bold family with `ctx`. Returns whether a font was found.
pub fn install_bold_font(ctx: &egui::Context, configured: Option<&Path>) -> bool {
    let Some((path, data)) = load_bold_font(configured) else {
        tracing::info!("No bold monospace font found; bold tokens use the regular face");
        return false;
    };
    tracing::debug!("Bold font: {}", path.display());
    ctx.set_fonts(bold_font_definitions(data));
    true
}

pub fn bold_font_id(size: f32) -> FontId {
    FontId::new(size, FontFamily::Name(BOLD_FAMILY.into()))
}
