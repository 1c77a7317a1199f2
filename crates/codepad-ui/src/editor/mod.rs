mod canvas;
mod fonts;
mod input;
mod layout;
mod theme;
mod widget;

pub use canvas::EguiGutterCanvas;
pub use fonts::install_bold_font;
pub use layout::{block_job, BlockFonts};
pub use theme::EditorTheme;
pub use widget::EditorWidget;
