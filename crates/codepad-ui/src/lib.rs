//! egui front-end for codepad: tabbed editor widget, find bar, menus, and status bar.

mod app;
pub mod editor;
pub mod find_bar;
pub mod tabs;

pub use app::{App, StartupArgs};
pub use editor::{BlockFonts, EditorTheme, EditorWidget, EguiGutterCanvas};
pub use find_bar::{FindAction, FindBar};
pub use tabs::TabManager;
