pub mod color;
pub mod config;
pub mod ini;
pub mod languages;
pub mod syntax_theme;
pub mod theme;

pub use color::HexColor;
pub use config::AppConfig;
pub use languages::{LanguageMatch, LanguageRegistry};
pub use syntax_theme::{FontStyle, SyntaxTheme, TokenClass, TokenStyle};
pub use theme::{EditorColors, ThemeDefinition, UiColors};
