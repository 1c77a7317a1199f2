/// Application configuration: load, save, merge, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::{builtin_dark, builtin_light, ThemeDefinition};

/// File name of the configuration stored next to the executable.
pub const CONFIG_FILE_NAME: &str = "codepad.json";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub current_theme: String,
    pub font_size: f32,
    /// Block height as a multiple of the font's line spacing.
    pub line_height_factor: f32,
    pub show_line_numbers: bool,
    /// Horizontal space added to the digits in the gutter, in pixels.
    pub gutter_padding: f32,
    /// Gap between the line numbers and the gutter's right edge, in pixels.
    pub gutter_right_margin: f32,
    /// Monospace bold font file for bold tokens. When unset, a few common
    /// system locations are tried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold_font: Option<PathBuf>,
    /// Path of the language registry. Relative paths resolve against the
    /// working directory, then the executable's directory.
    pub language_registry: PathBuf,
    /// Last folder used in an open/save dialog.
    pub last_used_folder: String,
    pub themes: Vec<ThemeDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_theme: "Dark".to_string(),
            font_size: 14.0,
            line_height_factor: 1.3,
            show_line_numbers: true,
            gutter_padding: 10.0,
            gutter_right_margin: 5.0,
            bold_font: None,
            language_registry: PathBuf::from("lib/themes.json"),
            last_used_folder: String::new(),
            themes: vec![builtin_dark(), builtin_light()],
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `codepad.json`.
    pub fn config_path() -> PathBuf {
        exe_dir()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.with_builtins_merged();
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Broken files are left untouched
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Ensures built-in Dark and Light themes are always present.
    /// User-defined themes with matching names take priority over built-ins.
    pub fn with_builtins_merged(&mut self) {
        let has_dark = self.themes.iter().any(|t| t.name == "Dark");
        let has_light = self.themes.iter().any(|t| t.name == "Light");

        if !has_dark {
            self.themes.insert(0, builtin_dark());
        }
        if !has_light {
            let insert_at = 1.min(self.themes.len());
            self.themes.insert(insert_at, builtin_light());
        }
    }

    pub fn find_theme(&self, name: &str) -> Option<&ThemeDefinition> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// The active theme, falling back to the built-in dark theme.
    pub fn active_theme(&self) -> ThemeDefinition {
        self.find_theme(&self.current_theme)
            .cloned()
            .unwrap_or_else(builtin_dark)
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// Locates the language registry file.
    ///
    /// Absolute paths are returned as-is. A relative path is tried against
    /// the working directory first, then the executable's directory.
    pub fn resolve_registry_path(&self) -> PathBuf {
        let path = &self.language_registry;
        if path.is_absolute() || path.exists() {
            return path.clone();
        }
        exe_dir()
            .map(|d| d.join(path))
            .filter(|p| p.exists())
            .unwrap_or_else(|| path.clone())
    }

    /// Returns the starting directory for file dialogs.
    pub fn resolve_work_folder(&self) -> Option<PathBuf> {
        if !self.last_used_folder.is_empty() {
            let p = PathBuf::from(&self.last_used_folder);
            if p.is_dir() {
                return Some(p);
            }
        }
        dirs::home_dir()
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.font_size = self.font_size.clamp(6.0, 72.0);
        self.line_height_factor = self.line_height_factor.clamp(1.0, 3.0);
        self.gutter_padding = self.gutter_padding.max(0.0);
        self.gutter_right_margin = self.gutter_right_margin.max(0.0);
        if self.find_theme(&self.current_theme).is_none() {
            self.current_theme = "Dark".to_string();
        }
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.current_theme, "Dark");
        assert!((config.line_height_factor - 1.3).abs() < f32::EPSILON);
        assert!((config.gutter_padding - 10.0).abs() < f32::EPSILON);
        assert!((config.gutter_right_margin - 5.0).abs() < f32::EPSILON);
        assert!(config.show_line_numbers);
        assert_eq!(config.language_registry, PathBuf::from("lib/themes.json"));
        assert_eq!(config.theme_names(), vec!["Dark", "Light"]);
    }

    #[test]
    fn test_sanitize_clamps_font_size() {
        let mut config = AppConfig::default();
        config.font_size = 2.0;
        config.sanitize();
        assert!((config.font_size - 6.0).abs() < f32::EPSILON);

        config.font_size = 100.0;
        config.sanitize();
        assert!((config.font_size - 72.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_clamps_line_height() {
        let mut config = AppConfig::default();
        config.line_height_factor = 0.2;
        config.sanitize();
        assert!((config.line_height_factor - 1.0).abs() < f32::EPSILON);

        config.line_height_factor = 9.0;
        config.sanitize();
        assert!((config.line_height_factor - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_resets_unknown_theme() {
        let mut config = AppConfig::default();
        config.current_theme = "NonExistent".to_string();
        config.sanitize();
        assert_eq!(config.current_theme, "Dark");
    }

    #[test]
    fn test_sanitize_allows_custom_theme_name() {
        let mut config = AppConfig::default();
        let mut custom = builtin_dark();
        custom.name = "Midnight".to_string();
        config.themes.push(custom);
        config.current_theme = "Midnight".to_string();
        config.sanitize();
        assert_eq!(config.current_theme, "Midnight");
    }

    #[test]
    fn test_with_builtins_merged_preserves_custom() {
        let mut custom_dark = builtin_dark();
        custom_dark.editor.bg_color = crate::HexColor::rgb(255, 0, 0);

        let mut config = AppConfig::default();
        config.themes = vec![custom_dark];
        config.with_builtins_merged();

        let dark = config.find_theme("Dark").unwrap();
        assert_eq!(dark.editor.bg_color, crate::HexColor::rgb(255, 0, 0));
        assert!(config.find_theme("Light").is_some());
    }

    #[test]
    fn test_active_theme_falls_back_to_dark() {
        let mut config = AppConfig::default();
        config.themes.clear();
        config.current_theme = "Light".to_string();
        assert_eq!(config.active_theme().name, "Dark");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"font_size": 20.0}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert!((parsed.font_size - 20.0).abs() < f32::EPSILON);
        assert!((parsed.line_height_factor - 1.3).abs() < f32::EPSILON);
        assert!(parsed.show_line_numbers);
    }

    #[test]
    fn test_absolute_registry_path_is_kept() {
        let mut config = AppConfig::default();
        let abs = std::env::temp_dir().join("nowhere").join("themes.json");
        config.language_registry = abs.clone();
        assert_eq!(config.resolve_registry_path(), abs);
    }
}
