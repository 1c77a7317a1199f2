//! Language registry: maps file extensions to a display name and a syntax theme file.
//!
//! The registry is a JSON document:
//!
//! ```json
//! {
//!   "default_name": "Plain Text",
//!   "default_theme": "txt/txt.lib",
//!   "languages": {
//!     ".py": { "name": "Python", "theme": "python/python.lib" }
//!   }
//! }
//! ```
//!
//! Relative theme paths read from the file are resolved against the
//! directory holding it. Without a `default_theme`, the built-in
//! [`DEFAULT_THEME_PATH`] is used as is.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Display name used when no extension matches.
pub const DEFAULT_LANGUAGE_NAME: &str = "Plain Text";
/// Theme used when no extension matches and the registry names none.
/// Relative to the working directory.
pub const DEFAULT_THEME_PATH: &str = "lib/txt/txt.lib";

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default = "unknown_name")]
    pub name: String,
    pub theme: PathBuf,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// The result of resolving a file against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMatch {
    pub name: String,
    pub theme_path: PathBuf,
    /// Whether an extension entry matched (false for the default language).
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRegistry {
    pub default_name: String,
    /// `None` selects [`DEFAULT_THEME_PATH`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<PathBuf>,
    pub languages: HashMap<String, LanguageEntry>,
    /// Directory that relative theme paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_LANGUAGE_NAME.to_string(),
            default_theme: None,
            languages: HashMap::new(),
            base_dir: PathBuf::new(),
        }
    }
}

/// Normalizes an extension key: lower-case, with a leading dot.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

impl LanguageRegistry {
    /// Loads the registry from `path`.
    /// Returns defaults (and logs a warning) on any read or parse error.
    pub fn load(path: &Path) -> Self {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(registry) => {
                    tracing::debug!(
                        "Loaded {} language entries from {}",
                        registry.languages.len(),
                        path.display()
                    );
                    registry.with_base_dir(base_dir)
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse language registry {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read language registry {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Parses registry JSON and normalizes its extension keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut registry: Self = serde_json::from_str(json)?;
        registry.languages = registry
            .languages
            .into_iter()
            .map(|(ext, entry)| (normalize_extension(&ext), entry))
            .collect();
        Ok(registry)
    }

    /// Sets the directory relative theme paths resolve against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Adds or replaces an extension entry.
    pub fn insert(&mut self, ext: &str, name: &str, theme: impl Into<PathBuf>) {
        self.languages.insert(
            normalize_extension(ext),
            LanguageEntry {
                name: name.to_string(),
                theme: theme.into(),
            },
        );
    }

    /// Looks up the language of `file`. `None` (no file open) and unknown
    /// extensions resolve to the default language.
    pub fn resolve(&self, file: Option<&Path>) -> LanguageMatch {
        let entry = file
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|ext| self.languages.get(&normalize_extension(ext)));

        match entry {
            Some(entry) => LanguageMatch {
                name: entry.name.clone(),
                theme_path: self.resolve_path(&entry.theme),
                matched: true,
            },
            None => LanguageMatch {
                name: self.default_name.clone(),
                theme_path: self
                    .default_theme
                    .as_deref()
                    .map_or_else(|| PathBuf::from(DEFAULT_THEME_PATH), |p| self.resolve_path(p)),
                matched: false,
            },
        }
    }

    fn resolve_path(&self, theme: &Path) -> PathBuf {
        if theme.is_absolute() || self.base_dir.as_os_str().is_empty() {
            theme.to_path_buf()
        } else {
            self.base_dir.join(theme)
        }
    }
}
