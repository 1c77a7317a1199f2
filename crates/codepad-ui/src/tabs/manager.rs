//! Tab manager for handling multiple open editor surfaces.
use std::path::Path;

use codepad_config::LanguageRegistry;
use codepad_core::document::UNTITLED;
use codepad_core::{Document, EditorSurface, GutterMetrics};

/// Block height used until the widget measures the real font.
const INITIAL_BLOCK_HEIGHT: f32 = 18.0;

/// Manages open document tabs. Each tab is an [`EditorSurface`] with its
/// own highlighter and gutter.
#[derive(Debug)]
pub struct TabManager {
    pub surfaces: Vec<EditorSurface>,
    /// Index of the active tab.
    pub active: usize,
    /// Maps file extensions to languages; consulted on open, save-as and tab switch.
    pub registry: LanguageRegistry,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(LanguageRegistry::default())
    }
}

impl TabManager {
    /// Creates a tab manager with one empty document.
    pub fn new(registry: LanguageRegistry) -> Self {
        let mut tabs = Self {
            surfaces: Vec::new(),
            active: 0,
            registry,
        };
        let surface = tabs.create_surface(Document::new());
        tabs.surfaces.push(surface);
        tabs
    }

    pub fn active_surface(&self) -> &EditorSurface {
        &self.surfaces[self.active]
    }

    pub fn active_surface_mut(&mut self) -> &mut EditorSurface {
        &mut self.surfaces[self.active]
    }

    pub fn active_doc(&self) -> &Document {
        self.active_surface().document()
    }

    /// Adds a new empty document tab and switches to it.
    pub fn new_tab(&mut self) {
        let mut doc = Document::new();
        doc.title = self.next_untitled_title();
        let surface = self.create_surface(doc);
        self.surfaces.push(surface);
        self.active = self.surfaces.len() - 1;
    }

    /// Returns the next available "Untitled" title.
    ///
    /// Numbers always increase: "Untitled", "Untitled 2", "Untitled 3", etc.
    /// Closing an earlier tab does not cause its number to be reused.
    pub fn next_untitled_title(&self) -> String {
        let max_n = self
            .surfaces
            .iter()
            .map(|s| Self::parse_untitled_number(&s.document().title))
            .max()
            .unwrap_or(0);
        match max_n + 1 {
            1 => UNTITLED.to_string(),
            n => format!("{UNTITLED} {n}"),
        }
    }

    /// Extracts the untitled number from a tab title, or 0 if not an untitled tab.
    fn parse_untitled_number(title: &str) -> usize {
        if title == UNTITLED {
            1
        } else if let Some(suffix) = title.strip_prefix(UNTITLED).and_then(|t| t.strip_prefix(' ')) {
            suffix.parse::<usize>().unwrap_or(0)
        } else {
            0
        }
    }

    /// Opens a file in a new tab, or switches to it if it is already open.
    pub fn open_file(&mut self, path: &Path) -> anyhow::Result<()> {
        if let Some(idx) = self
            .surfaces
            .iter()
            .position(|s| s.document().file_path.as_deref() == Some(path))
        {
            self.switch_to(idx);
            return Ok(());
        }

        let doc = Document::open(path)?;
        let surface = self.create_surface(doc);
        self.surfaces.push(surface);
        self.active = self.surfaces.len() - 1;
        Ok(())
    }

    /// Saves the active tab to `path` and re-detects its language.
    pub fn save_active_as(&mut self, path: &Path) -> anyhow::Result<()> {
        let registry = &self.registry;
        let surface = &mut self.surfaces[self.active];
        surface.document_mut().save_to(path)?;
        surface.apply_language(registry);
        Ok(())
    }

    /// Closes a tab by index. Closing the last tab leaves one empty tab.
    /// Returns true if a tab was closed.
    pub fn close_tab(&mut self, idx: usize) -> bool {
        if idx >= self.surfaces.len() {
            return false;
        }

        if self.surfaces.len() == 1 {
            self.surfaces[0] = self.create_surface(Document::new());
            self.active = 0;
            return true;
        }

        self.surfaces.remove(idx);
        if self.active >= self.surfaces.len() {
            self.active = self.surfaces.len() - 1;
        } else if self.active > idx {
            self.active -= 1;
        }
        true
    }

    /// Switches to a tab and reloads its language theme.
    pub fn switch_to(&mut self, idx: usize) {
        if idx >= self.surfaces.len() {
            return;
        }
        self.active = idx;
        let registry = &self.registry;
        self.surfaces[idx].apply_language(registry);
    }

    pub fn tab_count(&self) -> usize {
        self.surfaces.len()
    }

    fn create_surface(&self, doc: Document) -> EditorSurface {
        let mut surface = EditorSurface::new(doc, GutterMetrics::default(), INITIAL_BLOCK_HEIGHT);
        surface.apply_language(&self.registry);
        surface
    }
}
