//! File I/O operations for the editor application.
//!
//! Handles opening files, saving (including save-as), creating new tabs,
//! and closing tabs with unsaved-change prompts.

use std::path::Path;

use super::{App, DialogState};

impl App {
    /// Opens a file dialog and loads the selected file into a new tab.
    pub(crate) fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Open File");
        if let Some(dir) = self.config.resolve_work_folder() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_path(&path);
        }
    }

    /// Opens `path` in a tab, reporting failures in the status bar.
    pub(crate) fn open_path(&mut self, path: &Path) {
        self.update_last_used_folder(path);
        match self.tabs.open_file(path) {
            Ok(()) => self.status_message = None,
            Err(e) => self.report_error("Failed to open file", &e),
        }
    }

    /// Saves the active document, or opens a save-as dialog if it has no file path.
    pub(crate) fn save_active(&mut self) {
        let doc = self.tabs.active_surface_mut().document_mut();
        if doc.file_path.is_none() {
            self.save_as_dialog();
            return;
        }
        match doc.save() {
            Ok(()) => self.status_message = None,
            Err(e) => self.report_error("Failed to save", &e),
        }
    }

    /// Opens a save-as dialog and saves the active document to the chosen path.
    pub(crate) fn save_as_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save As")
            .set_file_name(&self.tabs.active_doc().title);
        if let Some(dir) = self.config.resolve_work_folder() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.save_active_to(&path);
        }
    }

    /// Saves the active document under `path` and re-detects its language.
    pub(crate) fn save_active_to(&mut self, path: &Path) {
        self.update_last_used_folder(path);
        match self.tabs.save_active_as(path) {
            Ok(()) => self.status_message = None,
            Err(e) => self.report_error("Failed to save", &e),
        }
    }

    pub(crate) fn new_tab(&mut self) {
        self.tabs.new_tab();
    }

    /// Requests closing a tab, prompting for unsaved changes if modified.
    pub(crate) fn request_close_tab(&mut self, idx: usize) {
        let Some(surface) = self.tabs.surfaces.get(idx) else {
            return;
        };
        if surface.document().modified {
            self.dialog_state = DialogState::ConfirmClose(idx);
        } else {
            self.tabs.close_tab(idx);
        }
    }

    /// Saves a tab and closes it. Untitled tabs go through the save-as
    /// dialog and stay open if it is cancelled.
    pub(crate) fn save_and_close(&mut self, idx: usize) {
        let Some(surface) = self.tabs.surfaces.get_mut(idx) else {
            return;
        };
        let doc = surface.document_mut();
        if doc.file_path.is_some() {
            if let Err(e) = doc.save() {
                self.report_error("Failed to save", &e);
                return;
            }
        } else {
            self.tabs.switch_to(idx);
            self.save_as_dialog();
            if self.tabs.surfaces[idx].document().modified {
                return;
            }
        }
        self.tabs.close_tab(idx);
    }

    /// Updates `last_used_folder` from a file path's parent directory.
    fn update_last_used_folder(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.config.last_used_folder = parent.to_string_lossy().into_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use codepad_config::{AppConfig, LanguageRegistry};

    use super::*;

    fn test_app() -> App {
        App::with_config(
            AppConfig::default(),
            std::path::PathBuf::from("codepad.json"),
            LanguageRegistry::default(),
        )
    }

    #[test]
    fn test_open_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.open_path(&dir.path().join("gone.py"));
        assert!(app.status_message.unwrap().contains("Failed to open file"));
        assert_eq!(app.tabs.tab_count(), 1);
    }

    #[test]
    fn test_save_active_to_writes_and_remembers_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.tabs.active_surface_mut().insert_text("hello").unwrap();
        let path = dir.path().join("out.txt");
        app.save_active_to(&path);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(!app.tabs.active_doc().modified);
        assert_eq!(
            app.config.last_used_folder,
            dir.path().to_string_lossy().into_owned()
        );
    }

    #[test]
    fn test_save_and_close_saves_file_backed_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "old").unwrap();

        let mut app = test_app();
        app.open_path(&path);
        app.tabs.active_surface_mut().insert_text("new ").unwrap();
        let idx = app.tabs.active;
        app.save_and_close(idx);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new old");
        assert!(app
            .tabs
            .surfaces
            .iter()
            .all(|s| s.document().file_path.as_deref() != Some(path.as_path())));
    }
}
