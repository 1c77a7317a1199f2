//! Edit menu actions: undo/redo, clipboard, and select all.
//!
//! Keyboard copy/cut/paste arrive as egui events inside the editor widget;
//! these methods back the menu entries and the undo shortcuts.

use eframe::egui;

use super::App;

impl App {
    pub(crate) fn undo(&mut self) {
        let surface = self.tabs.active_surface_mut();
        match surface.undo() {
            Ok(true) => surface.ensure_cursor_visible(),
            Ok(false) => {}
            Err(e) => self.report_error("Undo failed", &e),
        }
    }

    pub(crate) fn redo(&mut self) {
        let surface = self.tabs.active_surface_mut();
        match surface.redo() {
            Ok(true) => surface.ensure_cursor_visible(),
            Ok(false) => {}
            Err(e) => self.report_error("Redo failed", &e),
        }
    }

    /// Copies the selection to the clipboard.
    pub(crate) fn copy(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.tabs.active_doc().selected_text() {
            ctx.copy_text(text);
        }
    }

    /// Copies the selection, then deletes it.
    pub(crate) fn cut(&mut self, ctx: &egui::Context) {
        if self.tabs.active_doc().selected_text().is_none() {
            return;
        }
        self.copy(ctx);
        if let Err(e) = self.tabs.active_surface_mut().replace_selection("") {
            self.report_error("Cut failed", &e);
        }
    }

    /// Inserts the system clipboard text at the cursor.
    pub(crate) fn paste(&mut self) {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        let text = match clipboard.get_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Clipboard has no text: {e}");
                return;
            }
        };
        self.paste_text(&text);
    }

    pub(crate) fn paste_text(&mut self, text: &str) {
        let surface = self.tabs.active_surface_mut();
        match surface.replace_selection(text) {
            Ok(()) => surface.ensure_cursor_visible(),
            Err(e) => self.report_error("Paste failed", &e),
        }
    }

    pub(crate) fn select_all(&mut self) {
        let surface = self.tabs.active_surface_mut();
        let len = surface.document().buffer.len_chars();
        surface.select_range(0, len);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use codepad_config::{AppConfig, LanguageRegistry};

    use super::*;

    fn test_app() -> App {
        App::with_config(
            AppConfig::default(),
            PathBuf::from("codepad.json"),
            LanguageRegistry::default(),
        )
    }

    #[test]
    fn test_undo_redo_active_tab() {
        let mut app = test_app();
        app.tabs.active_surface_mut().insert_text("hello").unwrap();
        app.undo();
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "");
        app.redo();
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "hello");
    }

    #[test]
    fn test_undo_with_empty_history_is_silent() {
        let mut app = test_app();
        app.undo();
        app.redo();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_cut_removes_selection() {
        let ctx = egui::Context::default();
        let mut app = test_app();
        app.tabs.active_surface_mut().insert_text("one two").unwrap();
        app.tabs.active_surface_mut().select_range(0, 4);
        app.cut(&ctx);
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "two");
    }

    #[test]
    fn test_paste_text_normalizes_crlf_and_is_undoable() {
        let mut app = test_app();
        app.paste_text("a\r\nb");
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "a\nb");
        app.undo();
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "");
    }

    #[test]
    fn test_select_all() {
        let mut app = test_app();
        app.tabs.active_surface_mut().insert_text("ab\ncd").unwrap();
        app.select_all();
        assert_eq!(app.tabs.active_doc().selected_text().as_deref(), Some("ab\ncd"));
    }
}
