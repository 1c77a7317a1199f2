//! Search and replace operations.
//!
//! Runs find/replace actions from the find bar against the active tab.

use codepad_core::cursor::pos_to_char;

use crate::find_bar::FindAction;

use super::App;

impl App {
    /// Forces a fresh search when the active tab or its text changed since
    /// the last one.
    pub(crate) fn invalidate_stale_search(&mut self) {
        let doc = self.tabs.active_doc();
        let current = (self.tabs.active, doc.content_version);
        if self.searched_version != Some(current) {
            self.find_bar.invalidate();
        }
    }

    pub(crate) fn handle_find_action(&mut self, action: FindAction) {
        match action {
            FindAction::Search => self.run_search(),
            FindAction::FindNext => self.step_match(true),
            FindAction::FindPrev => self.step_match(false),
            FindAction::Replace => {
                let surface = self.tabs.active_surface_mut();
                let bar = &mut self.find_bar;
                match bar
                    .engine
                    .replace_current(surface, &bar.replace_text, &bar.options)
                {
                    Ok(true) => {
                        surface.ensure_cursor_visible();
                        bar.status = format!("{} matches", bar.engine.match_count());
                    }
                    Ok(false) => bar.status = "No match selected".to_string(),
                    Err(e) => bar.status = format!("Error: {e:#}"),
                }
                self.mark_search_current();
            }
            FindAction::ReplaceAll => {
                let surface = self.tabs.active_surface_mut();
                let bar = &mut self.find_bar;
                match bar
                    .engine
                    .replace_all(surface, &bar.replace_text, &bar.options)
                {
                    Ok(n) => bar.status = format!("Replaced {n} occurrences"),
                    Err(e) => bar.status = format!("Error: {e:#}"),
                }
                // Results are gone; the next frame searches the new text
                self.find_bar.invalidate();
            }
        }
    }

    fn run_search(&mut self) {
        let bar = &mut self.find_bar;
        if bar.options.query.is_empty() {
            bar.engine.clear();
            bar.status.clear();
        } else {
            let doc = self.tabs.active_doc();
            match bar.engine.find_all(&doc.buffer, &bar.options) {
                Ok(()) => {
                    let count = bar.engine.match_count();
                    bar.status = if count == 0 {
                        "No matches".to_string()
                    } else {
                        format!("{count} matches")
                    };
                }
                Err(e) => bar.status = format!("Error: {e:#}"),
            }
        }
        self.mark_search_current();
    }

    /// Selects the next or previous match relative to the cursor.
    fn step_match(&mut self, forward: bool) {
        if self.find_bar.needs_search() {
            self.run_search();
        }
        let surface = self.tabs.active_surface_mut();
        let doc = surface.document();
        let from = if forward {
            pos_to_char(&doc.buffer, doc.cursor.position).unwrap_or(0)
        } else {
            match doc.cursor.selection_char_range(&doc.buffer) {
                Ok(Some((start, _))) => start,
                _ => pos_to_char(&doc.buffer, doc.cursor.position).unwrap_or(0),
            }
        };

        let bar = &mut self.find_bar;
        let found = if forward {
            bar.engine.find_next(from)
        } else {
            bar.engine.find_prev(from)
        };
        let Some(idx) = found else {
            return;
        };
        let mat = bar.engine.matches[idx].clone();
        bar.status = format!("{}/{} matches", idx + 1, bar.engine.match_count());
        surface.select_range(mat.start, mat.end);
        surface.ensure_cursor_visible();
    }

    fn mark_search_current(&mut self) {
        self.find_bar.mark_searched();
        self.searched_version = Some((self.tabs.active, self.tabs.active_doc().content_version));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use codepad_config::{AppConfig, LanguageRegistry};

    use super::*;

    fn app_with_text(text: &str) -> App {
        let mut app = App::with_config(
            AppConfig::default(),
            PathBuf::from("codepad.json"),
            LanguageRegistry::default(),
        );
        app.tabs.active_surface_mut().set_text(text).unwrap();
        app.find_bar.open_find();
        app
    }

    fn search(app: &mut App, query: &str) {
        app.find_bar.options.query = query.to_string();
        app.handle_find_action(FindAction::Search);
    }

    #[test]
    fn test_search_reports_count() {
        let mut app = app_with_text("cat hat cat");
        search(&mut app, "cat");
        assert_eq!(app.find_bar.status, "2 matches");
        search(&mut app, "dog");
        assert_eq!(app.find_bar.status, "No matches");
    }

    #[test]
    fn test_invalid_regex_reports_error() {
        let mut app = app_with_text("abc");
        app.find_bar.options.use_regex = true;
        search(&mut app, "(");
        assert!(app.find_bar.status.starts_with("Error"));
    }

    #[test]
    fn test_find_next_selects_and_wraps() {
        let mut app = app_with_text("ab ab");
        search(&mut app, "ab");

        app.handle_find_action(FindAction::FindNext);
        assert_eq!(app.find_bar.status, "1/2 matches");
        app.handle_find_action(FindAction::FindNext);
        assert_eq!(app.find_bar.status, "2/2 matches");
        app.handle_find_action(FindAction::FindNext);
        assert_eq!(app.find_bar.status, "1/2 matches");
        assert_eq!(app.tabs.active_doc().selected_text().as_deref(), Some("ab"));
    }

    #[test]
    fn test_find_prev_from_selection_start() {
        let mut app = app_with_text("x x x");
        search(&mut app, "x");
        app.handle_find_action(FindAction::FindNext);
        app.handle_find_action(FindAction::FindNext);
        app.handle_find_action(FindAction::FindPrev);
        assert_eq!(app.find_bar.status, "1/3 matches");
    }

    #[test]
    fn test_replace_all_rewrites_buffer() {
        let mut app = app_with_text("one two one");
        search(&mut app, "one");
        app.find_bar.replace_text = "1".to_string();
        app.handle_find_action(FindAction::ReplaceAll);
        assert_eq!(app.tabs.active_doc().buffer.to_string(), "1 two 1");
        assert_eq!(app.find_bar.status, "Replaced 2 occurrences");
        assert!(app.find_bar.needs_search());
    }

    #[test]
    fn test_edit_invalidates_search() {
        let mut app = app_with_text("abc");
        search(&mut app, "b");
        app.invalidate_stale_search();
        assert!(!app.find_bar.needs_search());

        app.tabs.active_surface_mut().insert_text("b").unwrap();
        app.invalidate_stale_search();
        assert!(app.find_bar.needs_search());
    }
}
