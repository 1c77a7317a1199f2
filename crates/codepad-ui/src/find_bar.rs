//! Find/replace bar shown above the status bar.
use codepad_core::search::{SearchEngine, SearchOptions};
use egui::{Key, Ui};

/// State for the find/replace bar.
#[derive(Debug, Default)]
pub struct FindBar {
    pub visible: bool,
    /// Shows the replace row as well.
    pub replace_visible: bool,
    pub find_text: String,
    pub replace_text: String,
    pub options: SearchOptions,
    pub engine: SearchEngine,
    /// Status message shown at the end of the bar.
    pub status: String,
    /// Options of the last search, used to detect edits and toggle changes.
    last_searched: Option<SearchOptions>,
}

/// Actions the find bar can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindAction {
    Search,
    FindNext,
    FindPrev,
    Replace,
    ReplaceAll,
}

impl FindBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_find(&mut self) {
        self.visible = true;
        self.replace_visible = false;
    }

    pub fn open_replace(&mut self) {
        self.visible = true;
        self.replace_visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.engine.clear();
        self.last_searched = None;
        self.status.clear();
    }

    /// Char ranges of all current matches.
    pub fn match_ranges(&self) -> Vec<(usize, usize)> {
        if !self.visible {
            return Vec::new();
        }
        self.engine.matches.iter().map(|m| (m.start, m.end)).collect()
    }

    /// Marks the results stale so the next frame searches again.
    pub fn invalidate(&mut self) {
        self.last_searched = None;
    }

    /// Shows the bar. Returns an action to perform, if any.
    pub fn show(&mut self, ui: &mut Ui) -> Option<FindAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Find:");
            let find_response = ui.text_edit_singleline(&mut self.find_text);
            if find_response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                action = Some(FindAction::FindNext);
            }
            ui.checkbox(&mut self.options.case_sensitive, "Case sensitive");
            ui.checkbox(&mut self.options.whole_word, "Whole word");
            ui.checkbox(&mut self.options.use_regex, "Regex");
            if ui.button("Next").clicked() {
                action = Some(FindAction::FindNext);
            }
            if ui.button("Previous").clicked() {
                action = Some(FindAction::FindPrev);
            }
            if !self.replace_visible && ui.button("Replace...").clicked() {
                self.replace_visible = true;
            }
            if ui.button("\u{00D7}").clicked() {
                self.close();
            }
            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });

        if self.visible && self.replace_visible {
            ui.horizontal(|ui| {
                ui.label("Replace:");
                ui.text_edit_singleline(&mut self.replace_text);
                if ui.button("Replace").clicked() {
                    action = Some(FindAction::Replace);
                }
                if ui.button("Replace All").clicked() {
                    action = Some(FindAction::ReplaceAll);
                }
            });
        }

        if !self.visible {
            return None;
        }
        self.options.query = self.find_text.clone();
        action.or_else(|| self.needs_search().then_some(FindAction::Search))
    }

    /// Whether the query or a toggle changed since the last search.
    pub fn needs_search(&self) -> bool {
        self.last_searched.as_ref() != Some(&self.options)
    }

    /// Records that a search ran with the current options.
    pub fn mark_searched(&mut self) {
        self.last_searched = Some(self.options.clone());
    }
}
