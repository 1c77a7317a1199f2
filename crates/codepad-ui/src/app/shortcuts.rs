//! Global keyboard shortcut handling.
//!
//! Maps key events to application actions: file operations, undo/redo,
//! tabs, and the find bar. Other editing keys are left to the editor widget.

use eframe::egui;

use super::App;

impl App {
    /// Handles global keyboard shortcuts.
    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        let (ctrl, shift, keys) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            (ctrl, i.modifiers.shift, keys)
        });

        for key in keys {
            if self.is_dialog_open() {
                break;
            }
            if self.handle_file_shortcut(key, ctrl, shift) {
                continue;
            }
            if self.handle_edit_shortcut(key, ctrl, shift) {
                continue;
            }
            if self.handle_search_shortcut(key, ctrl) {
                continue;
            }
            if self.handle_tab_shortcut(key, ctrl, shift) {
                continue;
            }
            if key == egui::Key::Escape {
                self.find_bar.close();
            }
        }
    }

    /// File operation shortcuts (Ctrl+N, Ctrl+O, Ctrl+S, Ctrl+Shift+S, Ctrl+W).
    /// Returns `true` if the key was consumed.
    fn handle_file_shortcut(&mut self, key: egui::Key, ctrl: bool, shift: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::N => self.new_tab(),
            egui::Key::O => self.open_file_dialog(),
            egui::Key::S if shift => self.save_as_dialog(),
            egui::Key::S => self.save_active(),
            egui::Key::W => {
                let active = self.tabs.active;
                self.request_close_tab(active);
            }
            _ => return false,
        }
        true
    }

    /// Undo/redo shortcuts (Ctrl+Z, Ctrl+Y, Ctrl+Shift+Z).
    fn handle_edit_shortcut(&mut self, key: egui::Key, ctrl: bool, shift: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::Z if shift => self.redo(),
            egui::Key::Z => self.undo(),
            egui::Key::Y => self.redo(),
            _ => return false,
        }
        true
    }

    /// Find bar shortcuts (Ctrl+F, Ctrl+H).
    fn handle_search_shortcut(&mut self, key: egui::Key, ctrl: bool) -> bool {
        if !ctrl {
            return false;
        }
        match key {
            egui::Key::F => self.find_bar.open_find(),
            egui::Key::H => self.find_bar.open_replace(),
            _ => return false,
        }
        true
    }

    /// Tab switching shortcuts (Ctrl+Tab, Ctrl+Shift+Tab).
    fn handle_tab_shortcut(&mut self, key: egui::Key, ctrl: bool, shift: bool) -> bool {
        if key != egui::Key::Tab || !ctrl {
            return false;
        }
        let count = self.tabs.tab_count();
        let target = if shift {
            (self.tabs.active + count - 1) % count
        } else {
            (self.tabs.active + 1) % count
        };
        self.tabs.switch_to(target);
        true
    }
}
