//! Menu bar rendering for the editor application.
//!
//! Contains the File, Edit, Search, and View menus.

use eframe::egui;

use super::App;

impl App {
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New                  Ctrl+N").clicked() {
                    self.new_tab();
                    ui.close();
                }
                if ui.button("Open...              Ctrl+O").clicked() {
                    self.open_file_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Save                 Ctrl+S").clicked() {
                    self.save_active();
                    ui.close();
                }
                if ui.button("Save As...     Ctrl+Shift+S").clicked() {
                    self.save_as_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Close Tab            Ctrl+W").clicked() {
                    self.request_close_tab(self.tabs.active);
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                let can_undo = self.tabs.active_surface().can_undo();
                let can_redo = self.tabs.active_surface().can_redo();
                if ui
                    .add_enabled(can_undo, egui::Button::new("Undo             Ctrl+Z"))
                    .clicked()
                {
                    self.undo();
                    ui.close();
                }
                if ui
                    .add_enabled(can_redo, egui::Button::new("Redo             Ctrl+Y"))
                    .clicked()
                {
                    self.redo();
                    ui.close();
                }
                ui.separator();
                if ui.button("Cut              Ctrl+X").clicked() {
                    self.cut(ctx);
                    ui.close();
                }
                if ui.button("Copy             Ctrl+C").clicked() {
                    self.copy(ctx);
                    ui.close();
                }
                if ui.button("Paste            Ctrl+V").clicked() {
                    self.paste();
                    ui.close();
                }
                ui.separator();
                if ui.button("Select All       Ctrl+A").clicked() {
                    self.select_all();
                    ui.close();
                }
            });

            ui.menu_button("Search", |ui| {
                if ui.button("Find             Ctrl+F").clicked() {
                    self.find_bar.open_find();
                    ui.close();
                }
                if ui.button("Replace          Ctrl+H").clicked() {
                    self.find_bar.open_replace();
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut self.show_line_numbers, "Show Line Numbers")
                    .clicked()
                {
                    ui.close();
                }
                ui.separator();
                ui.menu_button("Theme", |ui| {
                    let theme_names: Vec<String> =
                        self.available_themes.iter().map(|t| t.name.clone()).collect();
                    for name in theme_names {
                        if ui.radio(self.theme_name == name, &name).clicked() {
                            self.set_theme(&name, ctx);
                            ui.close();
                        }
                    }
                });
            });
        });
    }
}
