//! Top-level application tying together tabs, editor, menus, and status bar.

mod edit_ops;
mod file_ops;
mod menu_bar;
mod search;
mod shortcuts;
mod status_bar;
mod tab_bar;

use std::path::PathBuf;

use codepad_config::{AppConfig, HexColor, LanguageRegistry, ThemeDefinition, UiColors};
use eframe::egui;
use egui::Color32;

use crate::editor::{install_bold_font, EditorTheme, EditorWidget};
use crate::find_bar::FindBar;
use crate::tabs::TabManager;

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// File paths to open on startup.
    pub files: Vec<PathBuf>,
    /// Language registry to use instead of the configured one.
    pub registry: Option<PathBuf>,
    /// Configuration file to use instead of the one next to the executable.
    pub config: Option<PathBuf>,
}

/// The main application state.
pub struct App {
    pub tabs: TabManager,
    pub theme: EditorTheme,
    pub theme_name: String,
    pub available_themes: Vec<ThemeDefinition>,
    pub show_line_numbers: bool,
    pub find_bar: FindBar,
    /// Last error or notice, shown in the status bar.
    pub status_message: Option<String>,
    pub(crate) dialog_state: DialogState,
    config: AppConfig,
    config_path: PathBuf,
    accent_color: Color32,
    last_window_title: String,
    /// Tab and content version the find results were computed for.
    searched_version: Option<(usize, u64)>,
    /// System clipboard for the Edit menu's Paste; `None` if unavailable.
    clipboard: Option<arboard::Clipboard>,
}

#[derive(Debug, Default)]
pub(crate) enum DialogState {
    #[default]
    None,
    ConfirmClose(usize),
}

fn hex(c: HexColor) -> Color32 {
    Color32::from_rgba_premultiplied(c.r, c.g, c.b, c.a)
}

impl App {
    /// Creates a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = args.config.clone().unwrap_or_else(AppConfig::config_path);
        let config = AppConfig::load_or_create(&config_path);

        let registry_path = args
            .registry
            .clone()
            .unwrap_or_else(|| config.resolve_registry_path());
        let registry = LanguageRegistry::load(&registry_path);

        let theme_def = config.active_theme();
        Self::apply_theme_visuals(&cc.egui_ctx, &theme_def.ui, theme_def.dark_mode);

        let mut app = Self::with_config(config, config_path, registry);
        if install_bold_font(&cc.egui_ctx, app.config.bold_font.as_deref()) {
            app.theme = app.theme.clone().with_bold_font();
        }
        app.clipboard = arboard::Clipboard::new()
            .inspect_err(|e| tracing::warn!("Clipboard unavailable: {e}"))
            .ok();

        for path in &args.files {
            let abs_path = if path.is_absolute() {
                path.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(path)
            };
            if let Err(e) = app.tabs.open_file(&abs_path) {
                app.report_error(&format!("Failed to open '{}'", abs_path.display()), &e);
            }
        }

        // Drop the initial empty tab if files were opened
        if app.tabs.tab_count() > 1 {
            let first = app.tabs.surfaces[0].document();
            if first.buffer.is_empty() && first.file_path.is_none() && !first.modified {
                app.tabs.close_tab(0);
            }
        }
        app
    }

    /// Builds the app state without touching egui.
    fn with_config(config: AppConfig, config_path: PathBuf, registry: LanguageRegistry) -> Self {
        let theme_def = config.active_theme();
        Self {
            tabs: TabManager::new(registry),
            theme: EditorTheme::from_config(&theme_def.editor, &config),
            theme_name: theme_def.name.clone(),
            available_themes: config.themes.clone(),
            show_line_numbers: config.show_line_numbers,
            find_bar: FindBar::new(),
            status_message: None,
            dialog_state: DialogState::None,
            accent_color: hex(theme_def.ui.accent_color),
            config,
            config_path,
            last_window_title: String::new(),
            searched_version: None,
            clipboard: None,
        }
    }

    /// Applies egui visuals from config UI colors.
    fn apply_theme_visuals(ctx: &egui::Context, ui_colors: &UiColors, dark_mode: bool) {
        let mut visuals = if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.panel_fill = hex(ui_colors.panel_fill);
        visuals.window_fill = hex(ui_colors.window_fill);
        visuals.faint_bg_color = hex(ui_colors.faint_bg_color);
        visuals.extreme_bg_color = hex(ui_colors.extreme_bg_color);
        visuals.widgets.inactive.bg_fill = hex(ui_colors.widget_inactive_bg);
        visuals.widgets.hovered.bg_fill = hex(ui_colors.widget_hovered_bg);
        visuals.widgets.active.bg_fill = hex(ui_colors.widget_active_bg);

        let widget_rounding = egui::CornerRadius::same(4);
        visuals.widgets.inactive.corner_radius = widget_rounding;
        visuals.widgets.hovered.corner_radius = widget_rounding;
        visuals.widgets.active.corner_radius = widget_rounding;
        visuals.window_corner_radius = egui::CornerRadius::same(6);
        visuals.menu_corner_radius = egui::CornerRadius::same(4);

        ctx.set_visuals(visuals);
    }

    /// Switches the editor color theme by name. Unknown names are ignored.
    pub fn set_theme(&mut self, name: &str, ctx: &egui::Context) {
        let Some(theme_def) = self.available_themes.iter().find(|t| t.name == name).cloned() else {
            tracing::warn!("Theme '{name}' not found");
            return;
        };
        self.theme = self.theme.with_colors(&theme_def.editor);
        self.theme_name = theme_def.name;
        self.accent_color = hex(theme_def.ui.accent_color);
        Self::apply_theme_visuals(ctx, &theme_def.ui, theme_def.dark_mode);
    }

    /// Logs a failed action and shows it in the status bar.
    pub(crate) fn report_error(&mut self, what: &str, e: &anyhow::Error) {
        tracing::error!("{what}: {e:#}");
        self.status_message = Some(format!("{what}: {e:#}"));
    }

    /// Updates the OS window title to show the active document name.
    ///
    /// Only sends the viewport command when the title actually changes.
    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = format!("{} - codepad", self.tabs.active_doc().display_title());
        if title != self.last_window_title {
            self.last_window_title.clone_from(&title);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }

    /// Shows the unsaved-changes prompt when a modified tab is being closed.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let DialogState::ConfirmClose(idx) = self.dialog_state else {
            return;
        };
        let title = self
            .tabs
            .surfaces
            .get(idx)
            .map(|s| s.document().title.clone())
            .unwrap_or_else(|| "Document".to_string());
        let mut open = true;

        egui::Window::new("Unsaved Changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("'{title}' has unsaved changes. Close anyway?"));
                ui.horizontal(|ui| {
                    if ui.button("  Save & Close  ").clicked() {
                        self.save_and_close(idx);
                        self.dialog_state = DialogState::None;
                    }
                    if ui.button("  Discard  ").clicked() {
                        self.tabs.close_tab(idx);
                        self.dialog_state = DialogState::None;
                    }
                    if ui.button("  Cancel  ").clicked() {
                        self.dialog_state = DialogState::None;
                    }
                });
            });

        if !open {
            self.dialog_state = DialogState::None;
        }
    }

    /// Returns true if a modal prompt is capturing input.
    pub(crate) fn is_dialog_open(&self) -> bool {
        matches!(self.dialog_state, DialogState::ConfirmClose(_))
    }

    /// Preferences to persist on exit.
    pub(crate) fn current_config(&self) -> AppConfig {
        AppConfig {
            current_theme: self.theme_name.clone(),
            show_line_numbers: self.show_line_numbers,
            themes: self.available_themes.clone(),
            ..self.config.clone()
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_global_shortcuts(ctx);
        self.update_window_title(ctx);

        let panel_fill = ctx.style().visuals.panel_fill;
        let faint_bg = ctx.style().visuals.faint_bg_color;
        let extreme_bg = ctx.style().visuals.extreme_bg_color;

        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui, ctx);
            });

        egui::TopBottomPanel::top("tab_bar")
            .frame(
                egui::Frame::new()
                    .fill(faint_bg)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_tab_bar(ui);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .max_height(24.0)
            .frame(
                egui::Frame::new()
                    .fill(extreme_bg)
                    .inner_margin(egui::Margin::symmetric(8, 3)),
            )
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        if self.find_bar.visible {
            egui::TopBottomPanel::bottom("find_bar")
                .frame(
                    egui::Frame::new()
                        .fill(faint_bg)
                        .inner_margin(egui::Margin::symmetric(8, 4)),
                )
                .show(ctx, |ui| {
                    self.invalidate_stale_search();
                    if let Some(action) = self.find_bar.show(ui) {
                        self.handle_find_action(action);
                    }
                });
        }

        let dialog_open = self.is_dialog_open() || self.find_bar.visible;
        let highlights = self.find_bar.match_ranges();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.bg_color))
            .show(ctx, |ui| {
                let mut editor = EditorWidget::new(self.tabs.active_surface_mut(), &self.theme);
                editor.show_line_numbers = self.show_line_numbers;
                editor.dialog_open = dialog_open;
                editor.highlights = &highlights;
                editor.show(ui);
            });

        self.show_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.current_config().save(&self.config_path) {
            tracing::warn!("Failed to save config on exit: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: create an App for unit-testing (no rendering needed).
    fn test_app() -> App {
        App::with_config(
            AppConfig::default(),
            PathBuf::from("codepad.json"),
            LanguageRegistry::default(),
        )
    }

    #[test]
    fn test_request_close_unmodified_tab() {
        let mut app = test_app();
        app.tabs.new_tab();
        app.request_close_tab(0);
        assert_eq!(app.tabs.tab_count(), 1);
        assert!(matches!(app.dialog_state, DialogState::None));
    }

    #[test]
    fn test_request_close_modified_tab() {
        let mut app = test_app();
        app.tabs.active_surface_mut().insert_text("unsaved").unwrap();
        app.request_close_tab(0);
        assert!(matches!(app.dialog_state, DialogState::ConfirmClose(0)));
        assert_eq!(app.tabs.tab_count(), 1);
    }

    #[test]
    fn test_current_config_keeps_unrelated_settings() {
        let mut app = test_app();
        app.config.font_size = 18.0;
        app.show_line_numbers = false;
        app.theme_name = "Light".to_string();
        let config = app.current_config();
        assert!((config.font_size - 18.0).abs() < f32::EPSILON);
        assert!(!config.show_line_numbers);
        assert_eq!(config.current_theme, "Light");
    }

    #[test]
    fn test_report_error_sets_status() {
        let mut app = test_app();
        app.report_error("Failed to save", &anyhow::anyhow!("disk full"));
        assert_eq!(app.status_message.as_deref(), Some("Failed to save: disk full"));
    }
}
