//! Tab bar rendering for the editor application.
//!
//! Handles the tab strip with active tab highlighting, close buttons,
//! middle-click close, and new tab creation.

use eframe::egui;
use egui::{Color32, RichText, Stroke, Visuals};

use super::App;

impl App {
    /// Renders the tab bar with active tab highlighting and close buttons.
    pub(crate) fn show_tab_bar(&mut self, ui: &mut egui::Ui) {
        let visuals = ui.visuals().clone();

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            let mut tab_to_close: Option<usize> = None;

            for idx in 0..self.tabs.tab_count() {
                self.render_tab_button(ui, idx, &visuals, &mut tab_to_close);
            }

            self.render_new_tab_button(ui, &visuals);

            if let Some(idx) = tab_to_close {
                self.request_close_tab(idx);
            }
        });
    }

    fn render_tab_button(
        &mut self,
        ui: &mut egui::Ui,
        idx: usize,
        visuals: &Visuals,
        tab_to_close: &mut Option<usize>,
    ) {
        let doc = self.tabs.surfaces[idx].document();
        let is_active = idx == self.tabs.active;

        let padded_title = format!("  {}  ", doc.display_title());
        let text = if is_active {
            RichText::new(&padded_title).color(visuals.strong_text_color())
        } else {
            RichText::new(&padded_title).color(visuals.widgets.noninteractive.fg_stroke.color)
        };

        let fill = if is_active {
            visuals.widgets.active.bg_fill
        } else {
            visuals.faint_bg_color
        };

        let button = egui::Button::new(text)
            .fill(fill)
            .corner_radius(egui::CornerRadius {
                nw: 4,
                ne: 4,
                sw: 0,
                se: 0,
            })
            .stroke(Stroke::NONE)
            .min_size(egui::Vec2::new(0.0, 32.0));

        let response = ui.add(button);

        if is_active {
            let tab_rect = response.rect;
            ui.painter().line_segment(
                [
                    egui::Pos2::new(tab_rect.min.x, tab_rect.min.y),
                    egui::Pos2::new(tab_rect.max.x, tab_rect.min.y),
                ],
                Stroke::new(2.0, self.accent_color),
            );
        }

        if response.clicked() {
            self.tabs.switch_to(idx);
        }
        if response.middle_clicked() {
            *tab_to_close = Some(idx);
        }

        if is_active {
            let close_text = RichText::new("\u{00D7}")
                .color(visuals.widgets.noninteractive.fg_stroke.color)
                .size(14.0);
            let close_btn = egui::Button::new(close_text)
                .fill(Color32::TRANSPARENT)
                .stroke(Stroke::NONE);
            if ui.add(close_btn).clicked() {
                *tab_to_close = Some(idx);
            }
        }

        // 1px separator between tabs
        if idx + 1 < self.tabs.tab_count() {
            let tab_rect = response.rect;
            ui.painter().line_segment(
                [
                    egui::Pos2::new(tab_rect.max.x, tab_rect.min.y + 4.0),
                    egui::Pos2::new(tab_rect.max.x, tab_rect.max.y - 4.0),
                ],
                Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
            );
        }
    }

    fn render_new_tab_button(&mut self, ui: &mut egui::Ui, visuals: &Visuals) {
        ui.spacing_mut().item_spacing.x = 4.0;
        let new_btn = egui::Button::new(
            RichText::new("+")
                .color(visuals.widgets.noninteractive.fg_stroke.color)
                .size(16.0),
        )
        .fill(Color32::TRANSPARENT)
        .stroke(Stroke::NONE);
        if ui.add(new_btn).clicked() {
            self.new_tab();
        }
    }
}
