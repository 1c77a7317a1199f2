//! Status bar rendering for the editor application.
//!
//! Shows cursor position, line count, character count, line ending, the
//! detected language, the find match counter, and the last error.

use eframe::egui;

use super::App;

/// Formats a character count, abbreviating large values.
fn format_char_count(count: usize) -> String {
    if count < 1_000 {
        format!("{count}")
    } else if count < 1_000_000 {
        format!("~{:.1}K", count as f64 / 1_000.0)
    } else {
        format!("~{:.1}M", count as f64 / 1_000_000.0)
    }
}

impl App {
    /// Renders the status bar at the bottom of the application window.
    pub(crate) fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        let surface = self.tabs.active_surface();
        let status = surface.status();
        let line_count = surface.document().buffer.len_lines();
        let line_ending = surface.document().line_ending;
        let engine = &self.find_bar.engine;
        let match_info = (self.find_bar.visible && !engine.matches.is_empty()).then(|| {
            let current = engine.current_match.map(|i| i + 1).unwrap_or(0);
            (current, engine.match_count())
        });

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(format!("Ln {}, Col {}", status.line, status.column))
                    .selectable(false),
            );
            ui.separator();
            ui.add(egui::Label::new(format!("{line_count} lines")).selectable(false));
            ui.separator();
            ui.add(
                egui::Label::new(format!("{} chars", format_char_count(status.char_count)))
                    .selectable(false),
            );
            ui.separator();
            ui.add(egui::Label::new(line_ending.to_string()).selectable(false));
            ui.separator();
            ui.add(egui::Label::new(&status.language).selectable(false));

            if let Some((current, total)) = match_info {
                ui.separator();
                ui.add(egui::Label::new(format!("Match {current}/{total}")).selectable(false));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(message) = &self.status_message {
                    ui.add(
                        egui::Label::new(egui::RichText::new(message).color(ui.visuals().warn_fg_color))
                            .selectable(false)
                            .truncate(),
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_char_count() {
        assert_eq!(format_char_count(0), "0");
        assert_eq!(format_char_count(999), "999");
        assert_eq!(format_char_count(1_500), "~1.5K");
        assert_eq!(format_char_count(2_000_000), "~2.0M");
    }
}
