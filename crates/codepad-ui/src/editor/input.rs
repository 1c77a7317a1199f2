//! Keyboard input handling for the editor widget.
//!
//! Processes key and clipboard events and maps them to surface operations.

use anyhow::Result;
use codepad_core::CursorMotion;
use egui::{Event, Key, Modifiers, Ui};

use super::widget::EditorWidget;

/// Inserted for the Tab key.
const INDENT: &str = "    ";

impl EditorWidget<'_> {
    /// Handles all keyboard input for the editor widget.
    pub(crate) fn handle_keyboard_input(&mut self, ui: &mut Ui, block_height: f32) {
        let events: Vec<Event> = ui.input(|i| i.events.clone());

        for event in &events {
            let result = match event {
                Event::Text(text) => {
                    // Ctrl/Alt combos are shortcuts, not text
                    if ui.input(|i| i.modifiers.ctrl || i.modifiers.command || i.modifiers.alt) {
                        Ok(())
                    } else {
                        self.surface.insert_text(text)
                    }
                }
                Event::Paste(text) => self.surface.replace_selection(text),
                Event::Copy => {
                    self.copy_selection(ui);
                    Ok(())
                }
                Event::Cut => self.cut_selection(ui),
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => self.handle_key(*key, *modifiers, block_height),
                _ => Ok(()),
            };
            if let Err(e) = result {
                tracing::error!("Edit failed: {e:#}");
            }
        }
    }

    /// Handles a single key press.
    fn handle_key(&mut self, key: Key, modifiers: Modifiers, block_height: f32) -> Result<()> {
        let shift = modifiers.shift;
        let ctrl = modifiers.ctrl || modifiers.command;

        if let Some(motion) = Self::motion_for(key, ctrl) {
            self.surface.move_cursor(motion, shift);
            return Ok(());
        }

        match key {
            Key::PageUp | Key::PageDown => {
                let motion = if key == Key::PageUp {
                    CursorMotion::Up
                } else {
                    CursorMotion::Down
                };
                let rows = (self.surface.viewport().height() / block_height).floor().max(1.0) as usize;
                for _ in 0..rows {
                    self.surface.move_cursor(motion, shift);
                }
            }
            Key::Enter => self.surface.insert_newline()?,
            Key::Backspace => self.surface.backspace()?,
            Key::Delete => self.surface.delete_forward()?,
            Key::Tab if !shift && !ctrl => self.surface.insert_text(INDENT)?,
            Key::A if ctrl => {
                let len = self.surface.document().buffer.len_chars();
                self.surface.select_range(0, len);
            }
            _ => {}
        }
        Ok(())
    }

    /// Cursor motion bound to `key`, if any.
    fn motion_for(key: Key, ctrl: bool) -> Option<CursorMotion> {
        let motion = match key {
            Key::ArrowLeft => CursorMotion::Left,
            Key::ArrowRight => CursorMotion::Right,
            Key::ArrowUp => CursorMotion::Up,
            Key::ArrowDown => CursorMotion::Down,
            Key::Home if ctrl => CursorMotion::DocumentStart,
            Key::End if ctrl => CursorMotion::DocumentEnd,
            Key::Home => CursorMotion::LineStart,
            Key::End => CursorMotion::LineEnd,
            _ => return None,
        };
        Some(motion)
    }

    fn copy_selection(&self, ui: &Ui) {
        if let Some(text) = self.surface.document().selected_text() {
            ui.ctx().copy_text(text);
        }
    }

    fn cut_selection(&mut self, ui: &Ui) -> Result<()> {
        if self.surface.document().selected_text().is_some() {
            self.copy_selection(ui);
            self.surface.replace_selection("")?;
        }
        Ok(())
    }
}
