//! The settings window
//!
//! Collapsed to a small button near the top-right corner of the viewport;
//! expanded to a scrollable window that drives the registry traversal.

use lumen_settings::{FrameContext, SettingsRegistry};

use crate::editor::EguiEditor;

const WINDOW_TITLE: &str = "Application Settings";
const BUTTON_MARGIN: f32 = 10.0;
const BUTTON_WIDTH: f32 = 75.0;

/// Open/closed state for the settings window
#[derive(Debug, Default)]
pub struct SettingsPanel {
    open: bool,
}

impl SettingsPanel {
    pub fn new() -> Self {
        SettingsPanel::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Draw the panel for one frame; returns whether any setting changed
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        registry: &mut SettingsRegistry,
        frame: &FrameContext,
    ) -> bool {
        if !self.open {
            let pos = egui::pos2(
                frame.width as f32 - BUTTON_WIDTH - BUTTON_MARGIN,
                BUTTON_MARGIN,
            );
            egui::Area::new(egui::Id::new("settings_toggle"))
                .fixed_pos(pos)
                .show(ctx, |ui| {
                    if ui.button("Settings").clicked() {
                        log::debug!("settings window opened");
                        self.open = true;
                    }
                });
            return false;
        }

        let mut open = self.open;
        let mut changed = false;
        egui::Window::new(WINDOW_TITLE)
            .open(&mut open)
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut editor = EguiEditor::new(ui);
                    changed = registry.update(&mut editor, frame);
                });
            });
        if self.open && !open {
            log::debug!("settings window closed");
        }
        self.open = open;
        changed
    }
}
