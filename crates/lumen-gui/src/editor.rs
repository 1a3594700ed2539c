//! egui backend for the settings editor seam

use egui::{Color32, RichText, Sense, Stroke, Ui};
use lin_alg::f32::Vec3;
use lumen_settings::{GizmoResponse, SettingEditor};

/// Diameter of the direction gizmo canvas in points
const GIZMO_SIZE: f32 = 72.0;

/// Draws one egui control per setting kind
///
/// Borrows the `Ui` for the duration of a single registry traversal.
pub struct EguiEditor<'a> {
    ui: &'a mut Ui,
}

impl<'a> EguiEditor<'a> {
    pub fn new(ui: &'a mut Ui) -> Self {
        EguiEditor { ui }
    }
}

fn with_help(response: egui::Response, help: &str) -> egui::Response {
    if help.is_empty() {
        response
    } else {
        response.on_hover_text(help)
    }
}

impl SettingEditor for EguiEditor<'_> {
    fn group_header(&mut self, name: &str, expanded: &mut bool) -> bool {
        let marker = if *expanded { "⏷" } else { "⏵" };
        let text = RichText::new(format!("{marker} {name}")).strong();
        if self.ui.selectable_label(false, text).clicked() {
            *expanded = !*expanded;
        }
        *expanded
    }

    fn toggle(&mut self, label: &str, help: &str, value: &mut bool) -> bool {
        let response = self.ui.checkbox(value, label);
        with_help(response, help).changed()
    }

    fn int_slider(
        &mut self,
        label: &str,
        help: &str,
        value: &mut i32,
        min: i32,
        max: i32,
    ) -> bool {
        let response = self.ui.add(egui::Slider::new(value, min..=max).text(label));
        with_help(response, help).changed()
    }

    fn float_slider(
        &mut self,
        label: &str,
        help: &str,
        value: &mut f32,
        min: f32,
        max: f32,
    ) -> bool {
        let response = self.ui.add(egui::Slider::new(value, min..=max).text(label));
        with_help(response, help).changed()
    }

    fn float_drag(&mut self, label: &str, help: &str, value: &mut f32, step: f32) -> bool {
        let mut changed = false;
        self.ui.horizontal(|ui| {
            let response = ui.add(egui::DragValue::new(value).speed(step));
            changed = with_help(response, help).changed();
            ui.label(label);
        });
        changed
    }

    fn combo(
        &mut self,
        label: &str,
        help: &str,
        index: &mut u32,
        labels: &[&'static str],
    ) -> bool {
        let mut selected = *index as usize;
        let mut changed = false;
        let inner = egui::ComboBox::from_label(label)
            .selected_text(labels.get(selected).copied().unwrap_or_default())
            .show_ui(self.ui, |ui| {
                for (i, text) in labels.iter().enumerate() {
                    if ui.selectable_value(&mut selected, i, *text).changed() {
                        changed = true;
                    }
                }
            });
        let _ = with_help(inner.response, help);
        if changed {
            *index = selected as u32;
        }
        changed
    }

    fn color_swatch(&mut self, label: &str, help: &str, rgb: &mut [f32; 3]) -> bool {
        let mut changed = false;
        self.ui.horizontal(|ui| {
            let response = ui.color_edit_button_rgb(rgb);
            changed = with_help(response, help).changed();
            ui.label(label);
        });
        changed
    }

    fn direction_gizmo(&mut self, label: &str, help: &str, draw_dir: &Vec3) -> GizmoResponse {
        let mut out = GizmoResponse::idle();
        self.ui.horizontal(|ui| {
            let (rect, response) =
                ui.allocate_exact_size(egui::Vec2::splat(GIZMO_SIZE), Sense::drag());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                let center = rect.center();
                let radius = rect.width() * 0.5 - 2.0;

                painter.circle_filled(center, radius, ui.visuals().extreme_bg_color);
                painter.circle_stroke(
                    center,
                    radius,
                    ui.visuals().widgets.noninteractive.fg_stroke,
                );

                // Screen projection: +x right, +y up, arrow fades with depth
                let tip = center + egui::vec2(draw_dir.x, -draw_dir.y) * radius;
                let shade = (128.0 + 127.0 * (-draw_dir.z).clamp(-1.0, 1.0)) as u8;
                let color = Color32::from_rgb(shade, shade, 64);
                painter.line_segment([center, tip], Stroke::new(2.0, color));
                painter.circle_filled(tip, 3.0, color);
            }
            let response = with_help(response, help);
            if response.dragged() {
                let delta = response.drag_delta();
                out.drag_delta = Some((delta.x, delta.y));
            }

            ui.vertical(|ui| {
                ui.label(label);
                let mut axes = [draw_dir.x, draw_dir.y, draw_dir.z];
                let mut edited = false;
                ui.horizontal(|ui| {
                    for axis in &mut axes {
                        edited |= ui.add(egui::DragValue::new(axis).speed(0.01)).changed();
                    }
                });
                if edited {
                    out.axes = Some(axes);
                }
            });
        });
        out
    }
}
