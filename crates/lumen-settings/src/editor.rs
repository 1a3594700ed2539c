//! The editor seam between the registry and a concrete UI backend
//!
//! The registry never talks to a UI library directly. Once per frame it is
//! driven with a [`FrameContext`] and an implementation of [`SettingEditor`],
//! which renders one labeled control per setting and reports whether the
//! value changed. Validation (clamping, renormalization) stays in the
//! registry, so any backend — immediate-mode GUI, text UI, test double —
//! gets the same semantics.

use lin_alg::f32::{Mat4, Vec3};

/// Per-frame context supplied by the application
///
/// The view matrix is re-read every frame; the direction gizmo derives its
/// rotation basis from it and holds no camera state of its own.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Current view transform, row-major
    pub view: Mat4,
}

impl FrameContext {
    pub fn new(width: u32, height: u32, view: Mat4) -> Self {
        FrameContext {
            width,
            height,
            view,
        }
    }
}

/// Interaction reported by a direction gizmo for one frame
#[derive(Debug, Clone, Default)]
pub struct GizmoResponse {
    /// Cursor drag delta in pixels since the previous frame, if dragging
    pub drag_delta: Option<(f32, f32)>,
    /// New raw axis values, if the backend exposes per-axis editing
    pub axes: Option<[f32; 3]>,
}

impl GizmoResponse {
    /// No interaction this frame
    pub fn idle() -> Self {
        GizmoResponse::default()
    }
}

/// One labeled control per setting kind
///
/// Each method draws the control and returns whether the user changed the
/// value this frame. Backends do not clamp; the registry does.
pub trait SettingEditor {
    /// Draw a group header, toggling `expanded` on click; returns whether
    /// the group's settings should be drawn this frame.
    fn group_header(&mut self, name: &str, expanded: &mut bool) -> bool;

    fn toggle(&mut self, label: &str, help: &str, value: &mut bool) -> bool;

    fn int_slider(&mut self, label: &str, help: &str, value: &mut i32, min: i32, max: i32)
        -> bool;

    fn float_slider(
        &mut self,
        label: &str,
        help: &str,
        value: &mut f32,
        min: f32,
        max: f32,
    ) -> bool;

    /// Unbounded float control with a drag step; used when a range is
    /// effectively open-ended.
    fn float_drag(&mut self, label: &str, help: &str, value: &mut f32, step: f32) -> bool;

    fn combo(&mut self, label: &str, help: &str, index: &mut u32, labels: &[&'static str])
        -> bool;

    fn color_swatch(&mut self, label: &str, help: &str, rgb: &mut [f32; 3]) -> bool;

    /// Draw the direction gizmo for `draw_dir` (already converted to the
    /// space the widget displays in) and report this frame's interaction.
    fn direction_gizmo(&mut self, label: &str, help: &str, draw_dir: &Vec3) -> GizmoResponse;
}
