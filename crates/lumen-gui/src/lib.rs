//! egui editor backend and the concrete application settings
//!
//! [`EguiEditor`] implements the registry's editor seam with egui widgets;
//! [`SettingsPanel`] hosts the traversal in a collapsible window; and
//! [`AppSettings`] declares the renderer's settings together with their
//! GPU-mirrored [`ShaderConstants`].

pub mod app;
pub mod editor;
pub mod panel;

pub use app::{AppSettings, MsaaMode, ScenePreset, ShaderConstants};
pub use editor::EguiEditor;
pub use panel::SettingsPanel;
