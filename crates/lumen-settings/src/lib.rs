//! Typed, live-editable settings registry
//!
//! Settings are declared once at startup into named, collapsible groups and
//! then edited every frame through a pluggable [`SettingEditor`] backend.
//! Each setting carries identity metadata, a typed value with bounds, and a
//! declared default; edits are clamped or renormalized so consumers always
//! read valid values. The crate is UI- and GPU-free: rendering backends plug
//! in through the editor trait, and GPU mirroring consumes plain snapshots.

pub mod editor;
pub mod error;
pub mod math;
pub mod registry;
pub mod setting;

pub use editor::{FrameContext, GizmoResponse, SettingEditor};
pub use error::SettingError;
pub use registry::{
    BoolId, ColorId, DirectionId, EnumId, FloatId, IntId, SettingId, SettingsGroup,
    SettingsRegistry,
};
pub use setting::{ColorUnit, ConversionMode, EnumValue, Setting, SettingKind, SettingValue};
