//! Setting definitions and value types

use lin_alg::f32::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::editor::{FrameContext, SettingEditor};
use crate::error::SettingError;
use crate::math::{euler_rotation, rotate_dir, transpose_rotation, try_normalize};

/// Pixels-to-radians factor for gizmo drags
const GIZMO_ROTATE_SPEED: f32 = 0.01;

/// Ranges beyond this magnitude are treated as open-ended and edited with a
/// drag box instead of a slider.
const BOUNDED_RANGE_LIMIT: f32 = 3.0e38;

/// Kind of a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKind {
    /// Boolean toggle
    Bool,
    /// Bounded integer
    Int,
    /// Bounded float, optionally converted on read
    Float,
    /// One of N labeled options
    Enum,
    /// Unit-length 3-component vector
    Direction,
    /// RGB color
    Color,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Bool => write!(f, "bool"),
            SettingKind::Int => write!(f, "int"),
            SettingKind::Float => write!(f, "float"),
            SettingKind::Enum => write!(f, "enum"),
            SettingKind::Direction => write!(f, "direction"),
            SettingKind::Color => write!(f, "color"),
        }
    }
}

/// Conversion applied when reading a float setting
///
/// The stored value stays raw; conversion affects only what consumers read,
/// so the editor always edits the declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionMode {
    None,
    Square,
    SquareRoot,
    DegToRadians,
}

impl ConversionMode {
    /// Convert a raw stored value into the consumer-facing value
    pub fn apply(self, raw: f32, scale: f32) -> f32 {
        let converted = match self {
            ConversionMode::None => raw,
            ConversionMode::Square => raw * raw,
            ConversionMode::SquareRoot => raw.sqrt(),
            ConversionMode::DegToRadians => raw.to_radians(),
        };
        converted * scale
    }
}

/// Display transform for color editing
///
/// Applied to the value handed to the swatch widget and inverted on the way
/// back; the stored color is always linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorUnit {
    None,
    /// Edit in a perceptual (roughly gamma 2.0) space
    Perceptual,
}

impl ColorUnit {
    pub(crate) fn to_display(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ColorUnit::None => rgb,
            ColorUnit::Perceptual => [rgb[0].sqrt(), rgb[1].sqrt(), rgb[2].sqrt()],
        }
    }

    pub(crate) fn from_display(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ColorUnit::None => rgb,
            ColorUnit::Perceptual => [rgb[0] * rgb[0], rgb[1] * rgb[1], rgb[2] * rgb[2]],
        }
    }
}

/// A snapshot of one setting's stored value
///
/// Floats are raw (unconverted); directions are unit length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Enum(u32),
    Direction([f32; 3]),
    Color([f32; 3]),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Enum(_) => SettingKind::Enum,
            SettingValue::Direction(_) => SettingKind::Direction,
            SettingValue::Color(_) => SettingKind::Color,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            SettingValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<u32> {
        match self {
            SettingValue::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float3(&self) -> Option<[f32; 3]> {
        match self {
            SettingValue::Direction(v) | SettingValue::Color(v) => Some(*v),
            _ => None,
        }
    }
}

/// A user-declared enum usable as a setting
///
/// `COUNT` is the enum's cardinality; registration checks the label table
/// against it, so a missing label is caught when the setting is declared
/// rather than when the combo box is drawn.
pub trait EnumValue: Copy {
    const COUNT: u32;

    fn from_index(index: u32) -> Self;
    fn index(self) -> u32;
}

/// Per-kind storage
#[derive(Debug, Clone)]
pub(crate) enum SettingData {
    Bool {
        value: bool,
        default: bool,
    },
    Int {
        value: i32,
        default: i32,
        min: i32,
        max: i32,
    },
    Float {
        value: f32,
        default: f32,
        min: f32,
        max: f32,
        step: f32,
        conversion: ConversionMode,
        scale: f32,
    },
    Enum {
        value: u32,
        default: u32,
        labels: Vec<&'static str>,
    },
    Direction {
        value: Vec3,
        default: Vec3,
        view_space: bool,
    },
    Color {
        value: [f32; 3],
        default: [f32; 3],
        unit: ColorUnit,
    },
}

/// One named, typed, bounded, live-editable parameter
///
/// Constructed through the registry's `add_*` methods; identity and group
/// membership are fixed at declaration time.
#[derive(Debug, Clone)]
pub struct Setting {
    pub(crate) name: &'static str,
    pub(crate) group: &'static str,
    pub(crate) label: &'static str,
    pub(crate) help: &'static str,
    pub(crate) visible: bool,
    pub(crate) changed: bool,
    pub(crate) data: SettingData,
}

impl Setting {
    fn new(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        data: SettingData,
    ) -> Self {
        Setting {
            name,
            group,
            label,
            help,
            visible: true,
            changed: false,
            data,
        }
    }

    pub(crate) fn bool(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: bool,
    ) -> Self {
        Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Bool {
                value: default,
                default,
            },
        )
    }

    pub(crate) fn int(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: i32,
        min: i32,
        max: i32,
    ) -> Result<Self, SettingError> {
        if min > max {
            return Err(SettingError::InvalidRange {
                name,
                min: min as f32,
                max: max as f32,
            });
        }
        if default < min || default > max {
            return Err(SettingError::DefaultOutOfRange {
                name,
                value: default as f32,
                min: min as f32,
                max: max as f32,
            });
        }
        Ok(Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Int {
                value: default,
                default,
                min,
                max,
            },
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn float(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: f32,
        min: f32,
        max: f32,
        step: f32,
        conversion: ConversionMode,
        scale: f32,
    ) -> Result<Self, SettingError> {
        if min > max {
            return Err(SettingError::InvalidRange { name, min, max });
        }
        if default < min || default > max {
            return Err(SettingError::DefaultOutOfRange {
                name,
                value: default,
                min,
                max,
            });
        }
        Ok(Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Float {
                value: default,
                default,
                min,
                max,
                step,
                conversion,
                scale,
            },
        ))
    }

    pub(crate) fn labeled_enum(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: u32,
        cardinality: u32,
        labels: &[&'static str],
    ) -> Result<Self, SettingError> {
        if labels.len() != cardinality as usize {
            return Err(SettingError::LabelCountMismatch {
                name,
                labels: labels.len(),
                expected: cardinality as usize,
            });
        }
        let default = default.min(cardinality.saturating_sub(1));
        Ok(Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Enum {
                value: default,
                default,
                labels: labels.to_vec(),
            },
        ))
    }

    pub(crate) fn direction(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: Vec3,
        view_space: bool,
    ) -> Result<Self, SettingError> {
        let default = try_normalize(&default).ok_or(SettingError::ZeroDirection(name))?;
        Ok(Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Direction {
                value: default.clone(),
                default,
                view_space,
            },
        ))
    }

    pub(crate) fn color(
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: [f32; 3],
        unit: ColorUnit,
    ) -> Self {
        let default = clamp_rgb(default);
        Setting::new(
            name,
            group,
            label,
            help,
            SettingData::Color {
                value: default,
                default,
                unit,
            },
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> &'static str {
        self.group
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether this setting's value changed (by edit or assignment) since
    /// the changed flags were last drained.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn kind(&self) -> SettingKind {
        match &self.data {
            SettingData::Bool { .. } => SettingKind::Bool,
            SettingData::Int { .. } => SettingKind::Int,
            SettingData::Float { .. } => SettingKind::Float,
            SettingData::Enum { .. } => SettingKind::Enum,
            SettingData::Direction { .. } => SettingKind::Direction,
            SettingData::Color { .. } => SettingKind::Color,
        }
    }

    /// The raw stored value (floats unconverted)
    pub fn value(&self) -> SettingValue {
        match &self.data {
            SettingData::Bool { value, .. } => SettingValue::Bool(*value),
            SettingData::Int { value, .. } => SettingValue::Int(*value),
            SettingData::Float { value, .. } => SettingValue::Float(*value),
            SettingData::Enum { value, .. } => SettingValue::Enum(*value),
            SettingData::Direction { value, .. } => {
                SettingValue::Direction([value.x, value.y, value.z])
            }
            SettingData::Color { value, .. } => SettingValue::Color(*value),
        }
    }

    /// The declared default
    pub fn default_value(&self) -> SettingValue {
        match &self.data {
            SettingData::Bool { default, .. } => SettingValue::Bool(*default),
            SettingData::Int { default, .. } => SettingValue::Int(*default),
            SettingData::Float { default, .. } => SettingValue::Float(*default),
            SettingData::Enum { default, .. } => SettingValue::Enum(*default),
            SettingData::Direction { default, .. } => {
                SettingValue::Direction([default.x, default.y, default.z])
            }
            SettingData::Color { default, .. } => SettingValue::Color(*default),
        }
    }

    /// Assign a value of the matching variant, clamping or renormalizing
    /// as the kind requires. Out-of-range input is not an error.
    pub(crate) fn set_value(&mut self, new: SettingValue) -> Result<(), SettingError> {
        match (&mut self.data, new) {
            (SettingData::Bool { value, .. }, SettingValue::Bool(v)) => {
                *value = v;
            }
            (SettingData::Int { value, min, max, .. }, SettingValue::Int(v)) => {
                *value = v.clamp(*min, *max);
            }
            (SettingData::Float { value, min, max, .. }, SettingValue::Float(v)) => {
                *value = v.clamp(*min, *max);
            }
            (SettingData::Enum { value, labels, .. }, SettingValue::Enum(v)) => {
                *value = v.min(labels.len() as u32 - 1);
            }
            (SettingData::Direction { value, .. }, SettingValue::Direction(v)) => {
                let candidate = Vec3::new(v[0], v[1], v[2]);
                if let Some(unit) = try_normalize(&candidate) {
                    *value = unit;
                } else {
                    log::warn!("ignoring zero-length assignment to direction '{}'", self.name);
                    return Ok(());
                }
            }
            (SettingData::Color { value, .. }, SettingValue::Color(v)) => {
                *value = clamp_rgb(v);
            }
            (data, new) => {
                let expected = match data {
                    SettingData::Bool { .. } => "bool",
                    SettingData::Int { .. } => "int",
                    SettingData::Float { .. } => "float",
                    SettingData::Enum { .. } => "enum",
                    SettingData::Direction { .. } => "direction",
                    SettingData::Color { .. } => "color",
                };
                return Err(SettingError::TypeMismatch {
                    name: self.name,
                    expected,
                    actual: match new.kind() {
                        SettingKind::Bool => "bool",
                        SettingKind::Int => "int",
                        SettingKind::Float => "float",
                        SettingKind::Enum => "enum",
                        SettingKind::Direction => "direction",
                        SettingKind::Color => "color",
                    },
                });
            }
        }
        self.changed = true;
        Ok(())
    }

    /// Revert to the declared default
    pub(crate) fn reset(&mut self) {
        let default = self.default_value();
        // Default was validated at construction; assignment cannot fail.
        let _ = self.set_value(default);
    }

    /// Draw this setting's control and absorb any edit
    ///
    /// Numeric edits are clamped and direction edits renormalized before the
    /// value is considered current. Returns whether the value changed.
    pub(crate) fn draw(&mut self, editor: &mut dyn SettingEditor, frame: &FrameContext) -> bool {
        let label = self.label;
        let help = self.help;

        let edited = match &mut self.data {
            SettingData::Bool { value, .. } => editor.toggle(label, help, value),
            SettingData::Int { value, min, max, .. } => {
                let edited = editor.int_slider(label, help, value, *min, *max);
                *value = (*value).clamp(*min, *max);
                edited
            }
            SettingData::Float {
                value,
                min,
                max,
                step,
                ..
            } => {
                let bounded = *min > -BOUNDED_RANGE_LIMIT && *max < BOUNDED_RANGE_LIMIT;
                let edited = if bounded {
                    editor.float_slider(label, help, value, *min, *max)
                } else {
                    editor.float_drag(label, help, value, *step)
                };
                *value = value.clamp(*min, *max);
                edited
            }
            SettingData::Enum { value, labels, .. } => {
                let edited = editor.combo(label, help, value, labels);
                *value = (*value).min(labels.len() as u32 - 1);
                edited
            }
            SettingData::Direction {
                value, view_space, ..
            } => {
                let draw_dir = if *view_space {
                    rotate_dir(&frame.view, value)
                } else {
                    value.clone()
                };
                let gizmo = editor.direction_gizmo(label, help, &draw_dir);

                let mut candidate: Option<Vec3> = None;
                if let Some((dx, dy)) = gizmo.drag_delta {
                    let rotation =
                        euler_rotation(dy * GIZMO_ROTATE_SPEED, dx * GIZMO_ROTATE_SPEED);
                    let rotated = if *view_space {
                        // Rotate in view space so the drag tracks the camera,
                        // then map back through the transposed view rotation.
                        let in_view = rotate_dir(&frame.view, value);
                        let in_view = rotate_dir(&rotation, &in_view);
                        rotate_dir(&transpose_rotation(&frame.view), &in_view)
                    } else {
                        rotate_dir(&rotation, value)
                    };
                    candidate = Some(rotated);
                }
                if let Some(axes) = gizmo.axes {
                    // Axis edits arrive in the displayed space
                    let edited = Vec3::new(axes[0], axes[1], axes[2]);
                    candidate = Some(if *view_space {
                        rotate_dir(&transpose_rotation(&frame.view), &edited)
                    } else {
                        edited
                    });
                }

                match candidate.as_ref().and_then(try_normalize) {
                    Some(unit) => {
                        *value = unit;
                        true
                    }
                    None => false,
                }
            }
            SettingData::Color { value, unit, .. } => {
                let mut shown = unit.to_display(*value);
                let edited = editor.color_swatch(label, help, &mut shown);
                if edited {
                    *value = clamp_rgb(unit.from_display(shown));
                }
                edited
            }
        };

        if edited {
            self.changed = true;
        }
        edited
    }
}

fn clamp_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [
        rgb[0].clamp(0.0, 1.0),
        rgb[1].clamp(0.0, 1.0),
        rgb[2].clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", SettingKind::Bool), "bool");
        assert_eq!(format!("{}", SettingKind::Direction), "direction");
    }

    #[test]
    fn conversion_modes() {
        assert_eq!(ConversionMode::None.apply(3.0, 1.0), 3.0);
        assert_eq!(ConversionMode::Square.apply(3.0, 1.0), 9.0);
        assert_eq!(ConversionMode::SquareRoot.apply(9.0, 1.0), 3.0);
        assert!((ConversionMode::DegToRadians.apply(180.0, 1.0) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(ConversionMode::None.apply(2.0, 4.0), 8.0);
    }

    #[test]
    fn color_unit_roundtrip() {
        let rgb = [0.25, 0.5, 1.0];
        let shown = ColorUnit::Perceptual.to_display(rgb);
        let back = ColorUnit::Perceptual.from_display(shown);
        for i in 0..3 {
            assert!((back[i] - rgb[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn float_default_out_of_range() {
        let err = Setting::float(
            "f",
            "g",
            "F",
            "",
            5.0,
            0.0,
            1.0,
            0.1,
            ConversionMode::None,
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, SettingError::DefaultOutOfRange { .. }));
    }

    #[test]
    fn int_invalid_range() {
        let err = Setting::int("i", "g", "I", "", 0, 10, 0).unwrap_err();
        assert!(matches!(err, SettingError::InvalidRange { .. }));
    }

    #[test]
    fn enum_label_count_checked() {
        let err = Setting::labeled_enum("e", "g", "E", "", 0, 3, &["a", "b"]).unwrap_err();
        assert!(matches!(
            err,
            SettingError::LabelCountMismatch {
                labels: 2,
                expected: 3,
                ..
            }
        ));
        assert!(Setting::labeled_enum("e", "g", "E", "", 0, 2, &["a", "b"]).is_ok());
    }

    #[test]
    fn direction_default_normalized() {
        let s = Setting::direction("d", "g", "D", "", Vec3::new(0.0, 10.0, 0.0), false).unwrap();
        match s.value() {
            SettingValue::Direction(v) => {
                assert!((v[1] - 1.0).abs() < 1e-6);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn direction_zero_default_rejected() {
        let err =
            Setting::direction("d", "g", "D", "", Vec3::new(0.0, 0.0, 0.0), false).unwrap_err();
        assert_eq!(err, SettingError::ZeroDirection("d"));
    }

    #[test]
    fn set_value_clamps() {
        let mut s = Setting::float(
            "f",
            "g",
            "F",
            "",
            2.0,
            1.0,
            10.0,
            0.1,
            ConversionMode::None,
            1.0,
        )
        .unwrap();
        s.set_value(SettingValue::Float(15.0)).unwrap();
        assert_eq!(s.value(), SettingValue::Float(10.0));
        s.set_value(SettingValue::Float(-3.0)).unwrap();
        assert_eq!(s.value(), SettingValue::Float(1.0));
        s.set_value(SettingValue::Float(4.5)).unwrap();
        assert_eq!(s.value(), SettingValue::Float(4.5));
    }

    #[test]
    fn set_value_type_mismatch() {
        let mut s = Setting::bool("b", "g", "B", "", true);
        let err = s.set_value(SettingValue::Int(1)).unwrap_err();
        assert!(matches!(err, SettingError::TypeMismatch { .. }));
        // Value untouched on mismatch
        assert_eq!(s.value(), SettingValue::Bool(true));
    }

    #[test]
    fn changed_flag_set_on_assignment() {
        let mut s = Setting::bool("b", "g", "B", "", false);
        assert!(!s.changed());
        s.set_value(SettingValue::Bool(true)).unwrap();
        assert!(s.changed());
    }
}
