//! Error types for the settings registry

use thiserror::Error;

/// Errors raised while declaring or accessing settings
///
/// All of these are construction-time programmer errors: a correct
/// registration sequence never produces them at runtime. Out-of-range
/// *edits* are not errors; they are clamped or renormalized silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    /// A group with this name was already added
    #[error("duplicate settings group '{0}'")]
    DuplicateGroup(&'static str),

    /// A setting declared a group that was never added
    #[error("setting '{name}' references unknown group '{group}'")]
    UnknownGroup {
        name: &'static str,
        group: &'static str,
    },

    /// A setting with this name was already registered
    #[error("duplicate setting '{0}'")]
    DuplicateSetting(&'static str),

    /// min > max at declaration time
    #[error("setting '{name}' declares an empty range [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// Declared default lies outside the declared range
    #[error("default {value} for setting '{name}' is outside [{min}, {max}]")]
    DefaultOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Enum label table does not cover the enum's cardinality
    #[error("setting '{name}' declares {labels} labels for an enum with {expected} values")]
    LabelCountMismatch {
        name: &'static str,
        labels: usize,
        expected: usize,
    },

    /// Direction default cannot be normalized
    #[error("direction setting '{0}' has a zero-length default")]
    ZeroDirection(&'static str),

    /// Setting not found by name
    #[error("setting not found: {0}")]
    NotFound(String),

    /// Generic value assignment with the wrong variant
    #[error("type mismatch for setting '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}
