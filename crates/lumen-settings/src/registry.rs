//! The settings registry: ordered groups, an arena of settings, and the
//! per-frame editor traversal
//!
//! The registry owns every [`Setting`]. Registration hands back a typed id
//! (a plain index wrapper) that later reads and writes go through, so typed
//! access never pays a name lookup and cannot pick the wrong variant.

use ahash::AHashMap;
use lin_alg::f32::Vec3;
use std::marker::PhantomData;

use crate::editor::{FrameContext, SettingEditor};
use crate::error::SettingError;
use crate::setting::{
    ColorUnit, ConversionMode, EnumValue, Setting, SettingData, SettingValue,
};

/// Untyped handle to a registered setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingId(pub(crate) u32);

macro_rules! typed_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) u32);

        impl From<$name> for SettingId {
            fn from(id: $name) -> SettingId {
                SettingId(id.0)
            }
        }
    };
}

typed_id!(
    /// Handle to a bool setting
    BoolId
);
typed_id!(
    /// Handle to an int setting
    IntId
);
typed_id!(
    /// Handle to a float setting
    FloatId
);
typed_id!(
    /// Handle to a direction setting
    DirectionId
);
typed_id!(
    /// Handle to a color setting
    ColorId
);

/// Handle to an enum setting, tagged with the enum type it was declared for
#[derive(Debug)]
pub struct EnumId<T: EnumValue> {
    index: u32,
    _marker: PhantomData<T>,
}

impl<T: EnumValue> Clone for EnumId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: EnumValue> Copy for EnumId<T> {}

impl<T: EnumValue> From<EnumId<T>> for SettingId {
    fn from(id: EnumId<T>) -> SettingId {
        SettingId(id.index)
    }
}

/// A named, ordered, collapsible group of settings
#[derive(Debug, Clone)]
pub struct SettingsGroup {
    name: &'static str,
    expanded: bool,
    members: Vec<u32>,
}

impl SettingsGroup {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Registry of groups and settings
///
/// Groups and settings keep their registration order, which is also the
/// order the editor draws them in.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    groups: Vec<SettingsGroup>,
    group_index: AHashMap<&'static str, usize>,
    settings: Vec<Setting>,
    name_index: AHashMap<&'static str, u32>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        SettingsRegistry::default()
    }

    pub fn with_group_capacity(groups: usize) -> Self {
        SettingsRegistry {
            groups: Vec::with_capacity(groups),
            group_index: AHashMap::with_capacity(groups),
            settings: Vec::new(),
            name_index: AHashMap::new(),
        }
    }

    /// Declare a group. Settings can only join groups that already exist.
    pub fn add_group(
        &mut self,
        name: &'static str,
        default_expanded: bool,
    ) -> Result<(), SettingError> {
        if self.group_index.contains_key(name) {
            return Err(SettingError::DuplicateGroup(name));
        }
        log::debug!("settings group '{name}' registered");
        self.group_index.insert(name, self.groups.len());
        self.groups.push(SettingsGroup {
            name,
            expanded: default_expanded,
            members: Vec::new(),
        });
        Ok(())
    }

    fn register(&mut self, setting: Setting) -> Result<u32, SettingError> {
        let group_slot = *self
            .group_index
            .get(setting.group)
            .ok_or(SettingError::UnknownGroup {
                name: setting.name,
                group: setting.group,
            })?;
        if self.name_index.contains_key(setting.name) {
            return Err(SettingError::DuplicateSetting(setting.name));
        }
        let index = self.settings.len() as u32;
        log::debug!(
            "setting '{}' ({}) registered in group '{}'",
            setting.name,
            setting.kind(),
            setting.group
        );
        self.name_index.insert(setting.name, index);
        self.groups[group_slot].members.push(index);
        self.settings.push(setting);
        Ok(index)
    }

    pub fn add_bool(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: bool,
    ) -> Result<BoolId, SettingError> {
        let setting = Setting::bool(name, group, label, help, default);
        Ok(BoolId(self.register(setting)?))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_int(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: i32,
        min: i32,
        max: i32,
    ) -> Result<IntId, SettingError> {
        let setting = Setting::int(name, group, label, help, default, min, max)?;
        Ok(IntId(self.register(setting)?))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_float(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: f32,
        min: f32,
        max: f32,
        step: f32,
    ) -> Result<FloatId, SettingError> {
        self.add_float_converted(
            name,
            group,
            label,
            help,
            default,
            min,
            max,
            step,
            ConversionMode::None,
            1.0,
        )
    }

    /// Float setting whose read value goes through a conversion and scale.
    /// The stored (and edited) value stays in the declared range.
    #[allow(clippy::too_many_arguments)]
    pub fn add_float_converted(
        &mut self,
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
    ) -> Result<FloatId, SettingError> {
        let setting = Setting::float(
            name, group, label, help, default, min, max, step, conversion, scale,
        )?;
        Ok(FloatId(self.register(setting)?))
    }

    pub fn add_enum<T: EnumValue>(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: T,
        labels: &[&'static str],
    ) -> Result<EnumId<T>, SettingError> {
        let setting =
            Setting::labeled_enum(name, group, label, help, default.index(), T::COUNT, labels)?;
        Ok(EnumId {
            index: self.register(setting)?,
            _marker: PhantomData,
        })
    }

    pub fn add_direction(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: Vec3,
        view_space: bool,
    ) -> Result<DirectionId, SettingError> {
        let setting = Setting::direction(name, group, label, help, default, view_space)?;
        Ok(DirectionId(self.register(setting)?))
    }

    pub fn add_color(
        &mut self,
        name: &'static str,
        group: &'static str,
        label: &'static str,
        help: &'static str,
        default: [f32; 3],
        unit: ColorUnit,
    ) -> Result<ColorId, SettingError> {
        let setting = Setting::color(name, group, label, help, default, unit);
        Ok(ColorId(self.register(setting)?))
    }

    // Typed access. Ids are only minted by registration, so the variant is
    // known and indexing cannot miss.

    pub fn bool(&self, id: BoolId) -> bool {
        match &self.settings[id.0 as usize].data {
            SettingData::Bool { value, .. } => *value,
            _ => unreachable!("bool id points at a non-bool setting"),
        }
    }

    pub fn set_bool(&mut self, id: BoolId, value: bool) {
        let setting = &mut self.settings[id.0 as usize];
        if let SettingData::Bool { value: stored, .. } = &mut setting.data {
            if *stored != value {
                *stored = value;
                setting.changed = true;
            }
        }
    }

    pub fn int(&self, id: IntId) -> i32 {
        match &self.settings[id.0 as usize].data {
            SettingData::Int { value, .. } => *value,
            _ => unreachable!("int id points at a non-int setting"),
        }
    }

    pub fn set_int(&mut self, id: IntId, value: i32) {
        let setting = &mut self.settings[id.0 as usize];
        if let SettingData::Int {
            value: stored,
            min,
            max,
            ..
        } = &mut setting.data
        {
            let clamped = value.clamp(*min, *max);
            if *stored != clamped {
                *stored = clamped;
                setting.changed = true;
            }
        }
    }

    /// The float's consumer-facing value: stored value run through the
    /// setting's conversion and scale.
    pub fn float(&self, id: FloatId) -> f32 {
        match &self.settings[id.0 as usize].data {
            SettingData::Float {
                value,
                conversion,
                scale,
                ..
            } => conversion.apply(*value, *scale),
            _ => unreachable!("float id points at a non-float setting"),
        }
    }

    /// The float's stored value, before any conversion
    pub fn raw_float(&self, id: FloatId) -> f32 {
        match &self.settings[id.0 as usize].data {
            SettingData::Float { value, .. } => *value,
            _ => unreachable!("float id points at a non-float setting"),
        }
    }

    pub fn set_float(&mut self, id: FloatId, value: f32) {
        let setting = &mut self.settings[id.0 as usize];
        if let SettingData::Float {
            value: stored,
            min,
            max,
            ..
        } = &mut setting.data
        {
            let clamped = value.clamp(*min, *max);
            if *stored != clamped {
                *stored = clamped;
                setting.changed = true;
            }
        }
    }

    pub fn enum_value<T: EnumValue>(&self, id: EnumId<T>) -> T {
        match &self.settings[id.index as usize].data {
            SettingData::Enum { value, .. } => T::from_index(*value),
            _ => unreachable!("enum id points at a non-enum setting"),
        }
    }

    pub fn set_enum<T: EnumValue>(&mut self, id: EnumId<T>, value: T) {
        let setting = &mut self.settings[id.index as usize];
        if let SettingData::Enum { value: stored, .. } = &mut setting.data {
            let index = value.index().min(T::COUNT - 1);
            if *stored != index {
                *stored = index;
                setting.changed = true;
            }
        }
    }

    pub fn direction(&self, id: DirectionId) -> Vec3 {
        match &self.settings[id.0 as usize].data {
            SettingData::Direction { value, .. } => value.clone(),
            _ => unreachable!("direction id points at a non-direction setting"),
        }
    }

    /// Assign a direction; zero-length input is ignored with a warning,
    /// anything else is renormalized.
    pub fn set_direction(&mut self, id: DirectionId, value: Vec3) {
        let setting = &mut self.settings[id.0 as usize];
        if setting
            .set_value(SettingValue::Direction([value.x, value.y, value.z]))
            .is_err()
        {
            unreachable!("direction id points at a non-direction setting");
        }
    }

    pub fn color(&self, id: ColorId) -> [f32; 3] {
        match &self.settings[id.0 as usize].data {
            SettingData::Color { value, .. } => *value,
            _ => unreachable!("color id points at a non-color setting"),
        }
    }

    pub fn set_color(&mut self, id: ColorId, value: [f32; 3]) {
        let setting = &mut self.settings[id.0 as usize];
        if setting.set_value(SettingValue::Color(value)).is_err() {
            unreachable!("color id points at a non-color setting");
        }
    }

    // Generic access by untyped id or name.

    pub fn find(&self, name: &str) -> Option<SettingId> {
        self.name_index.get(name).map(|&index| SettingId(index))
    }

    pub fn setting(&self, id: impl Into<SettingId>) -> &Setting {
        &self.settings[id.into().0 as usize]
    }

    /// Raw stored value (floats unconverted)
    pub fn value(&self, id: impl Into<SettingId>) -> SettingValue {
        self.settings[id.into().0 as usize].value()
    }

    /// Assign a value of the matching variant, clamping or renormalizing
    /// as the setting requires. A wrong-variant value is a `TypeMismatch`.
    pub fn set(
        &mut self,
        id: impl Into<SettingId>,
        value: SettingValue,
    ) -> Result<(), SettingError> {
        self.settings[id.into().0 as usize].set_value(value)
    }

    pub fn set_by_name(&mut self, name: &str, value: SettingValue) -> Result<(), SettingError> {
        let id = self
            .find(name)
            .ok_or_else(|| SettingError::NotFound(name.to_owned()))?;
        self.set(id, value)
    }

    /// Revert one setting to its declared default
    pub fn reset(&mut self, id: impl Into<SettingId>) {
        self.settings[id.into().0 as usize].reset();
    }

    /// Revert every setting to its declared default
    pub fn reset_all(&mut self) {
        for setting in &mut self.settings {
            setting.reset();
        }
    }

    pub fn set_visible(&mut self, id: impl Into<SettingId>, visible: bool) {
        self.settings[id.into().0 as usize].visible = visible;
    }

    /// Whether the setting changed since its flag was last drained
    pub fn changed(&self, id: impl Into<SettingId>) -> bool {
        self.settings[id.into().0 as usize].changed
    }

    /// Read and clear one setting's changed flag
    pub fn take_changed(&mut self, id: impl Into<SettingId>) -> bool {
        let setting = &mut self.settings[id.into().0 as usize];
        let changed = setting.changed;
        setting.changed = false;
        changed
    }

    /// Read and clear all changed flags; true if anything changed
    pub fn take_any_changed(&mut self) -> bool {
        let mut any = false;
        for setting in &mut self.settings {
            any |= setting.changed;
            setting.changed = false;
        }
        any
    }

    /// Groups in registration order
    pub fn groups(&self) -> impl Iterator<Item = &SettingsGroup> {
        self.groups.iter()
    }

    /// All settings in registration order
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter()
    }

    pub fn group(&self, name: &str) -> Option<&SettingsGroup> {
        self.group_index.get(name).map(|&slot| &self.groups[slot])
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut SettingsGroup> {
        let slot = *self.group_index.get(name)?;
        Some(&mut self.groups[slot])
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Per-frame editor traversal
    ///
    /// Draws each group header in registration order; an open group draws
    /// its visible settings in registration order. Edits land in the
    /// settings immediately (clamped/renormalized) and raise their changed
    /// flags. Returns whether any value changed this frame.
    pub fn update(&mut self, editor: &mut dyn SettingEditor, frame: &FrameContext) -> bool {
        let mut any_changed = false;
        for group in &mut self.groups {
            let open = editor.group_header(group.name, &mut group.expanded);
            if !open {
                continue;
            }
            for &member in &group.members {
                let setting = &mut self.settings[member as usize];
                if !setting.visible {
                    continue;
                }
                any_changed |= setting.draw(editor, frame);
            }
        }
        any_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::GizmoResponse;
    use lin_alg::f32::Mat4;

    /// Editor that draws nothing and edits nothing
    struct NullEditor;

    impl SettingEditor for NullEditor {
        fn group_header(&mut self, _name: &str, expanded: &mut bool) -> bool {
            *expanded
        }

        fn toggle(&mut self, _label: &str, _help: &str, _value: &mut bool) -> bool {
            false
        }

        fn int_slider(
            &mut self,
            _label: &str,
            _help: &str,
            _value: &mut i32,
            _min: i32,
            _max: i32,
        ) -> bool {
            false
        }

        fn float_slider(
            &mut self,
            _label: &str,
            _help: &str,
            _value: &mut f32,
            _min: f32,
            _max: f32,
        ) -> bool {
            false
        }

        fn float_drag(&mut self, _label: &str, _help: &str, _value: &mut f32, _step: f32) -> bool {
            false
        }

        fn combo(
            &mut self,
            _label: &str,
            _help: &str,
            _index: &mut u32,
            _labels: &[&'static str],
        ) -> bool {
            false
        }

        fn color_swatch(&mut self, _label: &str, _help: &str, _rgb: &mut [f32; 3]) -> bool {
            false
        }

        fn direction_gizmo(&mut self, _label: &str, _help: &str, _dir: &Vec3) -> GizmoResponse {
            GizmoResponse::idle()
        }
    }

    /// Editor that records which controls were drawn and applies scripted
    /// edits by label
    struct ScriptedEditor {
        drawn: Vec<String>,
        float_edit: Option<(&'static str, f32)>,
        gizmo_drag: Option<(f32, f32)>,
    }

    impl ScriptedEditor {
        fn new() -> Self {
            ScriptedEditor {
                drawn: Vec::new(),
                float_edit: None,
                gizmo_drag: None,
            }
        }
    }

    impl SettingEditor for ScriptedEditor {
        fn group_header(&mut self, name: &str, expanded: &mut bool) -> bool {
            self.drawn.push(format!("group:{name}"));
            *expanded
        }

        fn toggle(&mut self, label: &str, _help: &str, _value: &mut bool) -> bool {
            self.drawn.push(label.to_owned());
            false
        }

        fn int_slider(
            &mut self,
            label: &str,
            _help: &str,
            _value: &mut i32,
            _min: i32,
            _max: i32,
        ) -> bool {
            self.drawn.push(label.to_owned());
            false
        }

        fn float_slider(
            &mut self,
            label: &str,
            _help: &str,
            value: &mut f32,
            _min: f32,
            _max: f32,
        ) -> bool {
            self.drawn.push(label.to_owned());
            if let Some((target, new)) = self.float_edit {
                if target == label {
                    *value = new;
                    return true;
                }
            }
            false
        }

        fn float_drag(&mut self, label: &str, _help: &str, value: &mut f32, _step: f32) -> bool {
            self.drawn.push(label.to_owned());
            if let Some((target, new)) = self.float_edit {
                if target == label {
                    *value = new;
                    return true;
                }
            }
            false
        }

        fn combo(
            &mut self,
            label: &str,
            _help: &str,
            _index: &mut u32,
            _labels: &[&'static str],
        ) -> bool {
            self.drawn.push(label.to_owned());
            false
        }

        fn color_swatch(&mut self, label: &str, _help: &str, _rgb: &mut [f32; 3]) -> bool {
            self.drawn.push(label.to_owned());
            false
        }

        fn direction_gizmo(&mut self, label: &str, _help: &str, _dir: &Vec3) -> GizmoResponse {
            self.drawn.push(label.to_owned());
            GizmoResponse {
                drag_delta: self.gizmo_drag,
                axes: None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Quality {
        Low,
        Medium,
        High,
    }

    impl EnumValue for Quality {
        const COUNT: u32 = 3;

        fn from_index(index: u32) -> Self {
            match index {
                0 => Quality::Low,
                1 => Quality::Medium,
                _ => Quality::High,
            }
        }

        fn index(self) -> u32 {
            self as u32
        }
    }

    fn frame() -> FrameContext {
        FrameContext::new(1920, 1080, Mat4::new_identity())
    }

    #[test]
    fn duplicate_group_rejected() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Scene", true).unwrap();
        let err = reg.add_group("Scene", false).unwrap_err();
        assert_eq!(err, SettingError::DuplicateGroup("Scene"));
        // First registration stays intact
        assert!(reg.group("Scene").unwrap().expanded());
    }

    #[test]
    fn setting_requires_existing_group() {
        let mut reg = SettingsRegistry::new();
        let err = reg
            .add_bool("vsync", "Display", "VSync", "", true)
            .unwrap_err();
        assert_eq!(
            err,
            SettingError::UnknownGroup {
                name: "vsync",
                group: "Display",
            }
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_setting_rejected() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Display", true).unwrap();
        reg.add_bool("vsync", "Display", "VSync", "", true).unwrap();
        let err = reg
            .add_bool("vsync", "Display", "Enable VSync", "", false)
            .unwrap_err();
        assert_eq!(err, SettingError::DuplicateSetting("vsync"));
    }

    #[test]
    fn defaults_read_back() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let b = reg.add_bool("shadows", "Render", "Shadows", "", true).unwrap();
        let i = reg
            .add_int("samples", "Render", "Samples", "", 4, 1, 16)
            .unwrap();
        let f = reg
            .add_float("exposure", "Render", "Exposure", "", -14.0, -24.0, 24.0, 0.01)
            .unwrap();
        let e = reg
            .add_enum(
                "quality",
                "Render",
                "Quality",
                "",
                Quality::Medium,
                &["Low", "Medium", "High"],
            )
            .unwrap();
        assert!(reg.bool(b));
        assert_eq!(reg.int(i), 4);
        assert_eq!(reg.float(f), -14.0);
        assert_eq!(reg.enum_value(e), Quality::Medium);
    }

    #[test]
    fn float_set_clamps_to_bounds() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let f = reg
            .add_float("scale", "Render", "Scale", "", 2.0, 1.0, 10.0, 0.1)
            .unwrap();
        reg.set_float(f, 15.0);
        assert_eq!(reg.float(f), 10.0);
        reg.set_float(f, 4.5);
        assert_eq!(reg.float(f), 4.5);
        reg.set_float(f, -100.0);
        assert_eq!(reg.float(f), 1.0);
    }

    #[test]
    fn converted_float_reads_converted() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Sun", true).unwrap();
        let f = reg
            .add_float_converted(
                "sun_size",
                "Sun",
                "Sun Size",
                "",
                1.0,
                0.01,
                10.0,
                0.01,
                ConversionMode::DegToRadians,
                1.0,
            )
            .unwrap();
        assert!((reg.float(f) - 1.0f32.to_radians()).abs() < 1e-6);
        assert_eq!(reg.raw_float(f), 1.0);
    }

    #[test]
    fn enum_roundtrips_through_typed_id() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let e = reg
            .add_enum(
                "quality",
                "Render",
                "Quality",
                "",
                Quality::Low,
                &["Low", "Medium", "High"],
            )
            .unwrap();
        reg.set_enum(e, Quality::High);
        assert_eq!(reg.enum_value(e), Quality::High);
        assert_eq!(reg.value(e), SettingValue::Enum(2));
    }

    #[test]
    fn direction_stays_unit_length() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Sun", true).unwrap();
        let d = reg
            .add_direction("sun_dir", "Sun", "Sun Direction", "", Vec3::new(0.26, 0.987, -0.16), false)
            .unwrap();
        assert!((reg.direction(d).magnitude() - 1.0).abs() < 1e-5);

        reg.set_direction(d, Vec3::new(3.0, 4.0, 0.0));
        assert!((reg.direction(d).magnitude() - 1.0).abs() < 1e-5);

        // Zero-length assignment is ignored
        let before = reg.direction(d);
        reg.set_direction(d, Vec3::new(0.0, 0.0, 0.0));
        let after = reg.direction(d);
        assert_eq!([before.x, before.y, before.z], [after.x, after.y, after.z]);
    }

    #[test]
    fn generic_set_checks_variant() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let b = reg.add_bool("shadows", "Render", "Shadows", "", false).unwrap();
        let err = reg.set(b, SettingValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, SettingError::TypeMismatch { .. }));
        reg.set(b, SettingValue::Bool(true)).unwrap();
        assert!(reg.bool(b));
    }

    #[test]
    fn find_and_set_by_name() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let f = reg
            .add_float("exposure", "Render", "Exposure", "", 0.0, -24.0, 24.0, 0.01)
            .unwrap();
        assert!(reg.find("exposure").is_some());
        assert!(reg.find("missing").is_none());

        reg.set_by_name("exposure", SettingValue::Float(-5.0)).unwrap();
        assert_eq!(reg.float(f), -5.0);

        let err = reg
            .set_by_name("missing", SettingValue::Float(0.0))
            .unwrap_err();
        assert!(matches!(err, SettingError::NotFound(_)));
    }

    #[test]
    fn changed_flags_drain() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let f = reg
            .add_float("exposure", "Render", "Exposure", "", 0.0, -24.0, 24.0, 0.01)
            .unwrap();
        assert!(!reg.changed(f));
        reg.set_float(f, 1.0);
        assert!(reg.changed(f));
        assert!(reg.take_changed(f));
        assert!(!reg.take_changed(f));

        // Writing back the current value is not a change
        reg.set_float(f, 1.0);
        assert!(!reg.changed(f));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let f = reg
            .add_float("exposure", "Render", "Exposure", "", -14.0, -24.0, 24.0, 0.01)
            .unwrap();
        let b = reg.add_bool("vsync", "Render", "VSync", "", true).unwrap();
        reg.set_float(f, 3.0);
        reg.set_bool(b, false);
        reg.reset_all();
        assert_eq!(reg.float(f), -14.0);
        assert!(reg.bool(b));
    }

    #[test]
    fn update_draws_open_groups_in_registration_order() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("First", true).unwrap();
        reg.add_group("Second", false).unwrap();
        reg.add_group("Third", true).unwrap();
        reg.add_bool("a", "First", "A", "", false).unwrap();
        reg.add_bool("b", "Second", "B", "", false).unwrap();
        reg.add_bool("c", "Third", "C", "", false).unwrap();
        // Late member of an earlier group still draws with its group
        reg.add_bool("a2", "First", "A2", "", false).unwrap();

        let mut editor = ScriptedEditor::new();
        reg.update(&mut editor, &frame());
        assert_eq!(
            editor.drawn,
            vec!["group:First", "A", "A2", "group:Second", "group:Third", "C"]
        );
    }

    #[test]
    fn update_skips_hidden_settings() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("G", true).unwrap();
        let a = reg.add_bool("a", "G", "A", "", false).unwrap();
        reg.add_bool("b", "G", "B", "", false).unwrap();
        reg.set_visible(a, false);

        let mut editor = ScriptedEditor::new();
        reg.update(&mut editor, &frame());
        assert_eq!(editor.drawn, vec!["group:G", "B"]);
    }

    #[test]
    fn edit_through_update_clamps_and_flags() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Render", true).unwrap();
        let f = reg
            .add_float("scale", "Render", "Scale", "", 2.0, 1.0, 10.0, 0.1)
            .unwrap();

        let mut editor = ScriptedEditor::new();
        editor.float_edit = Some(("Scale", 15.0));
        let changed = reg.update(&mut editor, &frame());
        assert!(changed);
        assert_eq!(reg.float(f), 10.0);
        assert!(reg.take_changed(f));
    }

    #[test]
    fn gizmo_drag_keeps_direction_unit_length() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("Sun", true).unwrap();
        let d = reg
            .add_direction("sun_dir", "Sun", "Sun Direction", "", Vec3::new(0.0, 0.0, -1.0), false)
            .unwrap();

        let mut editor = ScriptedEditor::new();
        editor.gizmo_drag = Some((35.0, -12.0));
        for _ in 0..50 {
            reg.update(&mut editor, &frame());
        }
        let dir = reg.direction(d);
        assert!((dir.magnitude() - 1.0).abs() < 1e-4);
        // Fifty frames of dragging must have moved it
        assert!(dir.z > -1.0 + 1e-3);
    }

    #[test]
    fn collapsed_group_state_persists() {
        let mut reg = SettingsRegistry::new();
        reg.add_group("G", true).unwrap();
        reg.add_bool("a", "G", "A", "", false).unwrap();

        reg.group_mut("G").unwrap().set_expanded(false);
        let mut editor = NullEditor;
        reg.update(&mut editor, &frame());
        assert!(!reg.group("G").unwrap().expanded());
    }
}
