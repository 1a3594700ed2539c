//! The application's settings declaration and its shader-constant mirror
//!
//! Everything the renderer exposes to live editing is declared here, in the
//! order the editor lays it out. Settings the shaders consume are copied
//! into [`ShaderConstants`] once per frame; editor-only settings (vsync,
//! scene choice, sky parameters the CPU sky model reads directly) stay out
//! of the mirror.

use bytemuck::{Pod, Zeroable};
use lin_alg::f32::Vec3;
use lumen_render::{Bool32, ConstantBuffer};
use lumen_settings::{
    BoolId, ColorId, ColorUnit, DirectionId, EnumId, EnumValue, FloatId, FrameContext, IntId,
    SettingEditor, SettingError, SettingsRegistry,
};

/// MSAA sample counts the swapchain supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsaaMode {
    Off,
    X2,
    X4,
}

impl MsaaMode {
    pub const LABELS: [&'static str; 3] = ["None", "2x", "4x"];

    pub fn sample_count(self) -> u32 {
        match self {
            MsaaMode::Off => 1,
            MsaaMode::X2 => 2,
            MsaaMode::X4 => 4,
        }
    }
}

impl EnumValue for MsaaMode {
    const COUNT: u32 = 3;

    fn from_index(index: u32) -> Self {
        match index {
            0 => MsaaMode::Off,
            1 => MsaaMode::X2,
            _ => MsaaMode::X4,
        }
    }

    fn index(self) -> u32 {
        self as u32
    }
}

/// Built-in test scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    Sponza,
    SunTemple,
    BoxTest,
}

impl ScenePreset {
    pub const LABELS: [&'static str; 3] = ["Sponza", "Sun Temple", "Box Test"];
}

impl EnumValue for ScenePreset {
    const COUNT: u32 = 3;

    fn from_index(index: u32) -> Self {
        match index {
            0 => ScenePreset::Sponza,
            1 => ScenePreset::SunTemple,
            _ => ScenePreset::BoxTest,
        }
    }

    fn index(self) -> u32 {
        self as u32
    }
}

/// Shader-visible snapshot of the settings
///
/// Field order follows uniform-buffer packing rules: the vec3 sits on a
/// 16-byte boundary and the total size is a multiple of 16.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShaderConstants {
    pub enable_sun: Bool32,
    pub sun_area_light_approximation: Bool32,
    pub sun_size: f32,
    pub _pad0: f32,
    pub sun_direction: [f32; 3],
    pub msaa_mode: i32,
    pub render_lights: Bool32,
    pub enable_ray_tracing: Bool32,
    pub sqrt_num_samples: i32,
    pub max_path_length: i32,
    pub exposure: f32,
    pub bloom_exposure: f32,
    pub bloom_magnitude: f32,
    pub bloom_blur_sigma: f32,
    pub enable_albedo_maps: Bool32,
    pub enable_normal_maps: Bool32,
    pub enable_diffuse: Bool32,
    pub enable_specular: Bool32,
    pub enable_direct: Bool32,
    pub enable_indirect: Bool32,
    pub enable_indirect_specular: Bool32,
    pub roughness_scale: f32,
}

/// The full settings declaration plus its GPU mirror
///
/// Per-frame protocol, all on the render thread:
/// [`update`](AppSettings::update) →
/// [`update_cbuffer`](AppSettings::update_cbuffer) →
/// [`bind_gfx`](AppSettings::bind_gfx) /
/// [`bind_compute`](AppSettings::bind_compute) → draw or dispatch.
pub struct AppSettings {
    pub registry: SettingsRegistry,

    pub enable_sun: BoolId,
    pub enable_sky: BoolId,
    pub sun_area_light_approximation: BoolId,
    pub sun_size: FloatId,
    pub sun_direction: DirectionId,
    pub turbidity: FloatId,
    pub ground_albedo: ColorId,

    pub msaa_mode: EnumId<MsaaMode>,

    pub current_scene: EnumId<ScenePreset>,
    pub render_lights: BoolId,

    pub enable_ray_tracing: BoolId,
    pub sqrt_num_samples: IntId,
    pub max_path_length: IntId,

    pub exposure: FloatId,
    pub bloom_exposure: FloatId,
    pub bloom_magnitude: FloatId,
    pub bloom_blur_sigma: FloatId,

    pub enable_vsync: BoolId,
    pub enable_albedo_maps: BoolId,
    pub enable_normal_maps: BoolId,
    pub enable_diffuse: BoolId,
    pub enable_specular: BoolId,
    pub enable_direct: BoolId,
    pub enable_indirect: BoolId,
    pub enable_indirect_specular: BoolId,
    pub roughness_scale: FloatId,
    pub always_reset_path_trace: BoolId,
    pub show_progress_bar: BoolId,

    cbuffer: Option<ConstantBuffer<ShaderConstants>>,
}

impl AppSettings {
    /// Build the registry. GPU resources come later via
    /// [`init_gpu`](AppSettings::init_gpu), so this is cheap and testable.
    pub fn new() -> Result<Self, SettingError> {
        let mut reg = SettingsRegistry::with_group_capacity(6);

        reg.add_group("Sun And Sky", true)?;
        reg.add_group("Anti Aliasing", false)?;
        reg.add_group("Scene", true)?;
        reg.add_group("Path Tracing", true)?;
        reg.add_group("Post Processing", false)?;
        reg.add_group("Debug", true)?;

        let enable_sun = reg.add_bool(
            "EnableSun",
            "Sun And Sky",
            "Enable Sun",
            "Enables the sun light",
            true,
        )?;
        let enable_sky = reg.add_bool(
            "EnableSky",
            "Sun And Sky",
            "Enable Sky",
            "Enables the sky environment",
            true,
        )?;
        let sun_area_light_approximation = reg.add_bool(
            "SunAreaLightApproximation",
            "Sun And Sky",
            "Sun Area Light Approximation",
            "Treat the sun as a disc area light in the real-time shader",
            true,
        )?;
        let sun_size = reg.add_float(
            "SunSize",
            "Sun And Sky",
            "Sun Size",
            "Angular radius of the sun in degrees",
            1.0,
            0.01,
            f32::MAX,
            0.01,
        )?;
        let sun_direction = reg.add_direction(
            "SunDirection",
            "Sun And Sky",
            "Sun Direction",
            "Direction of the sun",
            Vec3::new(0.26, 0.987, -0.16),
            true,
        )?;
        let turbidity = reg.add_float(
            "Turbidity",
            "Sun And Sky",
            "Turbidity",
            "Atmospheric turbidity used for the procedural sun and sky model",
            2.0,
            1.0,
            10.0,
            0.01,
        )?;
        let ground_albedo = reg.add_color(
            "GroundAlbedo",
            "Sun And Sky",
            "Ground Albedo",
            "Ground albedo color used for the procedural sun and sky model",
            [0.25, 0.25, 0.25],
            ColorUnit::None,
        )?;

        let msaa_mode = reg.add_enum(
            "MSAAMode",
            "Anti Aliasing",
            "MSAA Mode",
            "MSAA mode to use for rendering",
            MsaaMode::X4,
            &MsaaMode::LABELS,
        )?;

        let current_scene = reg.add_enum(
            "CurrentScene",
            "Scene",
            "Current Scene",
            "",
            ScenePreset::Sponza,
            &ScenePreset::LABELS,
        )?;
        let render_lights = reg.add_bool(
            "RenderLights",
            "Scene",
            "Render Lights",
            "Enable or disable spot light rendering",
            true,
        )?;

        let enable_ray_tracing = reg.add_bool(
            "EnableRayTracing",
            "Path Tracing",
            "Enable Ray Tracing",
            "",
            true,
        )?;
        let sqrt_num_samples = reg.add_int(
            "SqrtNumSamples",
            "Path Tracing",
            "Sqrt Num Samples",
            "Square root of the number of per-pixel sample rays",
            4,
            1,
            100,
        )?;
        let max_path_length = reg.add_int(
            "MaxPathLength",
            "Path Tracing",
            "Max Path Length",
            "Maximum path length (bounces) to use for path tracing",
            3,
            2,
            8,
        )?;

        let exposure = reg.add_float(
            "Exposure",
            "Post Processing",
            "Exposure",
            "Exposure applied before tone mapping (log2 scale)",
            -14.0,
            -24.0,
            24.0,
            0.1,
        )?;
        let bloom_exposure = reg.add_float(
            "BloomExposure",
            "Post Processing",
            "Bloom Exposure Offset",
            "Exposure offset applied to the input of the bloom pass",
            -4.0,
            -10.0,
            0.0,
            0.01,
        )?;
        let bloom_magnitude = reg.add_float(
            "BloomMagnitude",
            "Post Processing",
            "Bloom Magnitude",
            "Scale factor applied to the bloom results",
            1.0,
            0.0,
            2.0,
            0.01,
        )?;
        let bloom_blur_sigma = reg.add_float(
            "BloomBlurSigma",
            "Post Processing",
            "Bloom Blur Sigma",
            "Sigma parameter of the Gaussian filter used in the bloom pass",
            2.5,
            0.5,
            2.5,
            0.01,
        )?;

        let enable_vsync = reg.add_bool(
            "EnableVSync",
            "Debug",
            "Enable VSync",
            "Enables or disables vertical sync during presentation",
            true,
        )?;
        let enable_albedo_maps = reg.add_bool(
            "EnableAlbedoMaps",
            "Debug",
            "Enable Albedo Maps",
            "Enables albedo maps",
            true,
        )?;
        let enable_normal_maps = reg.add_bool(
            "EnableNormalMaps",
            "Debug",
            "Enable Normal Maps",
            "Enables normal maps",
            true,
        )?;
        let enable_diffuse = reg.add_bool(
            "EnableDiffuse",
            "Debug",
            "Enable Diffuse",
            "Enables diffuse reflections",
            true,
        )?;
        let enable_specular = reg.add_bool(
            "EnableSpecular",
            "Debug",
            "Enable Specular",
            "Enables specular reflections",
            true,
        )?;
        let enable_direct = reg.add_bool(
            "EnableDirect",
            "Debug",
            "Enable Direct",
            "Enables direct lighting",
            true,
        )?;
        let enable_indirect = reg.add_bool(
            "EnableIndirect",
            "Debug",
            "Enable Indirect",
            "Enables indirect lighting",
            true,
        )?;
        let enable_indirect_specular = reg.add_bool(
            "EnableIndirectSpecular",
            "Debug",
            "Enable Indirect Specular",
            "Enables indirect specular reflections (noisier output)",
            false,
        )?;
        let roughness_scale = reg.add_float(
            "RoughnessScale",
            "Debug",
            "Roughness Scale",
            "Scales the scene roughness by this value",
            1.0,
            0.001,
            2.0,
            0.01,
        )?;
        let always_reset_path_trace = reg.add_bool(
            "AlwaysResetPathTrace",
            "Debug",
            "Always Reset Path Trace",
            "",
            false,
        )?;
        let show_progress_bar = reg.add_bool(
            "ShowProgressBar",
            "Debug",
            "Show Progress Bar",
            "",
            true,
        )?;

        log::info!("application settings registered ({} settings)", reg.len());

        Ok(AppSettings {
            registry: reg,
            enable_sun,
            enable_sky,
            sun_area_light_approximation,
            sun_size,
            sun_direction,
            turbidity,
            ground_albedo,
            msaa_mode,
            current_scene,
            render_lights,
            enable_ray_tracing,
            sqrt_num_samples,
            max_path_length,
            exposure,
            bloom_exposure,
            bloom_magnitude,
            bloom_blur_sigma,
            enable_vsync,
            enable_albedo_maps,
            enable_normal_maps,
            enable_diffuse,
            enable_specular,
            enable_direct,
            enable_indirect,
            enable_indirect_specular,
            roughness_scale,
            always_reset_path_trace,
            show_progress_bar,
            cbuffer: None,
        })
    }

    /// Create the constant buffer and its bind group
    pub fn init_gpu(&mut self, device: &wgpu::Device) {
        self.cbuffer = Some(ConstantBuffer::new(device, "app settings"));
    }

    /// Run the editor traversal for this frame
    pub fn update(&mut self, editor: &mut dyn SettingEditor, frame: &FrameContext) -> bool {
        self.registry.update(editor, frame)
    }

    /// Copy the shader-visible subset of the current values
    pub fn snapshot(&self) -> ShaderConstants {
        let reg = &self.registry;
        let sun_dir = reg.direction(self.sun_direction);
        ShaderConstants {
            enable_sun: reg.bool(self.enable_sun).into(),
            sun_area_light_approximation: reg.bool(self.sun_area_light_approximation).into(),
            sun_size: reg.float(self.sun_size),
            _pad0: 0.0,
            sun_direction: [sun_dir.x, sun_dir.y, sun_dir.z],
            msaa_mode: reg.enum_value(self.msaa_mode).index() as i32,
            render_lights: reg.bool(self.render_lights).into(),
            enable_ray_tracing: reg.bool(self.enable_ray_tracing).into(),
            sqrt_num_samples: reg.int(self.sqrt_num_samples),
            max_path_length: reg.int(self.max_path_length),
            exposure: reg.float(self.exposure),
            bloom_exposure: reg.float(self.bloom_exposure),
            bloom_magnitude: reg.float(self.bloom_magnitude),
            bloom_blur_sigma: reg.float(self.bloom_blur_sigma),
            enable_albedo_maps: reg.bool(self.enable_albedo_maps).into(),
            enable_normal_maps: reg.bool(self.enable_normal_maps).into(),
            enable_diffuse: reg.bool(self.enable_diffuse).into(),
            enable_specular: reg.bool(self.enable_specular).into(),
            enable_direct: reg.bool(self.enable_direct).into(),
            enable_indirect: reg.bool(self.enable_indirect).into(),
            enable_indirect_specular: reg.bool(self.enable_indirect_specular).into(),
            roughness_scale: reg.float(self.roughness_scale),
        }
    }

    /// Upload this frame's snapshot to the GPU
    pub fn update_cbuffer(&self, queue: &wgpu::Queue) {
        match &self.cbuffer {
            Some(cb) => cb.write(queue, &self.snapshot()),
            None => log::warn!("update_cbuffer called before init_gpu"),
        }
    }

    /// Bind group layout for pipeline creation, once GPU-initialized
    pub fn cbuffer_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.cbuffer.as_ref().map(|cb| cb.layout())
    }

    /// Attach the constant buffer to a render pass
    pub fn bind_gfx<'p>(&'p self, pass: &mut wgpu::RenderPass<'p>, index: u32) {
        if let Some(cb) = &self.cbuffer {
            cb.bind_gfx(pass, index);
        }
    }

    /// Attach the constant buffer to a compute pass
    pub fn bind_compute<'p>(&'p self, pass: &mut wgpu::ComputePass<'p>, index: u32) {
        if let Some(cb) = &self.cbuffer {
            cb.bind_compute(pass, index);
        }
    }
}
