use std::path::PathBuf;

use viewstate::{ControllerOptions, ImageCatalog, ImageSlot};

/// Output color handling for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpaceMode {
    /// Same as `Gamma`: image bytes are shown as stored.
    #[default]
    Auto,
    /// Sample textures as raw bytes and present on a non-sRGB swapchain.
    Gamma,
    /// Decode textures from sRGB and let an sRGB swapchain re-encode them.
    Linear,
}

impl std::fmt::Display for ColorSpaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSpaceMode::Auto => f.write_str("auto"),
            ColorSpaceMode::Gamma => f.write_str("gamma"),
            ColorSpaceMode::Linear => f.write_str("linear"),
        }
    }
}

/// Adapter selection hint passed to wgpu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuPowerPreference {
    Low,
    #[default]
    High,
}

impl std::fmt::Display for GpuPowerPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuPowerPreference::Low => f.write_str("low"),
            GpuPowerPreference::High => f.write_str("high"),
        }
    }
}

/// Immutable configuration passed to the renderer at start-up.
///
/// Built by the binary from CLI flags layered over the config file.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in logical pixels.
    pub window_size: (u32, u32),
    pub title: String,
    /// Where the six selectable images live.
    pub catalog: ImageCatalog,
    /// Image shown before any number key is pressed.
    pub initial_image: ImageSlot,
    /// Optional GLSL file replacing the built-in vertex stage.
    pub vertex_shader: Option<PathBuf>,
    /// Optional GLSL file replacing the built-in fragment stage.
    pub fragment_shader: Option<PathBuf>,
    pub controller: ControllerOptions,
    pub color_space: ColorSpaceMode,
    pub gpu_power: GpuPowerPreference,
}

impl Default for RendererConfig {
    /// A square 1025×1025 window reading the stock images from the working
    /// directory.
    fn default() -> Self {
        Self {
            window_size: (1025, 1025),
            title: "filterview".to_string(),
            catalog: ImageCatalog::default(),
            initial_image: ImageSlot::default(),
            vertex_shader: None,
            fragment_shader: None,
            controller: ControllerOptions::default(),
            color_space: ColorSpaceMode::default(),
            gpu_power: GpuPowerPreference::default(),
        }
    }
}
