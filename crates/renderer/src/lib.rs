//! Renderer crate for filterview.
//!
//! Glues a `winit` window, a `wgpu` pipeline and the [`viewstate`] controller
//! together. The overall flow is:
//!
//! ```text
//!   filterview binary
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop
//!                          │                 │ key / scroll / cursor / button
//!                          │                 ▼
//!                          │          ViewController ──▶ Effect (load image, rebuild quad, close)
//!                          │                 │ dirty slots
//!                          ▼                 ▼
//!                      GpuState ◀── push_parameters() ──▶ uniform buffer byte ranges
//! ```
//!
//! `WindowState` owns all GPU resources (surface, device, pipeline, texture,
//! quad). The built-in GLSL shaders are compiled through wgpu's naga
//! frontend; either stage can be replaced by a file on disk.

mod compile;
mod error;
mod gpu;
mod keys;
mod types;
mod window;

pub use error::{ResourceKind, ShaderStageKind, ViewerError};
pub use types::{ColorSpaceMode, GpuPowerPreference, RendererConfig};

/// Thin entry point holding the start-up configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the viewer window and blocks until it is closed.
    ///
    /// Window, event loop and device failures come back as
    /// [`ViewerError::PlatformInit`]; shader problems at start-up as
    /// [`ViewerError::Compile`] or [`ViewerError::Link`].
    pub fn run(&mut self) -> Result<(), ViewerError> {
        tracing::info!(
            images = %self.config.catalog.directory().display(),
            initial = %self.config.initial_image,
            color_space = %self.config.color_space,
            gpu_power = %self.config.gpu_power,
            "starting viewer"
        );
        window::run(&self.config)
    }
}
