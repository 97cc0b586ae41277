use std::path::PathBuf;

use renderer::{ColorSpaceMode, GpuPowerPreference, RendererConfig};
use viewconfig::{ColorSpaceSetting, PowerSetting, ViewerConfig};
use viewstate::{ControllerOptions, ImageCatalog};

use crate::cli::RunArgs;

/// Layers CLI flags over the config file over built-in defaults.
pub fn renderer_config(args: &RunArgs, file: &ViewerConfig) -> RendererConfig {
    let defaults = RendererConfig::default();

    let directory = args
        .images
        .clone()
        .or_else(|| file.images.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let mut catalog = ImageCatalog::new(directory);
    for (slot, name) in file.file_overrides() {
        catalog.set_file(slot, name);
    }

    let window_size = args.size.unwrap_or((
        file.window.width.unwrap_or(defaults.window_size.0),
        file.window.height.unwrap_or(defaults.window_size.1),
    ));

    // Cursor normalisation must match the square region the quad is drawn in.
    let controller = ControllerOptions {
        logical_viewport: file
            .view
            .logical_viewport
            .unwrap_or(window_size.0.min(window_size.1) as f32),
    };

    RendererConfig {
        window_size,
        title: file.window.title.clone().unwrap_or(defaults.title),
        catalog,
        initial_image: args
            .image
            .or_else(|| file.initial_slot())
            .unwrap_or(defaults.initial_image),
        vertex_shader: args
            .vertex_shader
            .clone()
            .or_else(|| file.shaders.vertex.clone()),
        fragment_shader: args
            .fragment_shader
            .clone()
            .or_else(|| file.shaders.fragment.clone()),
        controller,
        color_space: args
            .color_space
            .or_else(|| file.gpu.color_space.map(map_color_space))
            .unwrap_or(defaults.color_space),
        gpu_power: args
            .power
            .or_else(|| file.gpu.power.map(map_power))
            .unwrap_or(defaults.gpu_power),
    }
}

fn map_color_space(setting: ColorSpaceSetting) -> ColorSpaceMode {
    match setting {
        ColorSpaceSetting::Auto => ColorSpaceMode::Auto,
        ColorSpaceSetting::Gamma => ColorSpaceMode::Gamma,
        ColorSpaceSetting::Linear => ColorSpaceMode::Linear,
    }
}

fn map_power(setting: PowerSetting) -> GpuPowerPreference {
    match setting {
        PowerSetting::High => GpuPowerPreference::High,
        PowerSetting::Low => GpuPowerPreference::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use viewstate::ImageSlot;

    const FILE: &str = r#"
[window]
width = 640
height = 480
title = "lab"

[images]
directory = "/data/images"
initial = "aerial"

[images.files]
mandrill = "baboon.png"

[view]
logical_viewport = 512.0

[gpu]
power = "low"
color_space = "linear"
"#;

    #[test]
    fn defaults_without_config_or_flags() {
        let config = renderer_config(&RunArgs::default(), &ViewerConfig::default());
        assert_eq!(config.window_size, (1025, 1025));
        assert_eq!(config.title, "filterview");
        assert_eq!(config.initial_image, ImageSlot::Test);
        assert_eq!(config.catalog.path(ImageSlot::Test), Path::new("./test.jpg"));
        assert!(config.vertex_shader.is_none());
        assert!((config.controller.logical_viewport - 1025.0).abs() < 1e-6);
    }

    #[test]
    fn config_file_values_apply() {
        let file = ViewerConfig::from_toml_str(FILE).expect("parse config");
        let config = renderer_config(&RunArgs::default(), &file);
        assert_eq!(config.window_size, (640, 480));
        assert_eq!(config.title, "lab");
        assert_eq!(config.initial_image, ImageSlot::Aerial);
        assert_eq!(
            config.catalog.path(ImageSlot::Mandrill),
            Path::new("/data/images/baboon.png")
        );
        assert_eq!(
            config.catalog.path(ImageSlot::Thirsk),
            Path::new("/data/images/thirsk.jpg")
        );
        assert_eq!(config.color_space, ColorSpaceMode::Linear);
        assert_eq!(config.gpu_power, GpuPowerPreference::Low);
        assert!((config.controller.logical_viewport - 512.0).abs() < 1e-6);
    }

    #[test]
    fn viewport_follows_window_size_unless_configured() {
        let args = RunArgs {
            size: Some((640, 480)),
            ..RunArgs::default()
        };
        let config = renderer_config(&args, &ViewerConfig::default());
        assert_eq!(config.window_size, (640, 480));
        assert!((config.controller.logical_viewport - 480.0).abs() < 1e-6);

        let file = ViewerConfig::from_toml_str("[window]\nwidth = 300\nheight = 900")
            .expect("parse config");
        let config = renderer_config(&RunArgs::default(), &file);
        assert!((config.controller.logical_viewport - 300.0).abs() < 1e-6);

        let file = ViewerConfig::from_toml_str(FILE).expect("parse config");
        let config = renderer_config(&args, &file);
        assert!((config.controller.logical_viewport - 512.0).abs() < 1e-6);
    }

    #[test]
    fn flags_override_config_file() {
        let file = ViewerConfig::from_toml_str(FILE).expect("parse config");
        let args = RunArgs {
            images: Some(PathBuf::from("/elsewhere")),
            image: Some(ImageSlot::Pattern),
            size: Some((300, 200)),
            color_space: Some(ColorSpaceMode::Gamma),
            power: Some(GpuPowerPreference::High),
            fragment_shader: Some(PathBuf::from("custom.frag")),
            ..RunArgs::default()
        };
        let config = renderer_config(&args, &file);
        assert_eq!(config.window_size, (300, 200));
        assert_eq!(config.initial_image, ImageSlot::Pattern);
        assert_eq!(
            config.catalog.path(ImageSlot::Mandrill),
            Path::new("/elsewhere/baboon.png")
        );
        assert_eq!(config.color_space, ColorSpaceMode::Gamma);
        assert_eq!(config.gpu_power, GpuPowerPreference::High);
        assert_eq!(config.fragment_shader.as_deref(), Some(Path::new("custom.frag")));
    }
}
