use std::path::PathBuf;

use clap::{Parser, Subcommand};
use renderer::{ColorSpaceMode, GpuPowerPreference};
use viewstate::ImageSlot;

#[derive(Parser, Debug)]
#[command(
    name = "filterview",
    author,
    version,
    about = "Interactive GPU image filter viewer",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Configuration file; defaults to `filterview.toml` in the config directory.
    #[arg(long, value_name = "PATH", env = "FILTERVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the six selectable images.
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    /// Image shown at start-up: a slot number (1-6) or name (e.g. `mandrill`).
    #[arg(long, value_name = "SLOT", value_parser = parse_slot)]
    pub image: Option<ImageSlot>,

    /// Initial window size in logical pixels (e.g. `1025x1025`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Output color space handling: `auto`, `gamma`, or `linear`.
    #[arg(long, value_name = "MODE", value_parser = parse_color_space)]
    pub color_space: Option<ColorSpaceMode>,

    /// GPU adapter preference: `high` or `low`.
    #[arg(long, value_name = "POWER", value_parser = parse_power)]
    pub power: Option<GpuPowerPreference>,

    /// GLSL file replacing the built-in vertex shader.
    #[arg(long, value_name = "PATH")]
    pub vertex_shader: Option<PathBuf>,

    /// GLSL file replacing the built-in fragment shader.
    #[arg(long, value_name = "PATH")]
    pub fragment_shader: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the keyboard and mouse bindings.
    Keys,
    /// Print the resolved configuration directory and file.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 1025x1025".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width.trim()))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height.trim()))?;

    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".to_string());
    }

    Ok((width, height))
}

pub fn parse_slot(value: &str) -> Result<ImageSlot, String> {
    value.parse().map_err(|err: viewstate::ParseSlotError| err.to_string())
}

pub fn parse_color_space(value: &str) -> Result<ColorSpaceMode, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("color space must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" => Ok(ColorSpaceMode::Auto),
        "gamma" | "srgb-off" => Ok(ColorSpaceMode::Gamma),
        "linear" | "srgb" => Ok(ColorSpaceMode::Linear),
        other => Err(format!(
            "unknown color space '{other}'; expected auto, gamma, or linear"
        )),
    }
}

pub fn parse_power(value: &str) -> Result<GpuPowerPreference, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "high" | "high-performance" | "discrete" => Ok(GpuPowerPreference::High),
        "low" | "low-power" | "integrated" => Ok(GpuPowerPreference::Low),
        other => Err(format!("unknown power preference '{other}'; expected high or low")),
    }
}
