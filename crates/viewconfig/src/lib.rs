use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use viewstate::ImageSlot;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSetting {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpaceSetting {
    Auto,
    Gamma,
    Linear,
}

/// Contents of `filterview.toml`. Every section is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewerConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub images: ImagesSection,
    #[serde(default)]
    pub shaders: ShadersSection,
    #[serde(default)]
    pub view: ViewSection,
    #[serde(default)]
    pub gpu: GpuSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WindowSection {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ImagesSection {
    pub directory: Option<PathBuf>,
    /// Slot name or number (`"mandrill"`, `"2"`).
    pub initial: Option<String>,
    /// Per-slot file name overrides keyed by slot name.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShadersSection {
    pub vertex: Option<PathBuf>,
    pub fragment: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewSection {
    pub logical_viewport: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GpuSection {
    pub power: Option<PowerSetting>,
    pub color_space: Option<ColorSpaceSetting>,
}

fn default_version() -> u32 {
    1
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowSection::default(),
            images: ImagesSection::default(),
            shaders: ShadersSection::default(),
            view: ViewSection::default(),
            gpu: GpuSection::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ViewerConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Reads and validates `path`. Relative image and shader paths are
    /// resolved against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Like [`ViewerConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if self.window.width == Some(0) || self.window.height == Some(0) {
            return Err(ConfigError::Invalid(
                "window width and height must be greater than zero".into(),
            ));
        }

        if let Some(viewport) = self.view.logical_viewport {
            if !viewport.is_finite() || viewport <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "view.logical_viewport must be a positive number, got {viewport}"
                )));
            }
        }

        if let Some(initial) = &self.images.initial {
            initial
                .parse::<ImageSlot>()
                .map_err(|err| ConfigError::Invalid(format!("images.initial: {err}")))?;
        }

        for (name, file) in &self.images.files {
            let slot = name
                .parse::<ImageSlot>()
                .map_err(|err| ConfigError::Invalid(format!("images.files: {err}")))?;
            if file.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "images.files.{} must not be empty",
                    slot.name()
                )));
            }
        }

        Ok(())
    }

    pub fn initial_slot(&self) -> Option<ImageSlot> {
        self.images
            .initial
            .as_deref()
            .and_then(|raw| raw.parse().ok())
    }

    /// File overrides in slot order.
    pub fn file_overrides(&self) -> Vec<(ImageSlot, &str)> {
        let mut overrides: Vec<(ImageSlot, &str)> = self
            .images
            .files
            .iter()
            .filter_map(|(name, file)| Some((name.parse().ok()?, file.as_str())))
            .collect();
        overrides.sort_by_key(|(slot, _)| slot.number());
        overrides
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.images.directory,
            &mut self.shaders.vertex,
            &mut self.shaders.fragment,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1

[window]
width = 800
height = 600
title = "lab 3"

[images]
directory = "/srv/images"
initial = "mandrill"

[images.files]
mandrill = "baboon.png"
"6" = "checker.png"

[shaders]
fragment = "/srv/shaders/fragment.glsl"

[view]
logical_viewport = 512.0

[gpu]
power = "low"
color_space = "linear"
"#;

    #[test]
    fn parses_sample_config() {
        let config = ViewerConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.window.width, Some(800));
        assert_eq!(config.window.title.as_deref(), Some("lab 3"));
        assert_eq!(config.initial_slot(), Some(ImageSlot::Mandrill));
        assert_eq!(config.gpu.power, Some(PowerSetting::Low));
        assert_eq!(config.gpu.color_space, Some(ColorSpaceSetting::Linear));
        assert_eq!(config.view.logical_viewport, Some(512.0));
        assert_eq!(
            config.file_overrides(),
            vec![
                (ImageSlot::Mandrill, "baboon.png"),
                (ImageSlot::Pattern, "checker.png")
            ]
        );
        assert!(config.shaders.vertex.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ViewerConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.initial_slot(), None);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = ViewerConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_window_size() {
        let err = ViewerConfig::from_toml_str("[window]\nwidth = 0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn rejects_bad_viewport() {
        for value in ["0.0", "-3.0", "nan", "inf"] {
            let input = format!("[view]\nlogical_viewport = {value}");
            let err = ViewerConfig::from_toml_str(&input).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{value} accepted");
        }
    }

    #[test]
    fn rejects_unknown_slots() {
        let err = ViewerConfig::from_toml_str("[images]\ninitial = \"lena\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ViewerConfig::from_toml_str("[images.files]\nlena = \"lena.png\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ViewerConfig::from_toml_str("[images.files]\ntest = \"  \"").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let err = ViewerConfig::from_toml_str("[gpu]\npower = \"turbo\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
