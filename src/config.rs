//! Configuration file support.
//!
//! Settings are read from `<config dir>/cast2gif/config.toml` when present.
//! Every field is optional; command line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::convert::ConvertOptions;
use crate::error::ConvertError;
use crate::frames::{TimingPolicy, DEFAULT_FPS};
use crate::render::{
    RenderStyle, DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE, DEFAULT_FOREGROUND, DEFAULT_MARGIN,
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub timing: TimingConfig,
}

/// `[render]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub font_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// `#rrggbb`
    pub background: String,
    /// `#rrggbb`
    pub foreground: String,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_path: None,
            background: format_hex_color(DEFAULT_BACKGROUND),
            foreground: format_hex_color(DEFAULT_FOREGROUND),
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

/// `[timing]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cast2gif").join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConvertError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        tracing::debug!("loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConvertError> {
        toml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Validate the settings and turn them into conversion options.
    pub fn options(&self) -> Result<ConvertOptions, ConvertError> {
        let render = &self.render;

        if render.font_size == 0 {
            return Err(ConvertError::Config("font_size must be positive".into()));
        }

        if render.max_width == 0 || render.max_height == 0 {
            return Err(ConvertError::Config(
                "max_width and max_height must be positive".into(),
            ));
        }

        let style = RenderStyle {
            font_size: render.font_size,
            margin: DEFAULT_MARGIN,
            background: color_setting("background", &render.background)?,
            foreground: color_setting("foreground", &render.foreground)?,
            font_path: render.font_path.clone(),
            ..RenderStyle::default()
        };

        Ok(ConvertOptions {
            policy: TimingPolicy::from_fps(self.timing.fps)?,
            style,
            max_width: render.max_width,
            max_height: render.max_height,
            looping: true,
        })
    }
}

fn color_setting(name: &str, value: &str) -> Result<Rgb<u8>, ConvertError> {
    parse_hex_color(value)
        .ok_or_else(|| ConvertError::Config(format!("{name} must be a #rrggbb color (got {value:?})")))
}

/// Parse a `#rrggbb` hex triplet.
pub fn parse_hex_color(rgb: &str) -> Option<Rgb<u8>> {
    if rgb.len() != 7 || !rgb.starts_with('#') {
        return None;
    }

    let r = u8::from_str_radix(rgb.get(1..3)?, 16).ok()?;
    let g = u8::from_str_radix(rgb.get(3..5)?, 16).ok()?;
    let b = u8::from_str_radix(rgb.get(5..7)?, 16).ok()?;

    Some(Rgb([r, g, b]))
}

pub fn format_hex_color(color: Rgb<u8>) -> String {
    let Rgb([r, g, b]) = color;
    format!("#{r:02x}{g:02x}{b:02x}")
}
