//! Command line interface definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;
use crate::frames::MAX_FPS;

#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("CAST2GIF_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CAST2GIF_BUILD_DATE"),
    ")"
);

/// Convert an asciinema recording into a looping animated GIF
#[derive(Parser, Debug)]
#[command(name = "cast2gif", version = VERSION, about)]
#[command(long_about = "Convert an asciinema recording into a looping animated GIF.

Output is appended as plain text and the last 30 lines are drawn on each
frame. Pauses in the recording are stretched into repeated frames, capped
at five repeats per event.

Settings are read from the config file (see --config) and can be
overridden with the flags below.")]
pub struct Cli {
    /// Recording to convert (.cast)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the GIF
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Target frames per second (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_FPS as i64))]
    pub fps: Option<u32>,

    /// Font size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=512))]
    pub font_size: Option<u32>,

    /// TrueType font to try before the built-in search list
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Maximum image width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum image height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,

    /// Config file (default: <config dir>/cast2gif/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(fps) = self.fps {
            config.timing.fps = fps;
        }

        if let Some(size) = self.font_size {
            config.render.font_size = size;
        }

        if let Some(font) = &self.font {
            config.render.font_path = Some(font.clone());
        }

        if let Some(width) = self.max_width {
            config.render.max_width = width;
        }

        if let Some(height) = self.max_height {
            config.render.max_height = height;
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
