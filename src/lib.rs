//! cast2gif - turn asciinema recordings into animated GIFs
//!
//! The conversion is a single pass: events are parsed lazily, accumulated
//! into a rolling 30-line text buffer, weighted by the pause before each
//! event, rendered, and handed to an [`encoder::Encoder`].

pub mod asciicast;
pub mod cli;
pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod frames;
pub mod render;
pub mod terminal;

pub use config::Config;
pub use convert::{ConversionReport, ConvertOptions, Converter};
pub use error::ConvertError;
