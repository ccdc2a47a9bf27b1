//! Recording to animation conversion.
//!
//! parse -> accumulate -> weight -> render -> encode, all in one pass over
//! the input and entirely in memory.

use std::fs::{self, File};
use std::io::{BufRead, BufWriter};
use std::path::{Path, PathBuf};

use crate::asciicast::{self, Header};
use crate::encoder::{EncodeError, Encoder, EncoderExt, GifEncoder};
use crate::error::ConvertError;
use crate::frames::{self, FrameSequence, TimingPolicy};
use crate::render::{RenderStyle, Renderer, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

/// Parameters of one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub policy: TimingPolicy,
    /// Style template; width and height are derived from the recording.
    pub style: RenderStyle,
    pub max_width: u32,
    pub max_height: u32,
    pub looping: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            policy: TimingPolicy::default(),
            style: RenderStyle::default(),
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            looping: true,
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    /// Distinct snapshots rendered
    pub frame_count: usize,
    /// Frames written to the animation, repeats included
    pub entry_count: usize,
    pub duration_ms: u64,
    pub bytes_written: u64,
}

pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Read a recording and build its frame sequence without rendering.
    pub fn frames_from_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(Header, FrameSequence), ConvertError> {
        let recording = asciicast::open(reader)?;
        let frames = frames::build(recording.events, self.options.policy)?;

        Ok((recording.header, frames))
    }

    /// Render style for a recording with the given header.
    pub fn style_for(&self, header: &Header) -> RenderStyle {
        self.options.style.clone().fit_terminal(
            header.width,
            header.height,
            self.options.max_width,
            self.options.max_height,
        )
    }

    /// Render `frames` and feed them to `encoder`. Returns the number of
    /// encoded frames.
    pub fn encode(
        &self,
        header: &Header,
        frames: &FrameSequence,
        encoder: &mut dyn Encoder,
    ) -> Result<usize, EncodeError> {
        let renderer = Renderer::new(self.style_for(header));
        tracing::debug!(face = %renderer.face().describe(), "renderer ready");

        encoder.encode_sequence(frames, &renderer)
    }

    /// Convert the recording at `input` into a GIF at `output`.
    ///
    /// The input is fully parsed before the output file is created, so a
    /// malformed recording never leaves a partial file behind.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        let recording = asciicast::open_path(input)?;
        let header = recording.header.clone();

        tracing::info!(
            input = %input.display(),
            title = header.title.as_deref().unwrap_or(""),
            cols = header.width,
            rows = header.height,
            "converting recording"
        );

        let frames = frames::build(recording.events, self.options.policy)?;

        let file = File::create(output).map_err(|e| ConvertError::encoding(output, e))?;

        let result = self.write_gif(&header, &frames, file);
        let (entry_count, bytes_written) = match result {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(output);
                return Err(ConvertError::encoding(output, e));
            }
        };

        tracing::info!(
            output = %output.display(),
            frames = frames.len(),
            entries = entry_count,
            bytes = bytes_written,
            "conversion finished"
        );

        Ok(ConversionReport {
            output: output.to_path_buf(),
            frame_count: frames.len(),
            entry_count,
            duration_ms: frames.total_duration_ms(),
            bytes_written,
        })
    }

    fn write_gif(
        &self,
        header: &Header,
        frames: &FrameSequence,
        file: File,
    ) -> Result<(usize, u64), EncodeError> {
        let mut writer = BufWriter::new(file);

        let entry_count = {
            let mut encoder = GifEncoder::new(&mut writer, self.options.looping)?;
            self.encode(header, frames, &mut encoder)?
        };

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        let bytes_written = file.metadata()?.len();

        Ok((entry_count, bytes_written))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}
