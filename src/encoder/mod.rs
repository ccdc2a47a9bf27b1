//! Animation encoders.
//!
//! The converter only talks to the [`Encoder`] trait, so frame production
//! can be exercised with an in-memory encoder in tests.

mod gif;

use image::RgbaImage;

use crate::frames::FrameSequence;
use crate::render::Renderer;

pub use gif::GifEncoder;

pub type EncodeError = Box<dyn std::error::Error + Send + Sync>;

/// Sink for rendered frames, written in display order.
pub trait Encoder {
    fn frame(&mut self, image: &RgbaImage, duration_ms: u32) -> Result<(), EncodeError>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<(), EncodeError> {
        Ok(())
    }
}

pub trait EncoderExt {
    /// Render every snapshot once and hand it to the encoder `repeat`
    /// times. Returns the number of encoded frames.
    fn encode_sequence(
        &mut self,
        frames: &FrameSequence,
        renderer: &Renderer,
    ) -> Result<usize, EncodeError>;
}

impl<E: Encoder + ?Sized> EncoderExt for E {
    fn encode_sequence(
        &mut self,
        frames: &FrameSequence,
        renderer: &Renderer,
    ) -> Result<usize, EncodeError> {
        let mut count = 0;

        for frame in frames.frames() {
            let image = renderer.render(&frame.text);

            for _ in 0..frame.repeat {
                self.frame(&image, frame.duration_ms)?;
                count += 1;
            }
        }

        self.finish()?;

        Ok(count)
    }
}
