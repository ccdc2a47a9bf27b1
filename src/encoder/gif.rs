use std::io::Write;

use image::codecs::gif::{self, Repeat};
use image::{Delay, Frame, RgbaImage};

use super::{EncodeError, Encoder};

/// Color quantization speed passed to the GIF encoder (1 = best, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Writes frames as an animated GIF.
pub struct GifEncoder<W: Write> {
    inner: gif::GifEncoder<W>,
}

impl<W: Write> GifEncoder<W> {
    /// Create an encoder writing to `writer`. With `looping` the animation
    /// repeats forever, otherwise it plays once.
    pub fn new(writer: W, looping: bool) -> Result<Self, EncodeError> {
        let mut inner = gif::GifEncoder::new_with_speed(writer, QUANTIZE_SPEED);
        let repeat = if looping {
            Repeat::Infinite
        } else {
            Repeat::Finite(0)
        };
        inner.set_repeat(repeat)?;

        Ok(Self { inner })
    }
}

impl<W: Write> Encoder for GifEncoder<W> {
    fn frame(&mut self, image: &RgbaImage, duration_ms: u32) -> Result<(), EncodeError> {
        let delay = Delay::from_numer_denom_ms(duration_ms, 1);
        self.inner
            .encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;

        Ok(())
    }
}
