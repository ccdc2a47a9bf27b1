//! Playback timing: how long each output event stays on screen.

use crate::error::ConvertError;

/// Target frame rate used when none is configured.
pub const DEFAULT_FPS: u32 = 5;

/// Highest accepted frame rate. GIF delays have centisecond resolution,
/// so a base frame must last at least 10 ms.
pub const MAX_FPS: u32 = 100;

/// Multiplier applied both to the event gap and to the per-frame duration.
pub const STRETCH_FACTOR: u32 = 3;

/// Upper bound on how many times one snapshot is repeated.
pub const MAX_REPEAT: u32 = 5;

/// Maps gaps between events to repeat counts and frame durations.
///
/// Every output event is shown for at least one frame; longer pauses are
/// stretched proportionally up to [`MAX_REPEAT`] frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPolicy {
    frame_duration_ms: u32,
}

impl TimingPolicy {
    /// Build a policy for the given target frame rate (1..=[`MAX_FPS`]).
    pub fn from_fps(fps: u32) -> Result<Self, ConvertError> {
        if fps == 0 || fps > MAX_FPS {
            return Err(ConvertError::Config(format!(
                "fps must be between 1 and {MAX_FPS} (got {fps})"
            )));
        }

        Ok(Self {
            frame_duration_ms: 1000 / fps,
        })
    }

    /// Base duration of one frame at the target frame rate.
    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Duration of each repeated frame emitted for an output event.
    pub fn event_duration_ms(&self) -> u32 {
        self.frame_duration_ms * STRETCH_FACTOR
    }

    /// `clamp(round(delta * 3), 1, 5)`; NaN and negative gaps count as 1.
    pub fn repeat_count(&self, delta_secs: f64) -> u32 {
        if delta_secs.is_nan() {
            return 1;
        }

        (delta_secs * STRETCH_FACTOR as f64)
            .round()
            .clamp(1.0, MAX_REPEAT as f64) as u32
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            frame_duration_ms: 1000 / DEFAULT_FPS,
        }
    }
}
