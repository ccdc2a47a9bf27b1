//! Frame sequence construction.
//!
//! Turns the event stream into an ordered list of text snapshots, each
//! weighted by how long the recording paused before it.

mod timing;

use crate::asciicast::Event;
use crate::error::ConvertError;
use crate::terminal::TerminalBuffer;

pub use timing::{TimingPolicy, DEFAULT_FPS, MAX_FPS, MAX_REPEAT, STRETCH_FACTOR};

/// One snapshot of the terminal buffer.
///
/// An encoder renders `text` once and shows it `repeat` times, each for
/// `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub repeat: u32,
    pub duration_ms: u32,
}

impl Frame {
    /// Total time this snapshot is on screen.
    pub fn total_duration_ms(&self) -> u64 {
        self.repeat as u64 * self.duration_ms as u64
    }
}

/// Ordered frames of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Expanded `(frame index, duration ms)` pairs, one per repeat.
    pub fn entries(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.frames.iter().enumerate().flat_map(|(index, frame)| {
            std::iter::repeat(frame.duration_ms)
                .take(frame.repeat as usize)
                .map(move |duration| (index, duration))
        })
    }

    pub fn entry_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat as usize).sum()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(Frame::total_duration_ms).sum()
    }
}

/// Accumulates events into a [`FrameSequence`].
#[derive(Debug)]
pub struct FrameBuilder {
    buffer: TerminalBuffer,
    policy: TimingPolicy,
    last_time: f64,
    frames: Vec<Frame>,
}

impl FrameBuilder {
    pub fn new(policy: TimingPolicy) -> Self {
        Self::with_buffer(policy, TerminalBuffer::new())
    }

    pub fn with_buffer(policy: TimingPolicy, buffer: TerminalBuffer) -> Self {
        Self {
            buffer,
            policy,
            last_time: 0.0,
            frames: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &TerminalBuffer {
        &self.buffer
    }

    /// Feed one event. The gap is measured against the previous event of
    /// any kind, but only output events produce a frame.
    pub fn push(&mut self, event: &Event) {
        let delta = event.time - self.last_time;
        self.last_time = event.time;

        if !event.is_output() {
            return;
        }

        self.buffer.push_output(&event.data);

        let frame = Frame {
            text: self.buffer.text(),
            repeat: self.policy.repeat_count(delta),
            duration_ms: self.policy.event_duration_ms(),
        };

        tracing::debug!(
            index = self.frames.len(),
            time = event.time,
            delta,
            repeat = frame.repeat,
            "frame"
        );

        self.frames.push(frame);
    }

    /// Finish the run. A stream without output still yields one frame of
    /// the (possibly empty) buffer, shown for a single base duration.
    pub fn finish(mut self) -> FrameSequence {
        if self.frames.is_empty() {
            self.frames.push(Frame {
                text: self.buffer.text(),
                repeat: 1,
                duration_ms: self.policy.frame_duration_ms(),
            });
        }

        FrameSequence {
            frames: self.frames,
        }
    }
}

/// Build a frame sequence from an event stream, stopping at the first error.
pub fn build<I>(events: I, policy: TimingPolicy) -> Result<FrameSequence, ConvertError>
where
    I: IntoIterator<Item = Result<Event, ConvertError>>,
{
    let mut builder = FrameBuilder::new(policy);

    for event in events {
        builder.push(&event?);
    }

    Ok(builder.finish())
}
