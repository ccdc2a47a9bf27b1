//! Lazy event stream over the lines following the header.

use std::io::{BufRead, Lines};

use super::{Event, TimeBase};
use crate::error::ConvertError;

/// Iterator over the events of a recording.
///
/// Yields events in file order with absolute timestamps. The first
/// malformed line produces a [`ConvertError::Parse`] carrying its 1-based
/// line number, after which the stream ends.
pub struct Events<R> {
    lines: Lines<R>,
    line_num: usize,
    time_base: TimeBase,
    clock: f64,
    done: bool,
}

impl<R: BufRead> Events<R> {
    pub(super) fn new(lines: Lines<R>, time_base: TimeBase) -> Self {
        Self {
            lines,
            // the header occupied line 1
            line_num: 1,
            time_base,
            clock: 0.0,
            done: false,
        }
    }

    fn absolute(&mut self, time: f64) -> f64 {
        match self.time_base {
            TimeBase::Absolute => time,
            TimeBase::Relative => {
                self.clock += time;
                self.clock
            }
        }
    }

    fn fail(&mut self, message: String) -> Option<Result<Event, ConvertError>> {
        self.done = true;
        Some(Err(ConvertError::parse(self.line_num, message)))
    }
}

impl<R: BufRead> Iterator for Events<R> {
    type Item = Result<Event, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => return self.fail(format!("failed to read line: {e}")),
            };

            if line.trim().is_empty() {
                continue;
            }

            return match Event::from_json(&line) {
                Ok(mut event) => {
                    event.time = self.absolute(event.time);
                    Some(Ok(event))
                }
                Err(message) => self.fail(message),
            };
        }
    }
}
