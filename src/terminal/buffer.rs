use std::collections::VecDeque;

/// Default number of lines kept on screen.
pub const MAX_LINES: usize = 30;

/// Ordered lines of terminal text with FIFO eviction.
///
/// A fresh buffer holds one empty line, so `len()` is never zero and output
/// always has a trailing line to append to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalBuffer {
    lines: VecDeque<String>,
    limit: usize,
}

impl TerminalBuffer {
    pub fn new() -> Self {
        Self::with_line_limit(MAX_LINES)
    }

    /// Create a buffer keeping at most `limit` lines (minimum 1).
    pub fn with_line_limit(limit: usize) -> Self {
        let mut lines = VecDeque::with_capacity(limit.max(1) + 1);
        lines.push_back(String::new());

        Self {
            lines,
            limit: limit.max(1),
        }
    }

    /// Append output data to the trailing line, starting a new line at each `\n`.
    pub fn push_output(&mut self, data: &str) {
        let mut parts = data.split('\n');

        if let Some(first) = parts.next() {
            if let Some(last) = self.lines.back_mut() {
                last.push_str(first);
            }
        }

        for part in parts {
            self.lines.push_back(part.to_string());
        }

        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the buffer holds nothing but a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current content as one block of text, lines joined by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());

        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line);
        }

        text
    }
}

impl Default for TerminalBuffer {
    fn default() -> Self {
        Self::new()
    }
}
