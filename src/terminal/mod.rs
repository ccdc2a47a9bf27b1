//! Rolling text buffer fed by terminal output.
//!
//! This is deliberately not a terminal emulator: output is appended as
//! plain text, split on `\n`, and only the most recent lines are kept.
//! Escape sequences and carriage returns are stored verbatim.

mod buffer;

pub use buffer::{TerminalBuffer, MAX_LINES};
