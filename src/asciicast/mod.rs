//! asciicast recording reader
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v2/
//!
//! A recording is a header object on the first line followed by one event
//! array per line. Version 3 headers (`term.cols`/`term.rows`, interval
//! timestamps) are accepted as well; their event times are converted to
//! absolute seconds while reading so downstream code sees one time base.

mod events;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::error::ConvertError;

pub use events::Events;

/// Terminal size used when the header does not carry one.
pub const DEFAULT_COLS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 24;

/// How event timestamps are expressed in a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    /// Seconds since the start of the recording (v1/v2)
    Absolute,
    /// Seconds since the previous event (v3)
    Relative,
}

/// Recording header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version: Option<u8>,
    pub width: u16,
    pub height: u16,
    pub title: Option<String>,
    pub time_base: TimeBase,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: None,
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
            title: None,
            time_base: TimeBase::Absolute,
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    version: Option<u8>,
    width: Option<u16>,
    height: Option<u16>,
    term: Option<RawTerm>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct RawTerm {
    cols: Option<u16>,
    rows: Option<u16>,
}

/// Parse the header line of a recording.
pub fn parse_header(line: &str) -> Result<Header, ConvertError> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| ConvertError::parse(1, format!("invalid header JSON: {e}")))?;

    if !value.is_object() {
        return Err(ConvertError::parse(1, "header must be a JSON object"));
    }

    let raw: RawHeader = serde_json::from_value(value)
        .map_err(|e| ConvertError::parse(1, format!("invalid header: {e}")))?;

    let header = if raw.version == Some(3) {
        let term = raw.term.unwrap_or(RawTerm {
            cols: None,
            rows: None,
        });

        Header {
            version: raw.version,
            width: term.cols.unwrap_or(DEFAULT_COLS),
            height: term.rows.unwrap_or(DEFAULT_ROWS),
            title: raw.title,
            time_base: TimeBase::Relative,
        }
    } else {
        Header {
            version: raw.version,
            width: raw.width.unwrap_or(DEFAULT_COLS),
            height: raw.height.unwrap_or(DEFAULT_ROWS),
            title: raw.title,
            time_base: TimeBase::Absolute,
        }
    };

    Ok(header)
}

/// Event type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Output (data written to terminal), "o"
    Output,
    /// Anything else: input, marker, resize, exit, or an unknown code
    Other(char),
}

impl EventKind {
    /// Map an event code to a kind. Only the empty string is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();

        match chars.next()? {
            'o' if chars.next().is_none() => Some(EventKind::Output),
            c => Some(EventKind::Other(c)),
        }
    }
}

/// An event in a recording
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Seconds since the start of the recording
    pub time: f64,
    pub kind: EventKind,
    pub data: String,
}

impl Event {
    pub fn new(time: f64, kind: EventKind, data: impl Into<String>) -> Self {
        Self {
            time,
            kind,
            data: data.into(),
        }
    }

    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self::new(time, EventKind::Output, data)
    }

    pub fn is_output(&self) -> bool {
        self.kind == EventKind::Output
    }

    /// Parse an event from a JSON line.
    ///
    /// The returned time is exactly what the line carries; time base
    /// conversion happens in [`Events`].
    pub fn from_json(line: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| format!("invalid event JSON: {e}"))?;

        let arr = value.as_array().ok_or("event must be a JSON array")?;

        if arr.len() < 3 {
            return Err("event array must have at least 3 elements".to_string());
        }

        let time = arr[0].as_f64().ok_or("event time must be a number")?;
        let code = arr[1].as_str().ok_or("event type must be a string")?;
        let kind = EventKind::from_code(code).ok_or("event type must not be empty")?;
        let data = arr[2].as_str().ok_or("event data must be a string")?;

        Ok(Event::new(time, kind, data))
    }
}

/// An opened recording: parsed header plus a lazy event stream.
pub struct Recording<R> {
    pub header: Header,
    pub events: Events<R>,
}

/// Open a recording from a buffered reader, parsing the header eagerly.
pub fn open<R: BufRead>(reader: R) -> Result<Recording<R>, ConvertError> {
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| ConvertError::parse(1, "file is empty"))?
        .map_err(|e| ConvertError::parse(1, format!("failed to read header: {e}")))?;

    let header = parse_header(&header_line)?;
    let events = Events::new(lines, header.time_base);

    Ok(Recording { header, events })
}

/// Open a recording file.
pub fn open_path<P: AsRef<Path>>(
    path: P,
) -> Result<Recording<BufReader<fs::File>>, ConvertError> {
    let path = path.as_ref();
    let not_found = || ConvertError::InputNotFound {
        path: path.to_path_buf(),
    };

    if !path.is_file() {
        return Err(not_found());
    }

    let file = fs::File::open(path).map_err(|e| {
        tracing::debug!("failed to open {}: {e}", path.display());
        not_found()
    })?;

    open(BufReader::new(file))
}
