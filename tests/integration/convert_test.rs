//! Library-level conversion tests against fixture recordings

use std::fs;
use std::io::{BufReader, Cursor};
use std::path::Path;

use cast2gif::frames::{FrameSequence, TimingPolicy};
use cast2gif::terminal::MAX_LINES;
use cast2gif::{ConvertError, ConvertOptions, Converter};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

use super::helpers::{fixtures_dir, load_fixture, temp_fixture};

fn frames_for(name: &str) -> FrameSequence {
    let converter = Converter::default();
    let (_, frames) = converter
        .frames_from_reader(load_fixture(name).as_bytes())
        .unwrap();
    frames
}

fn repeats(frames: &FrameSequence) -> Vec<u32> {
    frames.frames().iter().map(|f| f.repeat).collect()
}

#[test]
fn sample_ignores_input_and_marker_events() {
    let frames = frames_for("sample.cast");

    assert_eq!(frames.len(), 3);
    assert_eq!(repeats(&frames), vec![2, 1, 2]);
    assert_eq!(frames.frames()[2].text, "$ echo hello\r\nhello\r\n$ ");
}

#[test]
fn sample_header_carries_title() {
    let converter = Converter::default();
    let (header, _) = converter
        .frames_from_reader(load_fixture("sample.cast").as_bytes())
        .unwrap();

    assert_eq!(header.title.as_deref(), Some("demo"));
    assert_eq!((header.width, header.height), (80, 24));
}

#[test]
fn hello_gives_single_frame() {
    let frames = frames_for("hello.cast");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames.frames()[0].text, "hello\n");
    assert_eq!(frames.frames()[0].repeat, 1);
}

#[test]
fn header_only_gives_single_frame() {
    let frames = frames_for("header_only.cast");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames.frames()[0].text, "");
}

#[test]
fn overflow_keeps_last_thirty_lines() {
    let frames = frames_for("overflow.cast");
    let last = frames.frames().last().unwrap();
    let lines: Vec<&str> = last.text.split('\n').collect();

    assert_eq!(lines.len(), MAX_LINES);
    let expected: Vec<String> = (7..=35).map(|i| format!("line {i}")).collect();
    assert_eq!(&lines[..29], expected.as_slice());
    assert_eq!(lines[29], "");
}

#[test]
fn v3_recordings_use_interval_times() {
    let converter = Converter::default();
    let file = fs::File::open(fixtures_dir().join("v3.cast")).unwrap();
    let (header, frames) = converter.frames_from_reader(BufReader::new(file)).unwrap();

    assert_eq!((header.width, header.height), (100, 30));
    assert_eq!(repeats(&frames), vec![2, 3]);
}

#[test]
fn malformed_line_is_reported() {
    let converter = Converter::default();
    let err = converter
        .frames_from_reader(load_fixture("malformed.cast").as_bytes())
        .unwrap_err();

    assert!(matches!(err, ConvertError::Parse { line: 3, .. }), "{err}");
}

#[test]
fn converting_twice_gives_identical_output() {
    let (temp_dir, input) = temp_fixture("sample.cast");
    let first = temp_dir.path().join("first.gif");
    let second = temp_dir.path().join("second.gif");
    let converter = Converter::default();

    let a = converter.convert_file(&input, &first).unwrap();
    let b = converter.convert_file(&input, &second).unwrap();

    assert_eq!(a.entry_count, 5);
    assert_eq!(a.entry_count, b.entry_count);
    assert_eq!(a.duration_ms, b.duration_ms);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

/// Per-frame delays of a GIF on disk, in milliseconds
fn gif_delays_ms(path: &Path) -> Vec<u32> {
    let bytes = fs::read(path).unwrap();
    let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();

    decoder
        .into_frames()
        .collect_frames()
        .unwrap()
        .iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            numer / denom
        })
        .collect()
}

fn converter_at(fps: u32) -> Converter {
    Converter::new(ConvertOptions {
        policy: TimingPolicy::from_fps(fps).unwrap(),
        ..ConvertOptions::default()
    })
}

#[test]
fn written_delays_match_default_timing() {
    let (temp_dir, input) = temp_fixture("sample.cast");
    let output = temp_dir.path().join("sample.gif");

    converter_at(5).convert_file(&input, &output).unwrap();

    assert_eq!(gif_delays_ms(&output), vec![600; 5]);
}

#[test]
fn fastest_frame_rate_keeps_nonzero_delays() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("fast.gif");

    let report = converter_at(100).convert_file(&input, &output).unwrap();

    assert_eq!(report.duration_ms, 30);
    assert_eq!(gif_delays_ms(&output), vec![30]);
}

#[test]
fn directory_input_is_not_found() {
    let (temp_dir, _) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("out.gif");

    let err = Converter::default()
        .convert_file(temp_dir.path(), &output)
        .unwrap_err();

    assert!(matches!(err, ConvertError::InputNotFound { .. }), "{err}");
    assert!(!output.exists());
}
