use std::fmt::Write;

use crate::render::timecode::{format_srt_timestamp, format_vtt_timestamp};
use crate::segment::{Segment, end_times};

// @module: SRT and WebVTT cue writers

/// SubRip: `index`, `start --> end`, text, blank line per segment
pub fn render_srt(segments: &[Segment]) -> String {
    let mut out = String::new();

    for ((i, seg), end) in segments.iter().enumerate().zip(end_times(segments)) {
        let _ = writeln!(out, "{}", i + 1);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_srt_timestamp(seg.start),
            format_srt_timestamp(end)
        );
        let _ = writeln!(out, "{}", cue_text(seg));
        out.push('\n');
    }

    out
}

/// WebVTT: header, then `start --> end`, text, blank line per segment
pub fn render_vtt(segments: &[Segment]) -> String {
    let mut out = String::from("WEBVTT\n\n");

    for (seg, end) in segments.iter().zip(end_times(segments)) {
        let _ = writeln!(
            out,
            "{} --> {}",
            format_vtt_timestamp(seg.start),
            format_vtt_timestamp(end)
        );
        let _ = writeln!(out, "{}", cue_text(seg));
        out.push('\n');
    }

    out
}

// Blank lines would end the cue early, so they are dropped.
fn cue_text(seg: &Segment) -> String {
    let body = seg
        .text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    match seg.speaker() {
        Some(speaker) => format!("{}: {}", speaker, body),
        None => body,
    }
}
