use crate::render::{normalize_inline, timecode::format_clock};
use crate::segment::Segment;

// @module: Plain text transcript
//
// Lines are joined with `\n` and the document carries no trailing newline,
// so one segment renders to exactly `[01:05] hello`. Downloads from the older
// web tool ended every line, including the last, with `\n`.

/// Plain transcript: one `[MM:SS] text` line per segment.
///
/// Speaker labels are not shown in this format.
pub fn render_txt(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| format!("[{}] {}", format_clock(seg.start), normalize_inline(&seg.text)))
        .collect::<Vec<_>>()
        .join("\n")
}
