use once_cell::sync::Lazy;
use regex::Regex;

use crate::render::OutputFormat;

// @module: Video identifier extraction and download filenames

// @const: URL shapes that carry a video id
static VIDEO_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/)([^&?#/\s]+)",
        r"youtube\.com/(?:embed|shorts|live)/([^&?#/\s]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("video URL pattern is valid"))
    .collect()
});

// @const: Bare 11-character id
static BARE_VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern is valid")
});

/// Extract the video id from a watch/short/embed URL or a bare id
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for pattern in VIDEO_URL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(input) {
            let id = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    if BARE_VIDEO_ID.is_match(input) {
        return Some(input.to_string());
    }

    None
}

/// `transcript_{video_id}.{ext}`
pub fn transcript_filename(video_id: &str, format: OutputFormat) -> String {
    format!("transcript_{}.{}", video_id, format.extension())
}
