// @module: Timestamp encodings shared by the renderers
//
// All components are floored from seconds. The clock form used by the
// document formats never wraps minutes into hours, so a long video shows
// e.g. `125:30`; SRT and VTT always carry an hour field.

/// Components of a subtitle timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl TimeParts {
    // @param seconds: Non-negative offset in seconds
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = seconds.max(0.0);
        TimeParts {
            hours: (seconds / 3600.0).floor() as u64,
            minutes: ((seconds % 3600.0) / 60.0).floor() as u64,
            seconds: (seconds % 60.0).floor() as u64,
            millis: ((seconds * 1000.0) % 1000.0).floor() as u64,
        }
    }
}

/// `MM:SS` with unbounded minutes
pub fn format_clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

/// SRT timestamp `HH:MM:SS,mmm`
pub fn format_srt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, ',')
}

/// WebVTT timestamp `HH:MM:SS.mmm`
pub fn format_vtt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, '.')
}

fn format_timestamp(seconds: f64, ms_sep: char) -> String {
    let t = TimeParts::from_seconds(seconds);
    format!("{:02}:{:02}:{:02}{}{:03}", t.hours, t.minutes, t.seconds, ms_sep, t.millis)
}
