use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ParseError, RenderError};

// @module: Transcript segment model and end-time inference

// @const: Duration assumed for the last segment when none is given
pub const DEFAULT_LAST_DURATION: f64 = 3.0;

// @const: Largest accepted start or duration, about 31 years
pub const MAX_OFFSET_SECONDS: f64 = 1.0e9;

// @struct: Single timestamped transcript unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    // @field: Offset from video start in seconds
    pub start: f64,

    // @field: Raw caption text
    pub text: String,

    // @field: Optional duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    // @field: Optional inferred speaker label
    #[serde(default, alias = "speaker", skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
}

impl Segment {
    /// Creates a segment with no duration and no speaker
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Segment {
            start,
            text: text.into(),
            duration: None,
            speaker_id: None,
        }
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the speaker label
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker_id = Some(speaker.into());
        self
    }

    /// Speaker label if one is set and not blank
    pub fn speaker(&self) -> Option<&str> {
        self.speaker_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    // @validates: Fields a renderer depends on
    // @returns: MalformedSegment naming the first bad field
    pub fn validate(&self, index: usize) -> Result<(), RenderError> {
        if !in_range(self.start) {
            return Err(RenderError::MalformedSegment { index, field: "start" });
        }
        if self.text.trim().is_empty() {
            return Err(RenderError::MalformedSegment { index, field: "text" });
        }
        if let Some(duration) = self.duration {
            if !in_range(duration) {
                return Err(RenderError::MalformedSegment { index, field: "duration" });
            }
        }
        Ok(())
    }
}

fn in_range(seconds: f64) -> bool {
    seconds.is_finite() && (0.0..=MAX_OFFSET_SECONDS).contains(&seconds)
}

/// End time of the segment at `index`, `None` when there is no such segment.
///
/// Every segment but the last ends where the next one starts; the last one
/// ends `duration` (or [`DEFAULT_LAST_DURATION`]) seconds after its start.
/// Input order is trusted and overlaps are not checked.
pub fn end_time(segments: &[Segment], index: usize) -> Option<f64> {
    let seg = segments.get(index)?;
    Some(match segments.get(index + 1) {
        Some(next) => next.start,
        None => seg.start + seg.duration.unwrap_or(DEFAULT_LAST_DURATION),
    })
}

/// End times for every segment, in order
pub fn end_times(segments: &[Segment]) -> Vec<f64> {
    (0..segments.len()).filter_map(|i| end_time(segments, i)).collect()
}

/// Parse a JSON array of segment records.
///
/// `start` and `text` are required; `duration` and `speaker_id` (or its alias
/// `speaker`) are optional and may be `null`. Unknown keys are ignored.
pub fn parse_segments(raw_json: &str) -> Result<Vec<Segment>, ParseError> {
    let value: Value = serde_json::from_str(raw_json)
        .map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let records = value.as_array().ok_or(ParseError::NotAnArray)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let obj = record
                .as_object()
                .ok_or(ParseError::NotAnObject { index })?;
            parse_record(index, obj)
        })
        .collect()
}

fn parse_record(index: usize, obj: &Map<String, Value>) -> Result<Segment, ParseError> {
    let start = match obj.get("start") {
        None | Some(Value::Null) => return Err(ParseError::MissingField { index, field: "start" }),
        Some(v) => non_negative_number(index, "start", v)?,
    };

    let text = match obj.get("text") {
        None | Some(Value::Null) => return Err(ParseError::MissingField { index, field: "text" }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ParseError::InvalidField {
                index,
                field: "text",
                reason: "text is empty".to_string(),
            });
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(ParseError::InvalidField {
                index,
                field: "text",
                reason: format!("expected a string, found {}", json_type(other)),
            });
        }
    };

    let duration = match obj.get("duration") {
        None | Some(Value::Null) => None,
        Some(v) => Some(non_negative_number(index, "duration", v)?),
    };

    let speaker_value = obj
        .get("speaker_id")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("speaker").filter(|v| !v.is_null()));

    let speaker_id = match speaker_value {
        None => None,
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(other) => {
            return Err(ParseError::InvalidField {
                index,
                field: "speaker_id",
                reason: format!("expected a string, found {}", json_type(other)),
            });
        }
    };

    Ok(Segment {
        start,
        text,
        duration,
        speaker_id,
    })
}

fn non_negative_number(index: usize, field: &'static str, value: &Value) -> Result<f64, ParseError> {
    let number = value.as_f64().ok_or_else(|| ParseError::InvalidField {
        index,
        field,
        reason: format!("expected a number, found {}", json_type(value)),
    })?;

    if !number.is_finite() || number < 0.0 {
        return Err(ParseError::InvalidField {
            index,
            field,
            reason: format!("must be a non-negative number, got {}", number),
        });
    }

    if number > MAX_OFFSET_SECONDS {
        return Err(ParseError::InvalidField {
            index,
            field,
            reason: format!("must not exceed {} seconds, got {}", MAX_OFFSET_SECONDS, number),
        });
    }

    Ok(number)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
