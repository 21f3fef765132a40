/*!
 * Tests for segment parsing, validation and end-time inference
 */

use tubescript::errors::{ParseError, RenderError};
use tubescript::segment::{end_time, end_times, parse_segments, Segment, DEFAULT_LAST_DURATION, MAX_OFFSET_SECONDS};
use crate::common;

#[test]
fn test_parse_segments_withSampleJson_shouldPreserveOrderAndFields() {
    let segments = parse_segments(common::SAMPLE_SEGMENTS_JSON).unwrap();

    assert_eq!(segments, common::sample_segments());
    assert_eq!(segments[0].duration, Some(2.5));
    assert_eq!(segments[1].speaker(), Some("Alice"));
    assert_eq!(segments[2].speaker(), None);
}

#[test]
fn test_parse_segments_withUnsortedStarts_shouldNotReorder() {
    let segments = parse_segments(r#"[{"start": 10, "text": "later"}, {"start": 2, "text": "earlier"}]"#).unwrap();

    assert_eq!(segments[0].text, "later");
    assert_eq!(segments[1].text, "earlier");
}

#[test]
fn test_parse_segments_withEmptyArray_shouldReturnEmpty() {
    assert!(parse_segments("[]").unwrap().is_empty());
}

#[test]
fn test_parse_segments_withInvalidJson_shouldReturnInvalidJson() {
    let result = parse_segments("[{\"start\": 1,");
    assert!(matches!(result, Err(ParseError::InvalidJson(_))));
}

#[test]
fn test_parse_segments_withObjectPayload_shouldReturnNotAnArray() {
    let result = parse_segments(r#"{"start": 1, "text": "x"}"#);
    assert_eq!(result, Err(ParseError::NotAnArray));
}

#[test]
fn test_parse_segments_withScalarElement_shouldReturnNotAnObject() {
    let result = parse_segments(r#"[{"start": 0, "text": "ok"}, 42]"#);
    assert_eq!(result, Err(ParseError::NotAnObject { index: 1 }));
}

#[test]
fn test_parse_segments_withMissingStart_shouldReportField() {
    let result = parse_segments(r#"[{"text": "no start"}]"#);
    assert_eq!(result, Err(ParseError::MissingField { index: 0, field: "start" }));
}

#[test]
fn test_parse_segments_withMissingText_shouldReportField() {
    let result = parse_segments(r#"[{"start": 0, "text": "a"}, {"start": 1}]"#);
    assert_eq!(result, Err(ParseError::MissingField { index: 1, field: "text" }));
}

#[test]
fn test_parse_segments_withNonNumericStart_shouldFailInsteadOfDefaulting() {
    let result = parse_segments(r#"[{"start": "12.5", "text": "x"}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { index: 0, field: "start", .. })));
}

#[test]
fn test_parse_segments_withNegativeStart_shouldFail() {
    let result = parse_segments(r#"[{"start": -1, "text": "x"}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { field: "start", .. })));
}

#[test]
fn test_parse_segments_withNonStringText_shouldFail() {
    let result = parse_segments(r#"[{"start": 0, "text": 17}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { field: "text", .. })));
}

#[test]
fn test_parse_segments_withBlankText_shouldFail() {
    let result = parse_segments(r#"[{"start": 0, "text": "   "}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { field: "text", .. })));
}

#[test]
fn test_parse_segments_withBadDuration_shouldFail() {
    let result = parse_segments(r#"[{"start": 0, "text": "x", "duration": "long"}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { field: "duration", .. })));
}

#[test]
fn test_parse_segments_withNullOptionalFields_shouldTreatAsAbsent() {
    let segments = parse_segments(r#"[{"start": 1, "text": "x", "duration": null, "speaker_id": null}]"#).unwrap();

    assert_eq!(segments[0].duration, None);
    assert_eq!(segments[0].speaker_id, None);
}

#[test]
fn test_parse_segments_withBlankSpeaker_shouldDropIt() {
    let segments = parse_segments(r#"[{"start": 1, "text": "x", "speaker_id": "  "}]"#).unwrap();
    assert_eq!(segments[0].speaker_id, None);
}

#[test]
fn test_parse_segments_withNumericSpeaker_shouldFail() {
    let result = parse_segments(r#"[{"start": 1, "text": "x", "speaker_id": 3}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { field: "speaker_id", .. })));
}

#[test]
fn test_parse_segments_withUnknownKeys_shouldIgnoreThem() {
    let segments = parse_segments(r#"[{"start": 1, "text": "x", "lang": "en", "confidence": 0.9}]"#).unwrap();
    assert_eq!(segments.len(), 1);
}

#[test]
fn test_end_times_withThreeSegments_shouldUseNextStartAndDefault() {
    let segments = vec![
        Segment::new(0.0, "one"),
        Segment::new(5.0, "two"),
        Segment::new(12.0, "three"),
    ];

    assert_eq!(end_time(&segments, 0), Some(5.0));
    assert_eq!(end_time(&segments, 1), Some(12.0));
    assert_eq!(end_time(&segments, 2), Some(15.0));
    assert_eq!(end_times(&segments), vec![5.0, 12.0, 15.0]);
}

#[test]
fn test_end_time_withDurationOnInnerSegment_shouldStillUseNextStart() {
    let segments = vec![
        Segment::new(0.0, "one").with_duration(1.0),
        Segment::new(5.0, "two"),
    ];

    assert_eq!(end_time(&segments, 0), Some(5.0));
}

#[test]
fn test_end_time_withSingleSegment_shouldUseDurationOrDefault() {
    let with_duration = vec![Segment::new(4.0, "x").with_duration(2.0)];
    let without_duration = vec![Segment::new(4.0, "x")];

    assert_eq!(end_time(&with_duration, 0), Some(6.0));
    assert_eq!(end_time(&without_duration, 0), Some(4.0 + DEFAULT_LAST_DURATION));
}

#[test]
fn test_end_time_withIndexPastEnd_shouldReturnNone() {
    let segments = vec![Segment::new(0.0, "one")];

    assert_eq!(end_time(&segments, 1), None);
    assert_eq!(end_time(&[], 0), None);
    assert!(end_times(&[]).is_empty());
}

#[test]
fn test_parse_segments_withHugeStart_shouldFail() {
    let result = parse_segments(r#"[{"start": 1e300, "text": "x"}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { index: 0, field: "start", .. })));

    let result = parse_segments(r#"[{"start": 1, "text": "x", "duration": 1e20}]"#);
    assert!(matches!(result, Err(ParseError::InvalidField { index: 0, field: "duration", .. })));
}

#[test]
fn test_parse_segments_withStartAtLimit_shouldRenderFiniteTimestamp() {
    let raw = format!(r#"[{{"start": {}, "text": "x"}}]"#, MAX_OFFSET_SECONDS);
    let segments = parse_segments(&raw).unwrap();
    let srt = tubescript::render::subtitle::render_srt(&segments);

    assert!(srt.contains("277777:46:40,000 --> "));
    assert!(!srt.contains("18446744073709551615"));
}

#[test]
fn test_validate_withHandBuiltBadSegments_shouldReportField() {
    assert_eq!(
        Segment::new(-1.0, "x").validate(3),
        Err(RenderError::MalformedSegment { index: 3, field: "start" })
    );
    assert_eq!(
        Segment::new(f64::NAN, "x").validate(0),
        Err(RenderError::MalformedSegment { index: 0, field: "start" })
    );
    assert_eq!(
        Segment::new(1e300, "x").validate(0),
        Err(RenderError::MalformedSegment { index: 0, field: "start" })
    );
    assert_eq!(
        Segment::new(0.0, "").validate(1),
        Err(RenderError::MalformedSegment { index: 1, field: "text" })
    );
    assert_eq!(
        Segment::new(0.0, "x").with_duration(f64::INFINITY).validate(2),
        Err(RenderError::MalformedSegment { index: 2, field: "duration" })
    );
    assert!(Segment::new(0.0, "x").validate(0).is_ok());
}

#[test]
fn test_segment_serialization_shouldSkipAbsentOptionalFields() {
    let json = serde_json::to_string(&Segment::new(1.5, "hi")).unwrap();
    assert_eq!(json, r#"{"start":1.5,"text":"hi"}"#);
}
