use subnxt::vtt::{build_vtt, format_timestamp};
use subnxt::{FormatError, Segment};

#[test]
fn timestamp_zero_is_all_zeros() {
    assert_eq!(format_timestamp(0.0).unwrap(), "00:00:00.000");
}

#[test]
fn timestamp_splits_hours_minutes_seconds_millis() {
    assert_eq!(format_timestamp(3661.5).unwrap(), "01:01:01.500");
}

#[test]
fn timestamp_millisecond_rounding_carries() {
    // We round to the nearest millisecond and carry at the 1000ms boundary.
    assert_eq!(format_timestamp(59.999).unwrap(), "00:00:59.999");
    assert_eq!(format_timestamp(59.9996).unwrap(), "00:01:00.000");
}

#[test]
fn empty_sequence_yields_minimal_document() {
    assert_eq!(build_vtt(&[]).unwrap(), "WEBVTT\n\n");
}

#[test]
fn single_segment_document_is_byte_exact() {
    let doc = build_vtt(&[Segment::new(0.0, 1.25, " Hi ")]).unwrap();
    assert_eq!(doc, "WEBVTT\n\n00:00:00.000 --> 00:00:01.250\nHi\n\n");
}

#[test]
fn cue_count_matches_segment_count() {
    let segments: Vec<Segment> = (0..50)
        .map(|i| Segment::new(i as f64, i as f64 + 0.5, format!("line {i}")))
        .collect();

    let doc = build_vtt(&segments).unwrap();
    assert_eq!(doc.matches("-->").count(), segments.len());
}

#[test]
fn output_is_deterministic() {
    let segments = [
        Segment::new(0.0, 2.0, "first"),
        Segment::new(1.5, 3.25, " overlapping "),
        Segment::new(90.0, 91.0, "after a gap"),
    ];

    let a = build_vtt(&segments).unwrap();
    let b = build_vtt(&segments).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_timing_is_rejected() {
    assert!(matches!(
        build_vtt(&[Segment::new(2.0, 1.0, "reversed")]),
        Err(FormatError::ReversedRange { .. })
    ));
    assert!(matches!(
        build_vtt(&[Segment::new(-1.0, 1.0, "negative")]),
        Err(FormatError::Negative(_))
    ));
    assert!(matches!(
        build_vtt(&[Segment::new(f64::NAN, 1.0, "nan")]),
        Err(FormatError::NonFinite(_))
    ));
}
