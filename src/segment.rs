use serde::Serialize;

use crate::error::FormatError;

/// A single transcribed span of speech.
///
/// Segments arrive from a transcription backend in chronological order of
/// appearance. We treat that ordering as authoritative: nothing downstream
/// re-sorts, merges, or drops segments, and adjacent segments are allowed to
/// overlap or leave gaps.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Segment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Raw cue text. May carry leading/trailing whitespace from the model;
    /// the formatter trims it at render time.
    pub text: String,
}

impl Segment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text: text.into(),
        }
    }

    /// Check that this segment's timing can be encoded as WebVTT timestamps.
    ///
    /// Requirements:
    /// - both endpoints are finite
    /// - both endpoints are non-negative
    /// - `start_seconds <= end_seconds`
    pub fn validate(&self) -> std::result::Result<(), FormatError> {
        for value in [self.start_seconds, self.end_seconds] {
            if !value.is_finite() {
                return Err(FormatError::NonFinite(value));
            }
            if value < 0.0 {
                return Err(FormatError::Negative(value));
            }
        }

        if self.start_seconds > self.end_seconds {
            return Err(FormatError::ReversedRange {
                start: self.start_seconds,
                end: self.end_seconds,
            });
        }

        Ok(())
    }
}
