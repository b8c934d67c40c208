use std::path::PathBuf;

use thiserror::Error;

/// Subnxt's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Subnxt's crate-wide error type.
///
/// Each variant names a distinct failure domain so callers can react to the
/// kind of failure (retry, 4xx vs 5xx, user message) instead of string-matching
/// a catch-all.
#[derive(Debug, Error)]
pub enum Error {
    /// A segment carried timing values the formatter refuses to encode.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The input media file does not exist.
    #[error("media file not found: '{}'", .0.display())]
    FileNotFound(PathBuf),

    /// The input exists but could not be decoded as supported audio.
    #[error("unsupported or unreadable audio: {0}")]
    InvalidAudio(String),

    /// The speech-recognition backend failed to load a model or run inference.
    #[error("transcription failed: {0}")]
    Transcription(String),

    /// A sink failure (writing or serving the produced document).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rejection reasons for segment timing values.
///
/// The formatter never emits a malformed timestamp: invalid input fails here,
/// before any output is produced.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("timestamp is not a finite number: {0}")]
    NonFinite(f64),

    #[error("timestamp is negative: {0}")]
    Negative(f64),

    #[error("segment range is reversed: start {start} > end {end}")]
    ReversedRange { start: f64, end: f64 },
}
