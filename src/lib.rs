//! `subnxt` — generate WebVTT subtitles from speech.
//!
//! This crate provides:
//! - A byte-exact WebVTT formatter for timed transcription segments
//! - A pluggable speech-recognition seam with a built-in Whisper backend
//! - File and HTTP-friendly sinks for the produced documents
//!
//! The library is designed to be used by both CLI tools and long-running
//! services, with an emphasis on clarity and minimal surprises: the formatter
//! is a pure transformation, and everything slow or fallible (model loading,
//! inference, disk I/O) sits behind explicit seams.

// High-level API (most consumers should start here).
pub mod opts;
pub mod subtitler;

// Segment data structures and task selection.
pub mod segment;
pub mod task;

// WebVTT formatting (the core transformation).
pub mod vtt;

// Speech-recognition seam and built-in backends.
pub mod backend;
pub mod backends;

// Audio input and document output.
pub mod sink;
pub mod wav;

// Error taxonomy.
pub mod error;

// Logging configuration (binaries only).
#[cfg(feature = "logging")]
pub mod logging;

pub use backend::Backend;
pub use backends::WhisperBackend;
pub use error::{Error, FormatError, Result};
pub use opts::Opts;
pub use segment::Segment;
pub use subtitler::Subtitler;
pub use task::TaskMode;
