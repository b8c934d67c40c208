//! Built-in [`crate::backend::Backend`] implementations.

mod whisper;

pub use whisper::WhisperBackend;
