//! High-level API for turning media files into WebVTT subtitles.
//!
//! We expose a single, ergonomic entry point (`Subtitler`) that wires together
//! the lower-level pieces: a speech-recognition backend, the VTT formatter,
//! and the file sink.
//!
//! The intent is:
//! - We load the speech model once (expensive).
//! - We reuse it to subtitle multiple inputs.
//! - Callers choose task mode and language via `Opts`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::Backend;
use crate::backends::WhisperBackend;
use crate::error::Result;
use crate::opts::Opts;
use crate::sink::{vtt_path_for, write_vtt_file};
use crate::vtt::build_vtt;

/// The main high-level subtitle-generation entry point.
///
/// `Subtitler` owns the long-lived backend (loaded model + runtime state).
///
/// Typical usage:
/// - Construct once (model loading happens here).
/// - Call `subtitles` or `generate_to_file` many times with different inputs.
pub struct Subtitler<B: Backend = WhisperBackend> {
    backend: B,
}

impl Subtitler<WhisperBackend> {
    /// Create a new `Subtitler` using the built-in Whisper backend.
    ///
    /// We fail fast if the model path is missing or invalid, so once this
    /// succeeds every later call can assume a loaded model.
    pub fn new(model_path: impl Into<String>) -> Result<Self> {
        Ok(Self::with_backend(WhisperBackend::new(model_path)?))
    }
}

impl<B: Backend> Subtitler<B> {
    /// Create a new `Subtitler` using a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Transcribe `media` and return the complete WebVTT document as a string.
    pub fn subtitles(&self, media: &Path, opts: &Opts) -> Result<String> {
        let segments = self.backend.transcribe(media, opts)?;
        debug!(
            media = %media.display(),
            segments = segments.len(),
            "transcription complete"
        );

        Ok(build_vtt(&segments)?)
    }

    /// Transcribe `media` and write the WebVTT document to disk.
    ///
    /// When `output` is `None` we derive `<media stem>.vtt` next to the input.
    /// The document is fully assembled before the output file is created, so a
    /// failed transcription never leaves a partial `.vtt` behind.
    pub fn generate_to_file(
        &self,
        media: &Path,
        opts: &Opts,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let doc = self.subtitles(media, opts)?;

        let path = match output {
            Some(path) => path.to_owned(),
            None => vtt_path_for(media),
        };

        write_vtt_file(&path, &doc)?;
        info!(path = %path.display(), "subtitles saved");

        Ok(path)
    }

    /// Access the configured backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
