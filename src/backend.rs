use std::path::Path;

use crate::error::Result;
use crate::opts::Opts;
use crate::segment::Segment;

/// Pluggable speech-recognition backend used by [`crate::Subtitler`].
///
/// A backend is responsible for turning a media file into the ordered
/// [`Segment`] sequence the formatter consumes. Everything behind this seam is
/// the backend's own concern: model selection, device placement, retries.
///
/// Contract:
/// - segments come back in chronological order of appearance
/// - a missing input file fails with [`crate::Error::FileNotFound`]
/// - model failures fail with [`crate::Error::Transcription`]
pub trait Backend {
    /// Transcribe (or translate) the speech in `media` according to `opts`.
    fn transcribe(&self, media: &Path, opts: &Opts) -> Result<Vec<Segment>>;
}
