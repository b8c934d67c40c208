//! WebVTT document assembly.
//!
//! This is the one format we own end to end: given an ordered slice of
//! [`Segment`]s we produce a byte-exact WebVTT document. The contract is
//! deliberately narrow:
//! - one cue block per input segment, in input order, nothing dropped or merged
//! - the whole document is assembled in memory (subtitle files are tiny
//!   relative to the media they describe, so a streaming contract buys nothing)
//! - invalid timing fails up front with [`FormatError`], before any output
//!   exists

use std::io::Write;

use crate::error::FormatError;
use crate::segment::Segment;

/// MIME type for serving WebVTT documents.
pub const VTT_MIME: &str = "text/vtt";

/// File extension for WebVTT documents.
pub const VTT_EXTENSION: &str = "vtt";

/// Format seconds into a WebVTT timestamp (`HH:MM:SS.mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond and let the rounding carry upward,
///   so `59.9996` becomes `00:01:00.000` rather than the malformed
///   `00:00:60.000` or a silently truncated value.
///
/// Hours are zero-padded to two digits but never wrap; inputs beyond 100
/// hours simply use more digits.
pub fn format_timestamp(seconds: f64) -> Result<String, FormatError> {
    if !seconds.is_finite() {
        return Err(FormatError::NonFinite(seconds));
    }
    if seconds < 0.0 {
        return Err(FormatError::Negative(seconds));
    }

    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    Ok(format!("{h:02}:{m:02}:{s:02}.{ms:03}"))
}

/// Render a single cue block: timing line, trimmed text line, no trailing
/// blank line (the assembler owns cue separation).
///
/// Cue text is passed through verbatim apart from trimming; we do not escape
/// WebVTT-reserved sequences (`&`, `<`, `-->`).
pub fn render_cue(segment: &Segment) -> Result<String, FormatError> {
    segment.validate()?;

    let start = format_timestamp(segment.start_seconds)?;
    let end = format_timestamp(segment.end_seconds)?;

    Ok(format!("{start} --> {end}\n{}\n", segment.text.trim()))
}

/// Assemble a complete WebVTT document from an ordered slice of segments.
///
/// The output begins with `WEBVTT\n\n` and contains one cue block per input
/// segment, each followed by one blank line. An empty slice yields exactly
/// `"WEBVTT\n\n"`, the minimal valid document.
pub fn build_vtt(segments: &[Segment]) -> Result<String, FormatError> {
    // Validate everything before emitting anything, so an invalid segment in
    // the middle of the sequence never leaves behind a partial document.
    for segment in segments {
        segment.validate()?;
    }

    let mut doc = String::from("WEBVTT\n\n");
    for segment in segments {
        doc.push_str(&render_cue(segment)?);
        doc.push('\n');
    }

    Ok(doc)
}

/// Assemble a document and write it to an `io::Write` sink.
///
/// Convenience for callers that stream into files or HTTP response buffers.
pub fn write_vtt<W: Write>(mut w: W, segments: &[Segment]) -> crate::Result<()> {
    let doc = build_vtt(segments)?;
    w.write_all(doc.as_bytes())?;
    w.flush()?;
    Ok(())
}
