use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::vtt::VTT_EXTENSION;

/// Derive the subtitle path for a media file: same directory, same stem,
/// `.vtt` extension (`clips/talk.wav` -> `clips/talk.vtt`).
pub fn vtt_path_for(media: &Path) -> PathBuf {
    media.with_extension(VTT_EXTENSION)
}

/// Write an assembled VTT document to `path`.
///
/// The document arrives fully built, so a failure here never leaves a
/// half-written subtitle file next to a good media file: either the write
/// succeeds or the caller gets the `io::Error` and the file holds whatever
/// single `fs::write` managed (typically nothing).
pub fn write_vtt_file(path: &Path, doc: &str) -> Result<()> {
    fs::write(path, doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vtt_path_replaces_extension() {
        assert_eq!(
            vtt_path_for(Path::new("clips/talk.wav")),
            PathBuf::from("clips/talk.vtt")
        );
        assert_eq!(vtt_path_for(Path::new("talk")), PathBuf::from("talk.vtt"));
    }

    #[test]
    fn write_vtt_file_round_trips() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.vtt");

        write_vtt_file(&path, "WEBVTT\n\n")?;
        assert_eq!(fs::read_to_string(&path)?, "WEBVTT\n\n");
        Ok(())
    }

    #[test]
    fn write_vtt_file_surfaces_io_errors() {
        let err = write_vtt_file(Path::new("/no/such/dir/out.vtt"), "WEBVTT\n\n").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
