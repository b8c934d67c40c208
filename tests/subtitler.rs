use std::path::Path;

use subnxt::{Backend, Opts, Result, Segment, Subtitler, TaskMode};

/// A scripted backend so the pipeline can be exercised without model files.
struct ScriptedBackend;

impl Backend for ScriptedBackend {
    fn transcribe(&self, media: &Path, opts: &Opts) -> Result<Vec<Segment>> {
        if !media.exists() {
            return Err(subnxt::Error::FileNotFound(media.to_owned()));
        }

        // Mimic a translate run: same timing, English text.
        let text = match opts.task {
            TaskMode::Transcribe => " こんにちは ",
            TaskMode::Translate => " Hello ",
        };

        Ok(vec![
            Segment::new(0.0, 1.5, text),
            Segment::new(1.5, 4.25, "second line"),
        ])
    }
}

#[test]
fn end_to_end_document_is_byte_exact() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let media = dir.path().join("clip.wav");
    std::fs::write(&media, b"")?;

    let subtitler = Subtitler::with_backend(ScriptedBackend);
    let opts = Opts {
        task: TaskMode::Translate,
        language: None,
    };

    let doc = subtitler.subtitles(&media, &opts)?;
    assert_eq!(
        doc,
        "WEBVTT\n\n\
         00:00:00.000 --> 00:00:01.500\nHello\n\n\
         00:00:01.500 --> 00:00:04.250\nsecond line\n\n"
    );
    Ok(())
}

#[test]
fn generate_to_file_honors_explicit_output_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let media = dir.path().join("clip.wav");
    let output = dir.path().join("custom-name.vtt");
    std::fs::write(&media, b"")?;

    let subtitler = Subtitler::with_backend(ScriptedBackend);
    let saved = subtitler.generate_to_file(&media, &Opts::default(), Some(&output))?;

    assert_eq!(saved, output);
    let doc = std::fs::read_to_string(&saved)?;
    assert!(doc.starts_with("WEBVTT\n\n"));
    assert_eq!(doc.matches("-->").count(), 2);
    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let media = dir.path().join("clip.wav");
    std::fs::write(&media, b"")?;

    let subtitler = Subtitler::with_backend(ScriptedBackend);
    let opts = Opts::default();

    let first = subtitler.subtitles(&media, &opts)?;
    let second = subtitler.subtitles(&media, &opts)?;
    assert_eq!(first, second);
    Ok(())
}
