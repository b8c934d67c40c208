use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use subnxt::{Opts, Subtitler, TaskMode};

#[derive(Parser, Debug)]
#[command(name = "subnxt")]
#[command(about = "Generate WebVTT subtitles from a media file")]
struct Params {
    /// Path to a whisper.cpp model file (e.g. `ggml-base.bin`).
    #[arg(short = 'm', long = "model")]
    model_path: String,

    /// Path to the input media file (mono 16 kHz WAV).
    #[arg(short = 'i', long = "input")]
    media_path: PathBuf,

    /// Transcribe verbatim or translate speech to English.
    #[arg(short = 't', long = "task", value_enum, default_value_t = TaskMode::Transcribe)]
    task: TaskMode,

    /// Optional language hint (e.g. `en`, `ja`); auto-detect when omitted.
    #[arg(short = 'l', long = "language")]
    language: Option<String>,

    /// Where to write the subtitles; `-` writes to stdout.
    /// Defaults to the input path with a `.vtt` extension.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    subnxt::logging::init();

    let params = Params::parse();
    let opts = Opts {
        task: params.task,
        language: params.language.clone(),
    };

    let subtitler = Subtitler::new(&params.model_path)?;

    // `-o -` streams the document to stdout instead of a file.
    if params.output.as_deref() == Some(std::path::Path::new("-")) {
        let doc = subtitler.subtitles(&params.media_path, &opts)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(doc.as_bytes())
            .and_then(|()| out.flush())
            .context("failed to write subtitles to stdout")?;
        return Ok(());
    }

    let saved = subtitler.generate_to_file(&params.media_path, &opts, params.output.as_deref())?;
    println!("Subtitles saved to {}", saved.display());

    Ok(())
}
