use std::fs::File;
use std::io::BufReader;
use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::segment::Segment;
use crate::wav;

/// Built-in backend powered by `whisper-rs` / `whisper.cpp`.
///
/// The model is loaded once at construction (expensive) and reused across
/// transcriptions. Inference creates a fresh `WhisperState` per call, so a
/// single backend can serve independent requests.
pub struct WhisperBackend {
    ctx: WhisperContext,
    model_path: String,
}

impl std::fmt::Debug for WhisperBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperBackend")
            .field("model_path", &self.model_path)
            .finish_non_exhaustive()
    }
}

impl WhisperBackend {
    /// Load a whisper.cpp model (e.g. `ggml-base.bin`) from disk.
    pub fn new(model_path: impl Into<String>) -> Result<Self> {
        let model_path = model_path.into();
        if model_path.trim().is_empty() {
            return Err(Error::Transcription("model path must be provided".into()));
        }
        if !Path::new(&model_path).is_file() {
            return Err(Error::Transcription(format!(
                "model not found at '{model_path}'"
            )));
        }

        // We silence whisper.cpp's own logging so our binaries fully control
        // what gets printed.
        init_whisper_logging();

        let ctx_params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(&model_path, ctx_params).map_err(|err| {
            Error::Transcription(format!("failed to load model from '{model_path}': {err}"))
        })?;

        Ok(Self { ctx, model_path })
    }

    /// Access the configured model path.
    ///
    /// This is primarily intended for diagnostics and debugging.
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    fn run_full(&self, opts: &Opts, samples: &[f32]) -> Result<WhisperState> {
        let params = build_full_params(opts);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|err| Error::Transcription(format!("failed to create whisper state: {err}")))?;

        state
            .full(params, samples)
            .map_err(|err| Error::Transcription(format!("whisper inference failed: {err}")))?;

        Ok(state)
    }
}

impl Backend for WhisperBackend {
    fn transcribe(&self, media: &Path, opts: &Opts) -> Result<Vec<Segment>> {
        if !media.exists() {
            return Err(Error::FileNotFound(media.to_owned()));
        }

        let file = File::open(media)?;
        let (samples, _spec) = wav::read_samples(BufReader::new(file))?;
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let state = self.run_full(opts, &samples)?;

        let mut segments = Vec::new();
        for whisper_segment in state.as_iter() {
            let text = whisper_segment
                .to_str()
                .map_err(|err| Error::Transcription(format!("failed to get segment text: {err}")))?
                .to_owned();

            segments.push(Segment {
                start_seconds: centiseconds_to_seconds(whisper_segment.start_timestamp()),
                end_seconds: centiseconds_to_seconds(whisper_segment.end_timestamp()),
                text,
            });
        }

        Ok(segments)
    }
}

fn build_full_params(opts: &Opts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(opts.task.translate_to_english());
    params.set_language(opts.language.as_deref());
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params
}

/// Whisper timestamps arrive as centiseconds; negative means "unknown".
fn centiseconds_to_seconds(value: i64) -> f64 {
    if value < 0 { 0.0 } else { value as f64 / 100.0 }
}

/// A no-op log callback used to silence logs emitted by whisper.cpp.
unsafe extern "C" fn whisper_log_callback(
    _level: u32,
    _c_msg: *const c_char,
    _user_data: *mut c_void,
) {
    // Intentionally left empty.
}

/// Ensure whisper logging is configured exactly once for the lifetime of the process.
fn init_whisper_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
    });
}
