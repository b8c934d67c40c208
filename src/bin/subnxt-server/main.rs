use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info};
use uuid::Uuid;

mod metrics;

use subnxt::{Error, Opts, Subtitler, TaskMode, WhisperBackend};

#[derive(Parser, Debug)]
#[command(name = "subnxt-server")]
#[command(about = "HTTP server that turns uploaded audio into WebVTT subtitles")]
struct Params {
    /// Path to a whisper.cpp model file (e.g. `ggml-base.bin`).
    #[arg(short = 'm', long = "model", required = true)]
    model_path: String,

    /// Host interface to bind to.
    #[arg(long = "host", default_value = "127.0.0.1")]
    host: String,

    /// TCP port to listen on.
    #[arg(long = "port", default_value_t = 8080)]
    port: u16,

    /// Maximum request body size (bytes).
    #[arg(long = "max-bytes", default_value_t = 100 * 1024 * 1024)]
    max_bytes: usize,
}

#[derive(Clone)]
struct AppState {
    subtitler: Arc<Subtitler<WhisperBackend>>,
}

#[derive(Debug, Deserialize)]
struct SubtitleQuery {
    #[serde(default)]
    task: Option<TaskMode>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    model_path: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let status = match err {
            // The uploaded bytes were not audio we can decode.
            Error::InvalidAudio(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            // The upload never made it to disk in a readable state.
            Error::FileNotFound(_) => StatusCode::BAD_REQUEST,
            Error::Format(_) | Error::Transcription(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[tokio::main]
async fn main() {
    subnxt::logging::init();

    if let Err(err) = run().await {
        error!(error = ?err, "subnxt-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let params = Params::parse();

    metrics::init();

    let addr: SocketAddr = format!("{}:{}", params.host, params.port)
        .parse()
        .context("invalid host/port bind address")?;

    let subtitler =
        Subtitler::new(&params.model_path).context("failed to initialize Whisper backend")?;

    let state = AppState {
        subtitler: Arc::new(subtitler),
    };

    let app = Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/v1/models", get(models))
        .route("/v1/subtitles", post(subtitles))
        .route_layer(from_fn(metrics::track_http_metrics))
        .with_state(state)
        .layer(DefaultBodyLimit::max(params.max_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        );

    let listener = TcpListener::bind(addr).await.context("bind failed")?;
    info!(%addr, "listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn root() -> &'static str {
    "subnxt-server: POST /v1/subtitles (multipart field: file)"
}

async fn healthz() -> &'static str {
    "ok"
}

async fn models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        model_path: state.subtitler.backend().model_path().to_owned(),
    })
}

async fn subtitles(
    State(state): State<AppState>,
    Query(query): Query<SubtitleQuery>,
    multipart: Multipart,
) -> std::result::Result<Response, AppError> {
    let upload = read_upload(multipart).await?;

    let opts = Opts {
        task: query.task.unwrap_or_default(),
        language: query.language,
    };

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        bytes = upload.len(),
        task = ?opts.task,
        "processing upload"
    );

    // Whisper inference is seconds-to-minutes of CPU work; keep it off the
    // async request path.
    let subtitler = state.subtitler.clone();
    let started = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || transcribe_upload(&subtitler, &upload, &opts))
        .await
        .map_err(|_| AppError::internal("transcription worker panicked"))?;
    metrics::observe_transcription(started.elapsed(), result.is_ok());
    let doc = result?;

    Ok(([(header::CONTENT_TYPE, vtt_content_type())], doc).into_response())
}

/// Pull the uploaded file bytes out of the multipart form.
///
/// We only recognize the `file` field; anything else is ignored so HTML forms
/// can carry extra inputs without breaking the endpoint.
async fn read_upload(mut multipart: Multipart) -> std::result::Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(format!("failed to read upload: {err}")))?;

        if bytes.is_empty() {
            return Err(AppError::bad_request("uploaded file was empty"));
        }

        return Ok(bytes.to_vec());
    }

    Err(AppError::bad_request(
        "multipart form is missing a 'file' field",
    ))
}

/// Persist the upload to a temp file and run the subtitler against it.
///
/// The temp file is removed when `tmp` drops, success or failure.
fn transcribe_upload(
    subtitler: &Subtitler<WhisperBackend>,
    upload: &[u8],
    opts: &Opts,
) -> std::result::Result<String, AppError> {
    let write_and_generate = || -> subnxt::Result<String> {
        let mut tmp = tempfile::Builder::new()
            .prefix("subnxt-upload-")
            .suffix(".wav")
            .tempfile()?;
        tmp.write_all(upload)?;
        tmp.flush()?;

        subtitler.subtitles(tmp.path(), opts)
    };

    write_and_generate().map_err(AppError::from)
}

fn vtt_content_type() -> HeaderValue {
    HeaderValue::from_static("text/vtt; charset=utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use subnxt::vtt::VTT_MIME;

    #[test]
    fn task_mode_deserializes_lowercase() {
        let task: TaskMode = serde_json::from_str("\"translate\"").unwrap();
        assert_eq!(task, TaskMode::Translate);

        let task: TaskMode = serde_json::from_str("\"transcribe\"").unwrap();
        assert_eq!(task, TaskMode::Transcribe);
    }

    #[test]
    fn vtt_content_type_matches_mime() {
        let value = vtt_content_type();
        let value = value.to_str().unwrap();
        assert!(value.starts_with(VTT_MIME));
    }

    #[test]
    fn app_error_maps_invalid_audio_to_415() {
        let err = AppError::from(Error::InvalidAudio("not a wav".into()));
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn app_error_maps_transcription_failure_to_500() {
        let err = AppError::from(Error::Transcription("model exploded".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn app_error_maps_missing_file_to_400() {
        let err = AppError::from(Error::FileNotFound("/tmp/x.wav".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
