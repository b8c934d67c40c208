use std::sync::OnceLock;
use std::time::Duration;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts as PromOpts, Registry,
    TextEncoder,
};

struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_in_flight_requests: IntGauge,
    transcriptions_total: IntCounterVec,
    transcription_seconds: Histogram,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

fn metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            PromOpts::new(
                "subnxt_http_requests_total",
                "Total HTTP requests served by subnxt-server.",
            ),
            &["status"],
        )
        .expect("metrics definition must be valid");

        let http_in_flight_requests = IntGauge::new(
            "subnxt_http_in_flight_requests",
            "Current number of in-flight HTTP requests.",
        )
        .expect("metrics definition must be valid");

        let transcriptions_total = IntCounterVec::new(
            PromOpts::new(
                "subnxt_transcriptions_total",
                "Subtitle generation attempts, labeled by outcome.",
            ),
            &["outcome"],
        )
        .expect("metrics definition must be valid");

        // Whisper runs take seconds to minutes, so the default buckets
        // (capped at 10s) would lump everything into +Inf.
        let transcription_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "subnxt_transcription_seconds",
                "Wall-clock time spent generating one subtitle document.",
            )
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        )
        .expect("metrics definition must be valid");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metrics must register");
        registry
            .register(Box::new(http_in_flight_requests.clone()))
            .expect("metrics must register");
        registry
            .register(Box::new(transcriptions_total.clone()))
            .expect("metrics must register");
        registry
            .register(Box::new(transcription_seconds.clone()))
            .expect("metrics must register");

        Metrics {
            registry,
            http_requests_total,
            http_in_flight_requests,
            transcriptions_total,
            transcription_seconds,
        }
    })
}

pub fn init() {
    let _ = metrics();
}

/// Record the outcome and duration of one subtitle-generation attempt.
pub fn observe_transcription(elapsed: Duration, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics()
        .transcriptions_total
        .with_label_values(&[outcome])
        .inc();
    metrics()
        .transcription_seconds
        .observe(elapsed.as_secs_f64());
}

pub async fn prometheus_metrics() -> Response {
    let families = metrics().registry.gather();
    let mut buf = Vec::new();
    if TextEncoder::new().encode(&families, &mut buf).is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to encode metrics",
        )
            .into_response();
    }

    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
        )],
        buf,
    )
        .into_response()
}

pub async fn track_http_metrics(req: Request<Body>, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or_else(|| req.uri().path())
        .to_owned();

    if route == "/metrics" || route == "/healthz" {
        return next.run(req).await;
    }

    metrics().http_in_flight_requests.inc();
    let response = next.run(req).await;
    metrics().http_in_flight_requests.dec();

    let status = response.status().as_u16().to_string();
    metrics()
        .http_requests_total
        .with_label_values(&[&status])
        .inc();

    response
}
