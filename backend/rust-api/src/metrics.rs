use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

use crate::models::OperationKind;

pub const OUTCOME_PARSED: &str = "parsed";
pub const OUTCOME_FALLBACK: &str = "fallback";
pub const OUTCOME_VALIDATION_ERROR: &str = "validation_error";
pub const OUTCOME_UPSTREAM_ERROR: &str = "upstream_error";

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();

    // Pipeline Metrics
    pub static ref ASSISTANT_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assistant_operations_total",
        "Assistant transactions by operation kind and outcome",
        &["kind", "outcome"]
    )
    .unwrap();

    pub static ref COMPLETION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "completion_duration_seconds",
        "Round trip time of completion backend calls",
        &["kind", "status"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 60.0]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

pub fn record_operation(kind: OperationKind, outcome: &str) {
    ASSISTANT_OPERATIONS_TOTAL
        .with_label_values(&[kind.as_str(), outcome])
        .inc();
}

/// Helper: time a completion call, labelled by operation kind and result
pub async fn track_completion<F, T, E>(kind: OperationKind, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    COMPLETION_DURATION_SECONDS
        .with_label_values(&[kind.as_str(), status])
        .observe(duration);

    result
}
