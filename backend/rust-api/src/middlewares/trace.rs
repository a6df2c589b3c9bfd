use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Tags every request with a trace id (taken from `x-trace-id` or generated)
/// and echoes it back on the response.
///
/// Must sit outside the `TraceLayer` so that [`request_span`] sees the id.
pub async fn trace_context_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = ensure_trace_id(&mut request);

    let mut response = next.run(request).await;

    response
        .headers_mut()
        .insert(HeaderName::from_static(TRACE_ID_HEADER), trace_id);

    response
}

/// Span for `TraceLayer::make_span_with`, carrying the request's trace id.
pub fn request_span(request: &Request) -> Span {
    let trace_id = request
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        trace_id = %trace_id,
        method = %request.method(),
        uri = %request.uri()
    )
}

fn ensure_trace_id(request: &mut Request) -> HeaderValue {
    let incoming = request
        .headers()
        .get(TRACE_ID_HEADER)
        .filter(|value| value.to_str().is_ok_and(|text| !text.is_empty()))
        .cloned();

    let trace_id = incoming.unwrap_or_else(|| {
        // A hyphenated UUID is always a valid header value
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
    });

    request
        .headers_mut()
        .insert(HeaderName::from_static(TRACE_ID_HEADER), trace_id.clone());
    trace_id
}
