use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    response
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The UI is served from another origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        .nest("/api", operation_routes().layer(cors))
        .route_layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(middleware::from_fn(csp_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middlewares::trace::request_span))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
}

fn operation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/translate", post(handlers::operations::translate))
        .route("/generate", post(handlers::operations::generate))
        .route("/debug", post(handlers::operations::debug))
        .route("/quiz", post(handlers::operations::quiz))
}
