use super::{SharedPolicy, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{IntoMakeService, get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_router(policy: SharedPolicy, max_request_body_bytes: usize) -> Router {
    Router::new()
        // Service information
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Validation endpoints
        .route("/validar-imagen", post(handlers::validate_image))
        .route("/validar-imagen-url", post(handlers::validate_image_url))
        // Uploads are buffered in memory, so cap the request body
        .layer(DefaultBodyLimit::max(max_request_body_bytes))
        // Called cross-origin from the gallery frontend and backend, with credentials
        .layer(CorsLayer::very_permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        .with_state(policy)
}

pub fn create_app(
    policy: SharedPolicy,
    max_request_body_bytes: usize,
) -> IntoMakeService<Router<()>> {
    create_router(policy, max_request_body_bytes).into_make_service()
}
