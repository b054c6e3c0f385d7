pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::posts::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Posts API
        .route("/api/v1/posts/options", get(handlers::handle_options))
        .route("/api/v1/posts/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/posts/generate/form",
            post(handlers::handle_generate_form).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .fallback(not_found)
        .with_state(state)
}
