pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::optimizer::handlers;
use crate::render::handlers::handle_render;
use crate::state::AppState;

/// Room for multipart boundaries and the job-description field on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Optimizer API
        .route(
            "/api/v1/resumes/optimize",
            post(handlers::handle_optimize_upload),
        )
        .route(
            "/api/v1/resumes/optimize-text",
            post(handlers::handle_optimize_text),
        )
        .route("/api/v1/resumes/score", post(handlers::handle_score))
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        // Render API
        .route("/api/v1/resumes/render", post(handle_render))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
