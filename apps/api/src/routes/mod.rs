pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/pdf", post(handlers::handle_pdf))
        .with_state(state)
}
