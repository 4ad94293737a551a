use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::cleanup::handlers::{self, CleanupState};
use crate::features::cleanup::services::CleanupService;

/// Create routes for the cleanup feature
pub fn routes(cleanup_service: Arc<CleanupService>) -> Router {
    let state = CleanupState { cleanup_service };

    Router::new()
        .route("/api/cleanup/run", get(handlers::run_cleanup))
        .route("/api/cleanup/status", get(handlers::cleanup_status))
        .with_state(state)
}
