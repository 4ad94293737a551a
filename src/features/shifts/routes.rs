use axum::{routing::get, Router};

use crate::features::shifts::handler;

/// Create routes for the shift catalog
pub fn routes() -> Router {
    Router::new().route("/api/shifts", get(handler::list_shifts))
}
