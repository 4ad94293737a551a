use axum::{routing::get, Router};

use crate::features::pages::handlers;

/// Create routes for the server-rendered pages
pub fn routes() -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/reports", get(handlers::reports_page))
}
