use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;
use crate::modules::storage::PhotoStore;

/// Create routes for the reports feature
///
/// The collection route carries its own body limit so photo uploads are
/// not capped by the default 2 MB multipart ceiling.
pub fn routes(
    report_service: Arc<ReportService>,
    photo_store: Arc<PhotoStore>,
    max_body_size: usize,
) -> Router {
    let state = ReportState {
        report_service,
        photo_store,
    };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports)
                .post(handlers::create_report)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/api/reports/{id}", delete(handlers::delete_report))
        .with_state(state)
}
