use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::cleanup::dtos::{CleanupRunResponseDto, CleanupStatusDto};
use crate::features::cleanup::services::CleanupService;
use crate::shared::types::ApiResponse;

/// State for cleanup handlers
#[derive(Clone)]
pub struct CleanupState {
    pub cleanup_service: Arc<CleanupService>,
}

/// Run a retention sweep now instead of waiting for the timer
#[utoipa::path(
    get,
    path = "/api/cleanup/run",
    tag = "cleanup",
    responses(
        (status = 200, description = "Sweep finished", body = ApiResponse<CleanupRunResponseDto>)
    )
)]
pub async fn run_cleanup(
    State(state): State<CleanupState>,
) -> Result<Json<ApiResponse<CleanupRunResponseDto>>> {
    let outcome = state.cleanup_service.sweep().await?;

    Ok(Json(ApiResponse::success(
        Some(outcome.into()),
        Some("Cleanup complete".to_string()),
        None,
    )))
}

/// Current retention settings and backlog
#[utoipa::path(
    get,
    path = "/api/cleanup/status",
    tag = "cleanup",
    responses(
        (status = 200, description = "Retention status", body = ApiResponse<CleanupStatusDto>)
    )
)]
pub async fn cleanup_status(
    State(state): State<CleanupState>,
) -> Result<Json<ApiResponse<CleanupStatusDto>>> {
    let status = state.cleanup_service.status().await?;

    Ok(Json(ApiResponse::success(Some(status.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use sqlx::SqlitePool;

    use super::*;
    use crate::core::config::CleanupConfig;
    use crate::features::cleanup::routes;
    use crate::features::reports::models::CreateReport;
    use crate::features::reports::services::ReportService;
    use crate::shared::clock::ManualClock;
    use crate::shared::test_helpers::{create_test_photo_store, create_test_pool};

    async fn test_server(dir: &std::path::Path) -> (SqlitePool, Arc<ReportService>, TestServer) {
        let pool = create_test_pool().await;
        let report_service = Arc::new(ReportService::new(pool.clone()));
        let photo_store = Arc::new(create_test_photo_store(dir));
        let clock = Arc::new(ManualClock::at(Utc::now()));
        let cleanup_service = Arc::new(CleanupService::new(
            report_service.clone(),
            photo_store,
            clock,
            CleanupConfig {
                retention_hours: 24,
                sweep_interval_hours: 6,
            },
        ));
        let server = TestServer::new(routes::routes(cleanup_service)).unwrap();
        (pool, report_service, server)
    }

    async fn seed_expired_report(pool: &SqlitePool, reports: &ReportService) {
        let report = reports
            .create(CreateReport {
                shift: 1,
                author: "jo".to_string(),
                body: "stale entry".to_string(),
                photos: vec![],
            })
            .await
            .unwrap();
        let created_at = Utc::now() - Duration::hours(25);
        sqlx::query("UPDATE reports SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(report.id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn run_endpoint_sweeps_expired_reports() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, server) = test_server(dir.path()).await;
        seed_expired_report(&pool, &reports).await;

        let response = server.get("/api/cleanup/run").await;
        response.assert_status_ok();

        let body: ApiResponse<CleanupRunResponseDto> = response.json();
        assert!(body.success);
        let outcome = body.data.unwrap();
        assert_eq!(outcome.reports_deleted, 1);
        assert_eq!(outcome.photos_deleted, 0);

        assert!(reports.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_endpoint_reflects_the_backlog() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, server) = test_server(dir.path()).await;
        seed_expired_report(&pool, &reports).await;
        reports
            .create(CreateReport {
                shift: 2,
                author: "sam".to_string(),
                body: "fresh entry".to_string(),
                photos: vec![],
            })
            .await
            .unwrap();

        let response = server.get("/api/cleanup/status").await;
        response.assert_status_ok();

        let body: ApiResponse<CleanupStatusDto> = response.json();
        let status = body.data.unwrap();
        assert_eq!(status.retention_hours, 24);
        assert_eq!(status.sweep_interval_hours, 6);
        assert_eq!(status.total_reports, 2);
        assert_eq!(status.expired_reports, 1);
        assert_eq!(status.active_reports, 1);

        // After a sweep only the fresh report is left
        server.get("/api/cleanup/run").await.assert_status_ok();
        let body: ApiResponse<CleanupStatusDto> =
            server.get("/api/cleanup/status").await.json();
        let status = body.data.unwrap();
        assert_eq!(status.total_reports, 1);
        assert_eq!(status.expired_reports, 0);
        assert_eq!(status.active_reports, 1);
    }
}
