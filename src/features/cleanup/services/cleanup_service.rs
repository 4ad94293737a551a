use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::config::CleanupConfig;
use crate::core::error::Result;
use crate::features::reports::services::ReportService;
use crate::modules::storage::PhotoStore;
use crate::shared::clock::Clock;

/// Counts from one retention sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub reports_deleted: u64,
    pub photos_deleted: u64,
}

/// Snapshot of the retention policy and its current backlog
#[derive(Debug, Clone)]
pub struct RetentionStatus {
    pub retention_hours: i64,
    pub sweep_interval_hours: u64,
    pub total_reports: i64,
    pub expired_reports: i64,
    pub active_reports: i64,
}

/// Service that enforces the retention window on stored reports
///
/// A sweep removes every report older than the retention window, photo
/// files first and database records second. A photo that cannot be
/// removed is logged and skipped; the report records are still deleted,
/// so the worst case is a stray file, never a record pointing nowhere.
pub struct CleanupService {
    report_service: Arc<ReportService>,
    photo_store: Arc<PhotoStore>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
    sweep_lock: Mutex<()>,
}

impl CleanupService {
    pub fn new(
        report_service: Arc<ReportService>,
        photo_store: Arc<PhotoStore>,
        clock: Arc<dyn Clock>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            report_service,
            photo_store,
            clock,
            config,
            sweep_lock: Mutex::new(()),
        }
    }

    /// Delete all reports older than the retention window
    ///
    /// Sweeps are serialized: a manual trigger that lands while the
    /// timer is mid-sweep waits for it instead of racing it.
    pub async fn sweep(&self) -> Result<SweepOutcome> {
        let _guard = self.sweep_lock.lock().await;

        let cutoff = self.clock.now() - self.config.retention();
        let expired = self.report_service.list_expired(cutoff).await?;

        if expired.is_empty() {
            tracing::debug!("Retention sweep found nothing older than {}", cutoff);
            return Ok(SweepOutcome::default());
        }

        tracing::info!(
            "Retention sweep found {} reports older than {}",
            expired.len(),
            cutoff
        );

        // Photos first, so an abort below leaves records the next sweep
        // will pick up again
        let mut photos_deleted: u64 = 0;
        for report in &expired {
            for url in &report.photos {
                if self.photo_store.delete(url).await {
                    photos_deleted += 1;
                }
            }
        }

        let ids: Vec<i64> = expired.iter().map(|r| r.id).collect();
        let reports_deleted = self.report_service.delete_many(&ids).await?;

        tracing::info!(
            "Retention sweep removed {} reports and {} photos",
            reports_deleted,
            photos_deleted
        );

        Ok(SweepOutcome {
            reports_deleted,
            photos_deleted,
        })
    }

    /// Current retention settings plus how much of the store they cover
    pub async fn status(&self) -> Result<RetentionStatus> {
        let cutoff = self.clock.now() - self.config.retention();
        let (total, expired) = self.report_service.count_by_age(cutoff).await?;

        Ok(RetentionStatus {
            retention_hours: self.config.retention_hours,
            sweep_interval_hours: self.config.sweep_interval_hours,
            total_reports: total,
            expired_reports: expired,
            active_reports: total - expired,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sqlx::SqlitePool;

    use super::*;
    use crate::features::reports::models::CreateReport;
    use crate::shared::clock::ManualClock;
    use crate::shared::test_helpers::{create_test_photo_store, create_test_pool};

    fn test_config() -> CleanupConfig {
        CleanupConfig {
            retention_hours: 24,
            sweep_interval_hours: 6,
        }
    }

    async fn backdate(pool: &SqlitePool, id: i64, hours: i64) {
        let created_at = Utc::now() - Duration::hours(hours);
        sqlx::query("UPDATE reports SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(id)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn setup(
        dir: &std::path::Path,
    ) -> (
        SqlitePool,
        Arc<ReportService>,
        Arc<PhotoStore>,
        Arc<ManualClock>,
        CleanupService,
    ) {
        let pool = create_test_pool().await;
        let report_service = Arc::new(ReportService::new(pool.clone()));
        let photo_store = Arc::new(create_test_photo_store(dir));
        let clock = Arc::new(ManualClock::at(Utc::now()));
        let service = CleanupService::new(
            report_service.clone(),
            photo_store.clone(),
            clock.clone(),
            test_config(),
        );
        (pool, report_service, photo_store, clock, service)
    }

    fn report_with_photos(photos: Vec<String>) -> CreateReport {
        CreateReport {
            shift: 1,
            author: "jo".to_string(),
            body: "night round, all quiet".to_string(),
            photos,
        }
    }

    #[tokio::test]
    async fn sweep_removes_expired_reports_and_their_photos() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, store, _clock, cleanup) = setup(dir.path()).await;

        let old_url = store.store(b"old photo", "old.jpg").await.unwrap();
        let old = reports
            .create(report_with_photos(vec![old_url]))
            .await
            .unwrap();
        backdate(&pool, old.id, 25).await;

        let fresh_url = store.store(b"fresh photo", "fresh.jpg").await.unwrap();
        let fresh = reports
            .create(report_with_photos(vec![fresh_url]))
            .await
            .unwrap();

        let outcome = cleanup.sweep().await.unwrap();
        assert_eq!(outcome.reports_deleted, 1);
        assert_eq!(outcome.photos_deleted, 1);

        let remaining = reports.list(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, fresh.id);

        // Only the fresh photo survives on disk
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        // A second sweep has nothing left to do
        let outcome = cleanup.sweep().await.unwrap();
        assert_eq!(outcome, SweepOutcome::default());
    }

    #[tokio::test]
    async fn sweep_with_nothing_expired_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (_pool, reports, _store, _clock, cleanup) = setup(dir.path()).await;

        reports.create(report_with_photos(vec![])).await.unwrap();

        let outcome = cleanup.sweep().await.unwrap();
        assert_eq!(outcome, SweepOutcome::default());
        assert_eq!(reports.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sweep_still_deletes_records_when_photo_files_are_gone() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, _store, _clock, cleanup) = setup(dir.path()).await;

        let ghost = "/static/uploads/ghost.jpg".to_string();
        let old = reports
            .create(report_with_photos(vec![ghost]))
            .await
            .unwrap();
        backdate(&pool, old.id, 30).await;

        let outcome = cleanup.sweep().await.unwrap();
        assert_eq!(outcome.reports_deleted, 1);
        assert_eq!(outcome.photos_deleted, 0);
        assert!(reports.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_counts_expired_against_total() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, _store, _clock, cleanup) = setup(dir.path()).await;

        for _ in 0..2 {
            let report = reports.create(report_with_photos(vec![])).await.unwrap();
            backdate(&pool, report.id, 26).await;
        }
        reports.create(report_with_photos(vec![])).await.unwrap();

        let status = cleanup.status().await.unwrap();
        assert_eq!(status.retention_hours, 24);
        assert_eq!(status.sweep_interval_hours, 6);
        assert_eq!(status.total_reports, 3);
        assert_eq!(status.expired_reports, 2);
        assert_eq!(status.active_reports, 1);
    }

    #[tokio::test]
    async fn concurrent_sweeps_remove_the_backlog_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, store, _clock, cleanup) = setup(dir.path()).await;

        for _ in 0..3 {
            let url = store.store(b"expired photo", "shot.jpg").await.unwrap();
            let report = reports.create(report_with_photos(vec![url])).await.unwrap();
            backdate(&pool, report.id, 25).await;
        }

        let (first, second) = tokio::join!(cleanup.sweep(), cleanup.sweep());
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!(first.reports_deleted + second.reports_deleted, 3);
        assert_eq!(first.photos_deleted + second.photos_deleted, 3);
        // One caller took the lock first and cleared everything; the other
        // entered after it and found nothing
        assert!(first == SweepOutcome::default() || second == SweepOutcome::default());

        assert!(reports.list(None).await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn sweep_surfaces_store_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, reports, _store, _clock, cleanup) = setup(dir.path()).await;

        let old = reports.create(report_with_photos(vec![])).await.unwrap();
        backdate(&pool, old.id, 25).await;

        pool.close().await;
        assert!(cleanup.sweep().await.is_err());
    }

    #[tokio::test]
    async fn sweep_collects_reports_once_the_clock_passes_the_window() {
        let dir = tempfile::tempdir().unwrap();
        let (_pool, reports, _store, clock, cleanup) = setup(dir.path()).await;

        reports.create(report_with_photos(vec![])).await.unwrap();

        assert_eq!(cleanup.sweep().await.unwrap(), SweepOutcome::default());

        clock.advance(Duration::hours(25));
        let outcome = cleanup.sweep().await.unwrap();
        assert_eq!(outcome.reports_deleted, 1);
        assert!(reports.list(None).await.unwrap().is_empty());
    }
}
