use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;

use crate::features::cleanup::services::CleanupService;

/// Background worker that runs retention sweeps on a timer
///
/// The first tick fires immediately, so anything that expired while the
/// service was down is swept at startup.
pub struct RetentionWorker {
    cleanup_service: Arc<CleanupService>,
    sweep_interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl RetentionWorker {
    pub fn new(
        cleanup_service: Arc<CleanupService>,
        sweep_interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            cleanup_service,
            sweep_interval,
            shutdown,
        }
    }

    /// Run sweeps until the shutdown signal flips
    ///
    /// Shutdown is only observed between sweeps; a sweep in progress
    /// always finishes.
    pub async fn run(mut self) {
        tracing::info!(
            "Starting retention worker (sweeping every {}s)",
            self.sweep_interval.as_secs()
        );

        let mut interval = interval(self.sweep_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.cleanup_service.sweep().await {
                        tracing::error!("Retention sweep failed: {:?}", e);
                    }
                }
                _ = self.shutdown.changed() => {
                    tracing::info!("Retention worker stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;
    use crate::core::config::CleanupConfig;
    use crate::features::reports::models::CreateReport;
    use crate::features::reports::services::ReportService;
    use crate::shared::clock::ManualClock;
    use crate::shared::test_helpers::{create_test_photo_store, create_test_pool};

    #[tokio::test]
    async fn sweeps_backlog_at_startup_and_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_test_pool().await;
        let report_service = Arc::new(ReportService::new(pool.clone()));
        let photo_store = Arc::new(create_test_photo_store(dir.path()));
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

        let report = report_service
            .create(CreateReport {
                shift: 3,
                author: "sam".to_string(),
                body: "left over from the previous run".to_string(),
                photos: vec![],
            })
            .await
            .unwrap();
        let created_at = Utc::now() - ChronoDuration::hours(48);
        sqlx::query("UPDATE reports SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(report.id)
            .execute(&pool)
            .await
            .unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = RetentionWorker::new(
            cleanup_service,
            Duration::from_secs(6 * 3600),
            shutdown_rx,
        );
        let handle = tokio::spawn(worker.run());

        // The immediate first tick clears the backlog; the next tick is
        // hours away, so anything swept came from startup
        let mut swept = false;
        for _ in 0..100 {
            if report_service.list(None).await.unwrap().is_empty() {
                swept = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(swept, "startup sweep did not run");

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop after shutdown signal")
            .unwrap();
    }
}
