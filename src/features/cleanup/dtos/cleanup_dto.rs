use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::cleanup::services::{RetentionStatus, SweepOutcome};

/// Result of a retention sweep
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CleanupRunResponseDto {
    /// Reports removed by this sweep
    pub reports_deleted: u64,
    /// Photo files removed by this sweep
    pub photos_deleted: u64,
}

impl From<SweepOutcome> for CleanupRunResponseDto {
    fn from(outcome: SweepOutcome) -> Self {
        Self {
            reports_deleted: outcome.reports_deleted,
            photos_deleted: outcome.photos_deleted,
        }
    }
}

/// Retention policy plus the backlog it currently covers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CleanupStatusDto {
    /// Hours a report is kept before it expires
    pub retention_hours: i64,
    /// Hours between scheduled sweeps
    pub sweep_interval_hours: u64,
    /// Reports currently stored
    pub total_reports: i64,
    /// Stored reports already past the retention window
    pub expired_reports: i64,
    /// Stored reports still inside the retention window
    pub active_reports: i64,
}

impl From<RetentionStatus> for CleanupStatusDto {
    fn from(status: RetentionStatus) -> Self {
        Self {
            retention_hours: status.retention_hours,
            sweep_interval_hours: status.sweep_interval_hours,
            total_reports: status.total_reports,
            expired_reports: status.expired_reports,
            active_reports: status.active_reports,
        }
    }
}
