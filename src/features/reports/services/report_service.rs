use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, PhotoRow, Report, ReportRow};

/// Service for report persistence
///
/// Owns every query against `reports` and `report_photos`. Photo files on
/// disk belong to the photo store; callers coordinate the two.
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    // Ids bound into one photo lookup; keeps even a huge expired backlog
    // under SQLite's bound-parameter limit
    const PHOTO_QUERY_CHUNK: usize = 500;

    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new report together with its photo references
    ///
    /// Record and photo rows are written in one transaction, so a report is
    /// never visible with half its photo list.
    pub async fn create(&self, data: CreateReport) -> Result<Report> {
        let created_at = Utc::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reports (shift, author, body, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(data.shift)
        .bind(&data.author)
        .bind(&data.body)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        for (position, url) in data.photos.iter().enumerate() {
            sqlx::query("INSERT INTO report_photos (report_id, position, url) VALUES (?, ?, ?)")
                .bind(id)
                .bind(position as i64)
                .bind(url)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to store photo reference: {:?}", e);
                    AppError::Database(e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: {} (shift: {}, photos: {})",
            id,
            data.shift,
            data.photos.len()
        );

        Ok(Report {
            id,
            shift: data.shift,
            author: data.author,
            body: data.body,
            photos: data.photos,
            created_at,
        })
    }

    /// List reports, newest first, optionally restricted to one shift
    pub async fn list(&self, shift: Option<i64>) -> Result<Vec<Report>> {
        let rows: Vec<ReportRow> = match shift {
            Some(shift) => {
                sqlx::query_as(
                    "SELECT id, shift, author, body, created_at FROM reports \
                     WHERE shift = ? ORDER BY created_at DESC, id DESC",
                )
                .bind(shift)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, shift, author, body, created_at FROM reports \
                     ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        let photos = self.photos_for(&rows).await?;
        Ok(Self::attach_photos(rows, photos))
    }

    /// Get one report with its photos
    pub async fn get(&self, id: i64) -> Result<Report> {
        let row: Option<ReportRow> =
            sqlx::query_as("SELECT id, shift, author, body, created_at FROM reports WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch report {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        let row =
            row.ok_or_else(|| AppError::NotFound(format!("Report with id {} not found", id)))?;

        let photos: Vec<String> =
            sqlx::query_scalar("SELECT url FROM report_photos WHERE report_id = ? ORDER BY position")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch photos for report {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        Ok(Report::from_row(row, photos))
    }

    /// Delete one report; its photo rows go with it via cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Report with id {} not found",
                id
            )));
        }

        tracing::info!("Deleted report: {}", id);
        Ok(())
    }

    /// Reports created strictly before `cutoff`, photos included, oldest first
    pub async fn list_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<Report>> {
        let rows: Vec<ReportRow> = sqlx::query_as(
            "SELECT id, shift, author, body, created_at FROM reports \
             WHERE created_at < ? ORDER BY created_at, id",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list expired reports: {:?}", e);
            AppError::Database(e)
        })?;

        let photos = self.photos_for(&rows).await?;
        Ok(Self::attach_photos(rows, photos))
    }

    /// Delete a batch of reports in one transaction
    ///
    /// All or nothing: an error rolls every deletion back so the batch can
    /// be retried in full. Returns the number of rows actually removed.
    pub async fn delete_many(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let mut deleted = 0u64;
        for id in ids {
            let result = sqlx::query("DELETE FROM reports WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete report {}: {:?}", id, e);
                    AppError::Database(e)
                })?;
            deleted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit batch delete: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(deleted)
    }

    /// Total and expired report counts for the cleanup status endpoint
    pub async fn count_by_age(&self, cutoff: DateTime<Utc>) -> Result<(i64, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        let expired: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE created_at < ?")
            .bind(cutoff)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count expired reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((total, expired))
    }

    /// Photo urls for a batch of report rows, keyed by report id
    ///
    /// The lookup runs in chunks of [`Self::PHOTO_QUERY_CHUNK`] ids, so the
    /// size of the batch is not limited by what one IN list can bind.
    async fn photos_for(&self, reports: &[ReportRow]) -> Result<HashMap<i64, Vec<String>>> {
        let mut photos: HashMap<i64, Vec<String>> = HashMap::new();

        for chunk in reports.chunks(Self::PHOTO_QUERY_CHUNK) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT report_id, url FROM report_photos WHERE report_id IN (");
            {
                let mut separated = builder.separated(", ");
                for row in chunk {
                    separated.push_bind(row.id);
                }
            }
            builder.push(") ORDER BY report_id, position");

            let rows: Vec<PhotoRow> = builder
                .build_query_as()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch photo references: {:?}", e);
                    AppError::Database(e)
                })?;

            for row in rows {
                photos.entry(row.report_id).or_default().push(row.url);
            }
        }

        Ok(photos)
    }

    fn attach_photos(rows: Vec<ReportRow>, mut photos: HashMap<i64, Vec<String>>) -> Vec<Report> {
        rows.into_iter()
            .map(|row| {
                let urls = photos.remove(&row.id).unwrap_or_default();
                Report::from_row(row, urls)
            })
            .collect()
    }
}
