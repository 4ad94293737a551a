use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row for a report; photo urls live in `report_photos`
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub shift: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Row from `report_photos`, ordered by position within its report
#[derive(Debug, Clone, FromRow)]
pub struct PhotoRow {
    pub report_id: i64,
    pub url: String,
}

/// A report with its photo references attached
#[derive(Debug, Clone)]
pub struct Report {
    pub id: i64,
    pub shift: i64,
    pub author: String,
    pub body: String,
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn from_row(row: ReportRow, photos: Vec<String>) -> Self {
        Self {
            id: row.id,
            shift: row.shift,
            author: row.author,
            body: row.body,
            photos,
            created_at: row.created_at,
        }
    }
}

/// Data for creating a new report
#[derive(Debug)]
pub struct CreateReport {
    pub shift: i64,
    pub author: String,
    pub body: String,
    /// Stored photo urls, in upload order
    pub photos: Vec<String>,
}
