use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::Report;
use crate::features::shifts::shift_name;

/// Validated form fields of a report submission (photos are handled
/// separately by the multipart loop)
#[derive(Debug, Validate)]
pub struct CreateReportDto {
    #[validate(range(min = 1, message = "shift must be a positive number"))]
    pub shift: i64,
    #[validate(length(min = 1, max = 100, message = "author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Create report request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateReportFormDto {
    /// Shift number the report belongs to
    #[schema(example = 2)]
    pub shift: i64,
    /// Name of the person filing the report
    #[schema(example = "maria")]
    pub author: String,
    /// Report body text
    pub text: String,
    /// Photo files to attach; parts without an image MIME type are skipped
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photos: Option<String>,
}

/// Response DTO confirming a created report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedReportDto {
    /// Identifier of the new report
    pub report_id: i64,
    /// Number of photos stored with it
    pub photos_count: usize,
}

/// A report as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub shift: i64,
    /// Display name for the shift
    pub shift_name: String,
    pub author: String,
    pub text: String,
    /// Photo urls in upload order
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            shift: r.shift,
            shift_name: shift_name(r.shift),
            author: r.author,
            text: r.body,
            photos: r.photos,
            created_at: r.created_at,
        }
    }
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Only return reports filed for this shift
    pub shift: Option<i64>,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteReportResponseDto {
    /// Confirmation that the report was deleted
    pub deleted: bool,
}
