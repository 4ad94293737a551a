use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateReportDto, CreateReportFormDto, CreatedReportDto, DeleteReportResponseDto,
    ListReportsQuery, ReportResponseDto,
};
use crate::features::reports::models::CreateReport;
use crate::features::reports::services::ReportService;
use crate::modules::storage::PhotoStore;
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub photo_store: Arc<PhotoStore>,
}

/// Create a report from a multipart form submission
///
/// Text fields are required; photo parts are optional and filtered to
/// images. Photos are only written to disk once the form fields have
/// passed validation, so a rejected submission leaves nothing behind.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = CreateReportFormDto,
        content_type = "multipart/form-data",
        description = "Report fields plus any number of photo files"
    ),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<CreatedReportDto>),
        (status = 400, description = "Missing or invalid form fields"),
        (status = 413, description = "Upload too large")
    )
)]
pub async fn create_report(
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CreatedReportDto>>)> {
    let mut shift: Option<i64> = None;
    let mut author: Option<String> = None;
    let mut text: Option<String> = None;
    let mut pending_photos: Vec<(Vec<u8>, String)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "shift" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read shift field: {}", e))
                })?;
                let parsed = value.trim().parse::<i64>().map_err(|_| {
                    AppError::Validation("shift must be a whole number".to_string())
                })?;
                shift = Some(parsed);
            }
            "author" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read author field: {}", e))
                })?;
                author = Some(value.trim().to_string());
            }
            "text" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read text field: {}", e))
                })?;
                text = Some(value.trim().to_string());
            }
            "photos" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                if file_name.is_empty() {
                    // A form with an empty file input still submits the part
                    continue;
                }

                let content_type = field.content_type().unwrap_or("").to_string();
                if !PhotoStore::is_image(&content_type) {
                    debug!(
                        "Skipping non-image upload '{}' ({})",
                        file_name, content_type
                    );
                    continue;
                }

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read photo bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read photo data: {}", e))
                })?;
                if data.is_empty() {
                    debug!("Skipping empty photo upload '{}'", file_name);
                    continue;
                }

                pending_photos.push((data.to_vec(), file_name));
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let dto = CreateReportDto {
        shift: shift
            .ok_or_else(|| AppError::BadRequest("shift form field is required".to_string()))?,
        author: author
            .ok_or_else(|| AppError::BadRequest("author form field is required".to_string()))?,
        text: text
            .ok_or_else(|| AppError::BadRequest("text form field is required".to_string()))?,
    };
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut photos = Vec::with_capacity(pending_photos.len());
    for (data, file_name) in pending_photos {
        let url = state.photo_store.store(&data, &file_name).await?;
        photos.push(url);
    }

    let report = state
        .report_service
        .create(CreateReport {
            shift: dto.shift,
            author: dto.author,
            body: dto.text,
            photos,
        })
        .await?;

    let response = CreatedReportDto {
        report_id: report.id,
        photos_count: report.photos.len(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Report created".to_string()),
            None,
        )),
    ))
}

/// List reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>)
    )
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.report_service.list(query.shift).await?;
    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Delete a report and its photos
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted", body = ApiResponse<DeleteReportResponseDto>),
        (status = 404, description = "Report not found")
    )
)]
pub async fn delete_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteReportResponseDto>>> {
    let report = state.report_service.get(id).await?;

    // Photos go first: a failure in between leaves an orphaned record for
    // the sweeper, never a record pointing at files that outlive it
    for url in &report.photos {
        state.photo_store.delete(url).await;
    }

    state.report_service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteReportResponseDto { deleted: true }),
        Some("Report deleted".to_string()),
        None,
    )))
}
