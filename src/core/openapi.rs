use utoipa::OpenApi;

use crate::features::cleanup::{dtos as cleanup_dtos, handlers as cleanup_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::shifts::{handler as shifts_handler, Shift};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::delete_report,
        // Shifts
        shifts_handler::list_shifts,
        // Cleanup
        cleanup_handlers::run_cleanup,
        cleanup_handlers::cleanup_status,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_dtos::CreateReportFormDto,
            reports_dtos::CreatedReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::DeleteReportResponseDto,
            ApiResponse<reports_dtos::CreatedReportDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::DeleteReportResponseDto>,
            // Shifts
            Shift,
            ApiResponse<Vec<Shift>>,
            // Cleanup
            cleanup_dtos::CleanupRunResponseDto,
            cleanup_dtos::CleanupStatusDto,
            ApiResponse<cleanup_dtos::CleanupRunResponseDto>,
            ApiResponse<cleanup_dtos::CleanupStatusDto>,
        )
    ),
    tags(
        (name = "reports", description = "Shift report submission, listing and deletion"),
        (name = "shifts", description = "Shift rotation catalog"),
        (name = "cleanup", description = "Retention sweeps over expired reports"),
    ),
    info(
        title = "Shiftlog API",
        version = "0.1.0",
        description = "Shift report logging with automatic 24 hour retention",
    )
)]
pub struct ApiDoc;
