mod report_dto;

pub use report_dto::{
    CreateReportDto, CreateReportFormDto, CreatedReportDto, DeleteReportResponseDto,
    ListReportsQuery, ReportResponseDto,
};
