mod report;

pub use report::{CreateReport, PhotoRow, Report, ReportRow};
