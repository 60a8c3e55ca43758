pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::ReportError;
pub use export::{export_to_path, ExportFormat};
pub use model::leave_code::LeaveCodeTable;
pub use model::report::{CellValue, ReportRow, TOTALS_ROW_NAME};
pub use model::work_log::WorkLogRow;
pub use repository::{FileTimesheetRepository, TeamRepository, UserRepository, WorkLogRepository};
pub use service::dto::{ReportQuery, UserReport};
pub use service::pivot::TimesheetPivot;
pub use time::{expand_date_range, parse_date, parse_month, ReportPeriod};
pub use usecase::user_report::UserReportUseCase;
