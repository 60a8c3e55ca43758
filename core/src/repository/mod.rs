pub mod file;
pub mod traits;

// Re-export
pub use file::{Dataset, FileTimesheetRepository};
pub use traits::{TeamRepository, UserRepository, WorkLogRepository};
