pub mod accumulator;
pub mod leave_code;
pub mod report;
pub mod team;
pub mod user;
pub mod work_log;
