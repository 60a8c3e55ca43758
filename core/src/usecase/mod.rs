pub mod user_report;

#[cfg(test)]
mod user_report_test;
