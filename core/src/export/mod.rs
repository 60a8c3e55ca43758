//! Writes a finished report out for spreadsheets and other tools.

pub mod delimited;
pub mod spreadsheet;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::error::ReportError;
use crate::input::expand_key;
use crate::service::dto::UserReport;

pub use delimited::write_csv;
pub use spreadsheet::{write_xlsx, xlsx_bytes};

const EXPORT_FILE_STEM: &str = "timepivot-export-users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    const NAMES: [&'static str; 4] = ["table", "json", "csv", "xlsx"];

    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Table => None,
            ExportFormat::Json => Some("json"),
            ExportFormat::Csv => Some("csv"),
            ExportFormat::Xlsx => Some("xlsx"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match expand_key(s, &Self::NAMES)?.as_str() {
            "table" => Ok(ExportFormat::Table),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(ReportError::UnknownKey(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Table => "table",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

/// e.g. `timepivot-export-users-monthly-2025-01.xlsx`
pub fn default_file_name(report: &UserReport, format: ExportFormat) -> Option<String> {
    let kind = if report.period.is_monthly() { "monthly" } else { "range" };
    format
        .extension()
        .map(|ext| format!("{}-{}-{}.{}", EXPORT_FILE_STEM, kind, report.period.label(), ext))
}

/// The row mappings as a JSON array.
pub fn write_json<W: Write>(report: &UserReport, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &report.rows)?;
    Ok(())
}

pub fn export_to_path(report: &UserReport, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Table => return Err(anyhow!("The table format is for terminal output only")),
        ExportFormat::Xlsx => write_xlsx(report, path)?,
        ExportFormat::Csv | ExportFormat::Json => {
            let mut writer = BufWriter::new(File::create(path)?);
            if format == ExportFormat::Csv {
                write_csv(report, &mut writer)?;
            } else {
                write_json(report, &mut writer)?;
            }
            writer.flush()?;
        }
    }

    info!(path = %path.display(), %format, rows = report.rows.len(), "Exported report");
    Ok(())
}
