use std::io::Write;

use anyhow::Result;

use crate::model::report::field_keys;
use crate::service::dto::UserReport;

/// One header line of field keys, then one record per row including totals.
pub fn write_csv<W: Write>(report: &UserReport, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(field_keys(&report.dates))?;
    for row in &report.rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}
