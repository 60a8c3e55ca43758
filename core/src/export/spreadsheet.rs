use std::path::Path;

use anyhow::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::model::report::{display_header, CellValue, ReportRow};
use crate::service::dto::UserReport;

const NAME_COLUMN_WIDTH: f64 = 18.0;
const DAY_COLUMN_WIDTH: f64 = 7.0;

struct Formats {
    header: Format,
    text: Format,
    number: Format,
    leave: Format,
    total_text: Format,
    total_number: Format,
}

impl Formats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center);
        let text = Format::new().set_border(FormatBorder::Thin);
        let number = Format::new().set_border(FormatBorder::Thin).set_num_format("0");
        let leave = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_italic();
        let total_text = Format::new().set_bold().set_border(FormatBorder::Thin);
        let total_number = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_num_format("0");

        Self { header, text, number, leave, total_text, total_number }
    }
}

pub fn write_xlsx(report: &UserReport, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    Ok(())
}

pub fn xlsx_bytes(report: &UserReport) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(report: &UserReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(report.period.label())?;

    for (col, label) in display_header(&report.dates).iter().enumerate() {
        sheet.write_with_format(0, col as u16, label.as_str(), &formats.header)?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        write_row(sheet, i as u32 + 1, row, &formats)?;
    }

    sheet.set_column_width(0, NAME_COLUMN_WIDTH)?;
    sheet.set_column_width(2, NAME_COLUMN_WIDTH)?;
    for col in 6..6 + report.dates.len() {
        sheet.set_column_width(col as u16, DAY_COLUMN_WIDTH)?;
    }
    sheet.set_freeze_panes(1, 1)?;

    Ok(workbook)
}

fn write_row(sheet: &mut Worksheet, row_idx: u32, row: &ReportRow, formats: &Formats) -> Result<()> {
    let (text, number) = if row.is_totals() {
        (&formats.total_text, &formats.total_number)
    } else {
        (&formats.text, &formats.number)
    };

    sheet.write_with_format(row_idx, 0, row.name.as_str(), text)?;
    sheet.write_with_format(row_idx, 1, row.role.as_str(), text)?;
    sheet.write_with_format(row_idx, 2, row.team.as_str(), text)?;
    sheet.write_with_format(row_idx, 3, row.total_work as f64, number)?;
    sheet.write_with_format(row_idx, 4, row.onsite as f64, number)?;
    sheet.write_with_format(row_idx, 5, row.offsite as f64, number)?;

    for (offset, value) in row.days.values().enumerate() {
        let col = 6 + offset as u16;
        match value {
            CellValue::Hours(h) => sheet.write_with_format(row_idx, col, *h as f64, number)?,
            CellValue::Leave(code) => sheet.write_with_format(row_idx, col, code.as_str(), &formats.leave)?,
        };
    }

    Ok(())
}
