//! Excel workbook export
//!
//! One worksheet named "Timetable" with a bold, frozen header row. Holiday
//! rows are shaded so they stand out when scrolling a semester.

use std::path::Path;

use rust_xlsxwriter::{Color, ColNum, Format, RowNum, Workbook};

use crate::calendar::resolver::ScheduleResult;
use crate::export::error::{ExportError, ExportResult};

/// Worksheet name used for the schedule
pub const SHEET_NAME: &str = "Timetable";

const MAX_COLUMN_WIDTH: usize = 60;

fn row_num(row: usize) -> ExportResult<RowNum> {
    RowNum::try_from(row).map_err(|_| ExportError::OutOfRange(format!("row {row}")))
}

fn col_num(col: usize) -> ExportResult<ColNum> {
    ColNum::try_from(col).map_err(|_| ExportError::OutOfRange(format!("column {col}")))
}

/// Build the workbook in memory.
pub fn build_workbook(schedule: &ScheduleResult) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let holiday_format = Format::new().set_background_color(Color::RGB(0x00FF_F2CC));

    let header = schedule.header();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, text) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, text, &header_format)?;
    }

    for (i, (day, cells)) in schedule.days().iter().zip(schedule.rows()).enumerate() {
        let row = row_num(i + 1)?;
        for (col, text) in cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(col) {
                *width = (*width).max(text.chars().count());
            }
            if day.is_holiday() {
                worksheet.write_string_with_format(row, col_num(col)?, text, &holiday_format)?;
            } else {
                worksheet.write_string(row, col_num(col)?, text)?;
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let width = u32::try_from((*width + 2).min(MAX_COLUMN_WIDTH)).unwrap_or(u32::MAX);
        worksheet.set_column_width(col_num(col)?, f64::from(width))?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

/// Save the schedule as an `.xlsx` file.
pub fn write_xlsx(schedule: &ScheduleResult, path: &Path) -> ExportResult<()> {
    let mut workbook = build_workbook(schedule)?;
    workbook.save(path)?;
    Ok(())
}

/// Render the schedule as `.xlsx` bytes.
pub fn xlsx_bytes(schedule: &ScheduleResult) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(schedule)?;
    Ok(workbook.save_to_buffer()?)
}
