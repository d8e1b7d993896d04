//! Excel cycle-table upload.
//!
//! Reads the first worksheet with the same layout as the CSV upload: a
//! header row, then one row per cycle day. Trailing empty columns beyond
//! the header are ignored, since spreadsheets often carry stray formatting
//! past the last label.

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::calendar::table::CycleTable;
use crate::source::csv::CYCLE_DAY_HEADER;
use crate::source::error::{SourceError, SourceResult};
use crate::source::rows::build_table;

fn cell_text(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

/// Parse an uploaded `.xlsx` cycle table from its first worksheet.
pub fn parse_workbook<R: Read + Seek>(reader: R) -> SourceResult<CycleTable> {
    let mut workbook = Xlsx::new(reader)?;
    let range = workbook.worksheet_range_at(0).ok_or(SourceError::NoSheet)??;

    let first_line = range.start().map_or(1, |(row, _)| u64::from(row) + 1);
    let rows: Vec<(u64, Vec<String>)> = (first_line..)
        .zip(range.rows())
        .map(|(line, cells)| (line, cells.iter().map(cell_text).collect()))
        .collect();

    let width = rows.first().map_or(0, |(_, header)| {
        header.iter().rposition(|c| !c.is_empty()).map_or(0, |last| last + 1)
    });

    build_table(rows.into_iter().map(|(line, mut cells)| {
        while cells.len() > width && cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }
        SourceResult::Ok((line, cells))
    }))
}

fn template_workbook(table: &CycleTable) -> SourceResult<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    sheet.write_string_with_format(0, 0, CYCLE_DAY_HEADER, &bold)?;
    for (col, label) in (1..).zip(&table.period_labels) {
        sheet.write_string_with_format(0, col, label, &bold)?;
    }
    for (row, day) in (1..).zip(&table.days) {
        sheet.write_string(row, 0, &day.name)?;
        for (col, slot) in (1..).zip(&day.slots) {
            if !slot.is_empty() {
                sheet.write_string(row, col, slot)?;
            }
        }
    }

    Ok(workbook)
}

/// Save a cycle table as an editable `.xlsx` template.
pub fn write_template_xlsx(table: &CycleTable, path: &Path) -> SourceResult<()> {
    template_workbook(table)?.save(path)?;
    Ok(())
}

/// Render a cycle table as `.xlsx` template bytes.
pub fn template_xlsx_bytes(table: &CycleTable) -> SourceResult<Vec<u8>> {
    Ok(template_workbook(table)?.save_to_buffer()?)
}
