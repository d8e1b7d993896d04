//! CSV cycle-table upload.
//!
//! Layout: a header row whose first cell names the cycle-day column and whose
//! remaining cells are period labels, then one row per cycle day.
//!
//! ```text
//! Cycle Day,9:00–9:55,9:55–10:50
//! DAY 1,BA(SM),PP(CD)
//! DAY 2,PP(CD),BA(SM)
//! ```

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, Writer};

use crate::calendar::table::CycleTable;
use crate::source::error::SourceResult;
use crate::source::rows::build_table;

/// Header of the cycle-day column in written templates
pub const CYCLE_DAY_HEADER: &str = "Cycle Day";

/// Parse an uploaded CSV cycle table. Ragged rows, blank or repeated day
/// names and empty uploads are rejected rather than repaired.
pub fn parse_table<R: Read>(reader: R) -> SourceResult<CycleTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let rows = rdr.records().map(|record| -> SourceResult<(u64, Vec<String>)> {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        Ok((line, record.iter().map(ToString::to_string).collect()))
    });
    build_table(rows)
}

/// Write a cycle table in the upload layout, e.g. as an editable template.
pub fn write_template<W: Write>(table: &CycleTable, writer: W) -> SourceResult<()> {
    let mut wtr = Writer::from_writer(writer);

    let labels = table.period_labels.iter().map(String::as_str);
    wtr.write_record(std::iter::once(CYCLE_DAY_HEADER).chain(labels))?;
    for day in &table.days {
        let slots = day.slots.iter().map(String::as_str);
        wtr.write_record(std::iter::once(day.name.as_str()).chain(slots))?;
    }
    wtr.flush()?;
    Ok(())
}
