//! CSV spreadsheet export.

use std::io::Write;

use csv::Writer;

use crate::calendar::resolver::ScheduleResult;
use crate::export::error::ExportResult;

/// Write the header and one record per day.
pub fn write_csv<W: Write>(schedule: &ScheduleResult, writer: W) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(schedule.header())?;
    for row in schedule.rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
