//! Row normalization shared by every upload format.
//!
//! The first row is the header: a cycle-day column, then period labels.
//! Every later non-blank row is one cycle day.

use std::collections::HashSet;

use crate::calendar::table::{CycleDay, CycleTable};
use crate::source::error::{SourceError, SourceResult};

/// Build a cycle table from `(line, cells)` rows, cells already trimmed.
pub(crate) fn build_table<I>(rows: I) -> SourceResult<CycleTable>
where
    I: IntoIterator<Item = SourceResult<(u64, Vec<String>)>>,
{
    let mut rows = rows.into_iter();

    let (_, header) = rows.next().ok_or(SourceError::Empty)??;
    let width = header.len();
    let period_labels: Vec<String> = header.into_iter().skip(1).collect();

    let mut days = Vec::new();
    let mut seen = HashSet::new();
    for row in rows {
        let (line, cells) = row?;

        if cells.iter().all(String::is_empty) {
            continue;
        }
        if cells.len() != width {
            return Err(SourceError::RaggedRow {
                line,
                expected: width,
                found: cells.len(),
            });
        }

        let mut cells = cells.into_iter();
        let name = cells.next().unwrap_or_default();
        if name.is_empty() {
            return Err(SourceError::BlankDayName { line });
        }
        if !seen.insert(name.clone()) {
            return Err(SourceError::DuplicateDay { line, name });
        }

        days.push(CycleDay::new(&name, cells));
    }

    if days.is_empty() {
        return Err(SourceError::NoDays);
    }

    Ok(CycleTable::new(period_labels, days))
}
