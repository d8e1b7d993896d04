//! Paginated plain-text document export
//!
//! Renders the schedule as fixed-width pages: a title line, the column
//! header, a block of rows and a `Page i of n` footer. Pages are separated
//! by a form feed so printers and pagers break them correctly.

use std::io::Write;

use crate::calendar::config::OutputConfig;
use crate::calendar::resolver::ScheduleResult;

/// Separator written between pages
pub const PAGE_BREAK: char = '\x0c';

const COLUMN_GAP: &str = " | ";

/// Title and page size for a paginated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Printed at the top of every page
    pub title: String,
    /// Day rows per page; values below 1 are treated as 1
    pub rows_per_page: usize,
}

impl From<&OutputConfig> for PageLayout {
    fn from(output: &OutputConfig) -> Self {
        Self {
            title: output.title.clone(),
            rows_per_page: output.rows_per_page,
        }
    }
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Render each page as a separate string.
#[must_use]
pub fn render_pages(schedule: &ScheduleResult, layout: &PageLayout) -> Vec<String> {
    let header = schedule.header();
    let rows: Vec<Vec<String>> = schedule.rows().collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line = pad_row(&header, &widths);
    let gaps = COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let rule = "-".repeat(widths.iter().sum::<usize>() + gaps);

    let per_page = layout.rows_per_page.max(1);
    let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
        vec![&rows[..]]
    } else {
        rows.chunks(per_page).collect()
    };
    let total = chunks.len();

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut page = String::new();
            page.push_str(&layout.title);
            page.push_str("\n\n");
            page.push_str(&header_line);
            page.push('\n');
            page.push_str(&rule);
            page.push('\n');
            for row in *chunk {
                page.push_str(&pad_row(row, &widths));
                page.push('\n');
            }
            page.push('\n');
            page.push_str(&format!("Page {} of {total}", i + 1));
            page.push('\n');
            page
        })
        .collect()
}

/// Write all pages, separated by form feeds.
pub fn write_pages<W: Write>(
    schedule: &ScheduleResult,
    layout: &PageLayout,
    mut writer: W,
) -> std::io::Result<()> {
    for (i, page) in render_pages(schedule, layout).iter().enumerate() {
        if i > 0 {
            write!(writer, "{PAGE_BREAK}")?;
        }
        writer.write_all(page.as_bytes())?;
    }
    writer.flush()
}
