//! PDF document export
//!
//! Lays the paginated text pages out on landscape A4 in Courier, one PDF
//! page per text page, so the PDF keeps the same columns and page breaks as
//! the `.txt` export. The font shrinks to fit wide tables.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::calendar::resolver::ScheduleResult;
use crate::export::error::ExportResult;
use crate::export::pages::{render_pages, PageLayout};

const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 36.0;
const MAX_FONT_SIZE: f32 = 9.0;
const MIN_FONT_SIZE: f32 = 4.0;
/// Courier glyph advance as a fraction of the font size
const CHAR_WIDTH: f32 = 0.6;
const LEADING: f32 = 1.2;

fn to_f32(n: usize) -> f32 {
    u16::try_from(n).map_or(f32::from(u16::MAX), f32::from)
}

/// Largest size, within bounds, at which `columns` characters and `lines`
/// lines fit inside the margins.
fn font_size(columns: usize, lines: usize) -> f32 {
    let by_width = (PAGE_WIDTH - 2.0 * MARGIN) / (CHAR_WIDTH * to_f32(columns.max(1)));
    let by_height = (PAGE_HEIGHT - 2.0 * MARGIN) / (LEADING * to_f32(lines.max(1)));
    by_width.min(by_height).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Encode text for the standard Courier font (WinAnsiEncoding).
/// Characters outside it become '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            c => u8::try_from(c)
                .ok()
                .filter(|b| *b >= 0x20 && !(0x7F..0xA0).contains(b))
                .unwrap_or(b'?'),
        })
        .collect()
}

fn page_content(text: &str, size: f32) -> ExportResult<Vec<u8>> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("TL", vec![(size * LEADING).into()]),
        Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - size).into()]),
    ];
    for line in text.lines() {
        operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    Ok(Content { operations }.encode()?)
}

/// Build the PDF document in memory.
pub fn build_document(schedule: &ScheduleResult, layout: &PageLayout) -> ExportResult<Document> {
    let pages = render_pages(schedule, layout);
    let columns = pages
        .iter()
        .flat_map(|page| page.lines())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let lines = pages.iter().map(|page| page.lines().count()).max().unwrap_or(0);
    let size = font_size(columns, lines);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page, size)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    Ok(doc)
}

/// Render the schedule as PDF bytes.
pub fn pdf_bytes(schedule: &ScheduleResult, layout: &PageLayout) -> ExportResult<Vec<u8>> {
    let mut doc = build_document(schedule, layout)?;
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Save the schedule as a `.pdf` file.
pub fn write_pdf(schedule: &ScheduleResult, layout: &PageLayout, path: &Path) -> ExportResult<()> {
    std::fs::write(path, pdf_bytes(schedule, layout)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_schedule;

    fn layout(rows_per_page: usize) -> PageLayout {
        PageLayout {
            title: "College Timetable".to_string(),
            rows_per_page,
        }
    }

    #[test]
    fn test_pdf_magic_and_page_count() {
        let schedule = sample_schedule();
        let bytes = pdf_bytes(&schedule, &layout(4)).unwrap();
        assert_eq!(&bytes[..4], b"%PDF");

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_pages_match_text_export() {
        let schedule = sample_schedule();
        for rows_per_page in [1, 4, 10, 40] {
            let doc = build_document(&schedule, &layout(rows_per_page)).unwrap();
            assert_eq!(
                doc.get_pages().len(),
                render_pages(&schedule, &layout(rows_per_page)).len()
            );
        }
    }

    #[test]
    fn test_write_pdf_creates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("Dynamic_Timetable.pdf");

        write_pdf(&sample_schedule(), &layout(40), &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn test_font_size_shrinks_for_wide_tables() {
        assert!((font_size(40, 10) - MAX_FONT_SIZE).abs() < f32::EPSILON);
        let wide = font_size(200, 10);
        assert!(wide < MAX_FONT_SIZE && wide > MIN_FONT_SIZE);
        assert!((font_size(10_000, 10) - MIN_FONT_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("9:00–9:55"), b"9:00\x969:55".to_vec());
        assert_eq!(win_ansi("Café"), b"Caf\xe9".to_vec());
        assert_eq!(win_ansi("日"), b"?".to_vec());
    }
}
