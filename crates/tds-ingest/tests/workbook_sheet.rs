use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tds_ingest::{IngestError, SheetLayout, list_sheets, read_sheet};
use tds_model::{CellValue, ColumnLabel};
use tempfile::TempDir;

const SHEET: &str = "Provider Time & Distance";

/// Writes the published layout with its banner in column B of row `top`.
///
/// Category descriptions are merged across their Time and Distance columns.
fn write_published(worksheet: &mut Worksheet, top: u32) -> Result<(), XlsxError> {
    let merged = Format::new();
    worksheet.write_string(top, 1, "Provider Time & Distance Standards")?;

    worksheet.write_string(top + 1, 1, "COUNTY")?;
    worksheet.write_string(top + 1, 2, "ST")?;
    worksheet.merge_range(top + 1, 3, top + 1, 4, "Cardiology", &merged)?;
    worksheet.merge_range(top + 1, 5, top + 1, 6, "Oncology", &merged)?;

    worksheet.write_number(top + 2, 3, 123.0)?;
    worksheet.write_string(top + 2, 5, "200")?;

    for (col, kind) in [(3, "Time"), (4, "Distance"), (5, "Time"), (6, "Distance")] {
        worksheet.write_string(top + 3, col, kind)?;
    }

    worksheet.write_string(top + 4, 1, "Wake")?;
    worksheet.write_string(top + 4, 2, "NC")?;
    worksheet.write_number(top + 4, 3, 12.5)?;
    worksheet.write_number(top + 4, 4, 8.0)?;
    worksheet.write_number(top + 4, 5, 30.0)?;
    worksheet.write_number(top + 4, 6, 20.0)?;

    worksheet.write_string(top + 5, 1, "Durham")?;
    worksheet.write_string(top + 5, 2, "NC")?;
    worksheet.write_number(top + 5, 4, 9.0)?;
    worksheet.write_number(top + 5, 5, 35.0)?;
    Ok(())
}

fn write_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("Provider_Time_Distance.xlsx");
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet().set_name("Notes").expect("name notes");
    notes
        .write_string(0, 0, "Standards are reviewed annually.")
        .expect("write notes");

    let published = workbook.add_worksheet().set_name(SHEET).expect("name sheet");
    write_published(published, 0).expect("write published sheet");

    let shifted = workbook.add_worksheet().set_name("Shifted").expect("name shifted");
    write_published(shifted, 1).expect("write shifted sheet");

    workbook.save(&path).expect("save workbook");
    path
}

fn expected_labels() -> Vec<ColumnLabel> {
    vec![
        ColumnLabel::new("", "", ""),
        ColumnLabel::new("COUNTY", "", ""),
        ColumnLabel::new("ST", "", ""),
        ColumnLabel::new("Cardiology", "123", "Time"),
        ColumnLabel::new("Cardiology", "123", "Distance"),
        ColumnLabel::new("Oncology", "200", "Time"),
        ColumnLabel::new("Oncology", "200", "Distance"),
    ]
}

#[test]
fn lists_sheets_in_workbook_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(dir.path());

    let sheets = list_sheets(&path).expect("list sheets");

    assert_eq!(sheets, vec!["Notes", SHEET, "Shifted"]);
}

#[test]
fn reads_published_sheet_with_merged_categories() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(dir.path());

    let table = read_sheet(&path, Some(SHEET), &SheetLayout::default()).expect("read sheet");

    // The used range starts in column B; column A is kept so positions match the sheet.
    assert_eq!(table.labels(), expected_labels().as_slice());
    assert_eq!(table.height(), 2);

    let wake = table.row(0).expect("first row");
    assert_eq!(wake[0], CellValue::Empty);
    assert_eq!(wake[1], CellValue::text("Wake"));
    assert_eq!(wake[3], CellValue::Number(12.5));
    assert_eq!(wake[6], CellValue::Number(20.0));

    let durham = table.row(1).expect("second row");
    assert_eq!(durham[1], CellValue::text("Durham"));
    assert_eq!(durham[3], CellValue::Empty);
    assert_eq!(durham[4], CellValue::Number(9.0));
    assert_eq!(durham[6], CellValue::Empty);
}

#[test]
fn blank_leading_rows_count_toward_skip_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(dir.path());
    let layout = SheetLayout {
        skip_rows: 2,
        ..SheetLayout::default()
    };

    let table = read_sheet(&path, Some("Shifted"), &layout).expect("read sheet");

    assert_eq!(table.labels(), expected_labels().as_slice());
    assert_eq!(table.height(), 2);
    assert_eq!(table.row(1).expect("second row")[1], CellValue::text("Durham"));
}

#[test]
fn unknown_sheet_lists_available_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(dir.path());

    let err = read_sheet(&path, Some("Provider Time"), &SheetLayout::default()).unwrap_err();

    match err {
        IngestError::SheetNotFound { sheet, available, .. } => {
            assert_eq!(sheet, "Provider Time");
            assert_eq!(available, vec!["Notes", SHEET, "Shifted"]);
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn sheet_without_header_rows_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(dir.path());

    let err = read_sheet(&path, Some("Notes"), &SheetLayout::default()).unwrap_err();

    assert!(matches!(
        err,
        IngestError::NotEnoughHeaderRows {
            found: 1,
            expected: 4,
            ..
        }
    ));
}
