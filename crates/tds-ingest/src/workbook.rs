//! Spreadsheet workbook reading (xlsx, xls, xlsb, ods).

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use tds_model::{CellValue, RawTable};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::grid::{SheetGrid, SheetLayout};

fn open(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>> {
    std::fs::metadata(path).map_err(|source| IngestError::file(path, source))?;
    open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Sheet names in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    Ok(open(path)?.sheet_names())
}

/// Reads one named sheet of a workbook.
///
/// Cells left of or above the used range are materialized as empty so row and
/// column positions match what the sheet shows.
pub fn read_workbook_sheet(path: &Path, sheet: &str, layout: &SheetLayout) -> Result<RawTable> {
    let mut workbook = open(path)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(IngestError::SheetNotFound {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: format!("failed to read sheet '{sheet}': {e}"),
        })?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_value));
        rows.push(cells);
    }
    debug!(
        path = %path.display(),
        sheet,
        rows = rows.len(),
        "read workbook sheet"
    );

    SheetGrid::new(rows).into_table(path, layout)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => CellValue::text(text.as_str()),
        Data::Float(number) => CellValue::from(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Text(if *flag { "TRUE" } else { "FALSE" }.to_string()),
        // Serial date number, 1900 system.
        Data::DateTime(datetime) => CellValue::Number(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::text(text.as_str()),
    }
}
