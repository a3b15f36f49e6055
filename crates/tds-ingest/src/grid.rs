//! Raw cell grid → [`RawTable`] conversion shared by the CSV and workbook readers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tds_model::{CellValue, HEADER_DEPTH, RawTable, ShapeError};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::forward_fill_headers;

/// Where the header sits in a published sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Banner rows above the header (titles, footnotes).
    pub skip_rows: usize,
    /// Header rows forming each column label.
    pub header_rows: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            header_rows: HEADER_DEPTH,
        }
    }
}

/// Undecoded sheet contents, row-major, before header reconstruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Splits banner, header, and data rows and builds the table.
    ///
    /// Header cells are forward-filled across merged spans. Trailing columns
    /// with no header text and no data are dropped, as are fully empty data
    /// rows. Text data cells are re-parsed so numeric text becomes a number.
    pub fn into_table(self, path: &Path, layout: &SheetLayout) -> Result<RawTable> {
        let header_end = layout.skip_rows + layout.header_rows;
        if self.rows.len() < header_end {
            return Err(IngestError::NotEnoughHeaderRows {
                path: path.to_path_buf(),
                found: self.rows.len(),
                expected: header_end,
            });
        }

        let mut rows = self.rows.into_iter().skip(layout.skip_rows);
        let raw_headers: Vec<Vec<String>> = rows
            .by_ref()
            .take(layout.header_rows)
            .map(|row| row.iter().map(CellValue::as_text).collect())
            .collect();
        let data: Vec<Vec<CellValue>> = rows.collect();

        let width = used_width(&raw_headers, &data);
        let headers: Vec<Vec<String>> = forward_fill_headers(&raw_headers)
            .into_iter()
            .map(|mut level| {
                level.resize(width, String::new());
                level
            })
            .collect();

        let total = data.len();
        let mut table_rows = Vec::with_capacity(total);
        for (index, row) in data.into_iter().enumerate() {
            if row.iter().all(CellValue::is_empty) {
                continue;
            }
            table_rows.push(fit_row(row, width, index).map_err(|source| shape(path, source))?);
        }
        debug!(
            path = %path.display(),
            columns = width,
            rows = table_rows.len(),
            empty_rows = total - table_rows.len(),
            "decoded sheet"
        );

        RawTable::from_header_rows(&headers, table_rows).map_err(|source| shape(path, source))
    }
}

fn shape(path: &Path, source: ShapeError) -> IngestError {
    IngestError::Shape {
        path: PathBuf::from(path),
        source,
    }
}

/// Width up to the last column carrying header text or data.
fn used_width(headers: &[Vec<String>], data: &[Vec<CellValue>]) -> usize {
    let header_width = headers
        .iter()
        .filter_map(|row| row.iter().rposition(|cell| !cell.trim().is_empty()))
        .max()
        .map_or(0, |last| last + 1);
    let data_width = data
        .iter()
        .filter_map(|row| row.iter().rposition(|cell| !cell.is_empty()))
        .max()
        .map_or(0, |last| last + 1);
    header_width.max(data_width)
}

/// Pads or trims a data row to `width`, parsing numeric text.
fn fit_row(
    row: Vec<CellValue>,
    width: usize,
    index: usize,
) -> std::result::Result<Vec<CellValue>, ShapeError> {
    let found = row.len();
    let mut cells: Vec<CellValue> = row
        .into_iter()
        .map(|cell| match cell {
            CellValue::Text(text) => CellValue::parse(&text),
            other => other,
        })
        .collect();
    if cells.len() > width {
        if cells[width..].iter().any(|cell| !cell.is_empty()) {
            return Err(ShapeError::RowWidth {
                row: index,
                found,
                expected: width,
            });
        }
        cells.truncate(width);
    }
    cells.resize(width, CellValue::Empty);
    Ok(cells)
}
