//! Decoded sheet with hierarchical column labels.

use crate::error::{Result, ShapeError};
use crate::label::ColumnLabel;
use crate::value::CellValue;

/// A decoded sheet: ordered column labels plus ordered rows of cells.
///
/// Every row has exactly one cell per label; [`RawTable::new`] enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    labels: Vec<ColumnLabel>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(labels: Vec<ColumnLabel>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        if labels.is_empty() {
            return Err(ShapeError::NoColumns);
        }
        let expected = labels.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(ShapeError::RowWidth {
                row,
                found: cells.len(),
                expected,
            });
        }
        Ok(Self { labels, rows })
    }

    /// Builds labels column-by-column from header rows (one `Vec` per header level).
    ///
    /// Every header row must be as wide as the widest one; the number of header
    /// rows must equal [`HEADER_DEPTH`](crate::HEADER_DEPTH).
    pub fn from_header_rows(
        header_rows: &[Vec<String>],
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let width = header_rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut labels = Vec::with_capacity(width);
        for column in 0..width {
            let levels: Vec<&str> = header_rows
                .iter()
                .map(|row| row.get(column).map_or("", String::as_str))
                .collect();
            labels.push(ColumnLabel::from_levels(column, &levels)?);
        }
        Self::new(labels, rows)
    }

    pub fn labels(&self) -> &[ColumnLabel] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    /// Position of the first column carrying `label`.
    pub fn position(&self, label: &ColumnLabel) -> Option<usize> {
        self.labels.iter().position(|candidate| candidate == label)
    }

    /// Cell at (`row`, `label`), if both exist.
    pub fn cell(&self, row: usize, label: &ColumnLabel) -> Option<&CellValue> {
        let column = self.position(label)?;
        self.rows.get(row)?.get(column)
    }
}
