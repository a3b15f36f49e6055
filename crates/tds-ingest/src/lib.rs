//! Sheet decoding utilities.
//!
//! This crate turns published spreadsheet files into [`RawTable`]s with
//! three-level column labels, ready for the reshape engine.
//!
//! # Features
//!
//! - **CSV Loading**: UTF-8 with Windows-1252 fallback, banner rows skipped
//! - **Workbook Loading**: XLSX/XLS/XLSB/ODS sheets selected by name
//! - **Header Reconstruction**: merged header cells forward-filled per level
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tds_ingest::{SheetLayout, read_sheet};
//!
//! let table = read_sheet(
//!     Path::new("downloads/Provider_Time_Distance.xlsx"),
//!     Some("Provider Time & Distance"),
//!     &SheetLayout::default(),
//! )?;
//! ```

mod delimited;
mod error;
mod grid;
mod header;
mod workbook;

use std::path::Path;

use tds_model::RawTable;

// === Error Types ===
pub use error::{IngestError, Result};

// === Layout / Headers ===
pub use grid::{SheetGrid, SheetLayout};
pub use header::{forward_fill_headers, normalize_header};

// === Readers ===
pub use delimited::{decode_text, read_csv_sheet};
pub use workbook::{list_sheets, read_workbook_sheet};

/// File extensions opened through the workbook reader.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads `path` as a workbook or CSV depending on its extension.
///
/// `sheet` is required for workbooks and ignored for CSV files.
pub fn read_sheet(path: &Path, sheet: Option<&str>, layout: &SheetLayout) -> Result<RawTable> {
    if is_workbook(path) {
        let sheet = sheet.ok_or_else(|| IngestError::SheetRequired {
            path: path.to_path_buf(),
        })?;
        read_workbook_sheet(path, sheet, layout)
    } else {
        read_csv_sheet(path, layout)
    }
}

/// True if the extension names a workbook format.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
}
