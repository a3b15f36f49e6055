//! Delimited (CSV) sheet reading.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use tds_model::{CellValue, RawTable};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::grid::{SheetGrid, SheetLayout};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes file bytes as text, returning the encoding name used.
///
/// Valid UTF-8 (with or without a BOM) is borrowed as-is. Anything else is
/// decoded as Windows-1252 unless a UTF-16 BOM says otherwise.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return (Cow::Borrowed(text), UTF_8.name());
    }
    let (text, encoding, _) = WINDOWS_1252.decode(bytes);
    (text, encoding.name())
}

/// Reads a CSV export of a published sheet.
///
/// The file has no header handling of its own: every physical record becomes
/// a grid row and [`SheetLayout`] decides which rows form the header.
pub fn read_csv_sheet(path: &Path, layout: &SheetLayout) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::file(path, source))?;
    let (text, encoding) = decode_text(&bytes);
    if encoding != UTF_8.name() {
        warn!(path = %path.display(), encoding, "CSV is not UTF-8, decoded with fallback");
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(CellValue::text).collect::<Vec<_>>());
    }
    debug!(path = %path.display(), encoding, rows = rows.len(), "read CSV records");

    SheetGrid::new(rows).into_table(path, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let (text, encoding) = decode_text(b"\xEF\xBB\xBFCOUNTY,ST");
        assert_eq!(text, "COUNTY,ST");
        assert_eq!(encoding, "UTF-8");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Doña Ana" with 0xF1 for n-tilde.
        let (text, encoding) = decode_text(b"Do\xF1a Ana");
        assert_eq!(text, "Do\u{f1}a Ana");
        assert_eq!(encoding, "windows-1252");
    }
}
