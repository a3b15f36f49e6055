//! Data model for hierarchical-header time & distance sheets.
//!
//! This crate provides the types shared by the decoder, the reshape engine,
//! and the output sinks:
//! - [`RawTable`]: decoded sheet with three-level column labels
//! - [`ColumnLabel`] / [`CategoryKey`] / [`MeasurementKind`]: header vocabulary
//! - [`NormalizedRecord`]: flat, database-loadable output row
//! - [`ShapeError`]: structural violations of the table invariants
//!
//! # Example
//!
//! ```
//! use tds_model::{CellValue, ColumnLabel, RawTable};
//!
//! let labels = vec![
//!     ColumnLabel::new("COUNTY", "", ""),
//!     ColumnLabel::new("Cardiology", "123", "Time"),
//! ];
//! let rows = vec![vec![CellValue::text("Wake"), CellValue::Number(12.5)]];
//! let table = RawTable::new(labels, rows).unwrap();
//!
//! assert_eq!(table.height(), 1);
//! assert_eq!(table.width(), 2);
//! ```

mod error;
mod label;
mod record;
mod table;
mod value;

pub use error::{Result, ShapeError};
pub use label::{CategoryKey, ColumnLabel, HEADER_DEPTH, MeasurementKind};
pub use record::{
    NormalizedRecord, SPECIALTY_CODE_FIELD, SPECIALTY_DESCRIPTION_FIELD, normalize_field_name,
};
pub use table::RawTable;
pub use value::{CellValue, MISSING, RecordValue, format_numeric, parse_numeric};
