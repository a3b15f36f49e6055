//! Header-normalizing reshape engine.
//!
//! Takes a [`RawTable`] whose columns carry three-level labels
//! (category description, category code, measurement kind) next to a block
//! of geography metadata columns, and flattens it into
//! [`NormalizedRecord`]s carrying the metadata plus one value per
//! [`MeasurementKind`].
//!
//! # Overview
//!
//! - **Header classification**: [`classify`] / [`classify_header`] split columns
//!   into metadata columns and measurement columns.
//! - **Row reshaping**: [`reshape`] emits records according to a
//!   [`CategoryPolicy`].
//!
//! # Example
//!
//! ```
//! use tds_model::{CellValue, ColumnLabel, RawTable};
//! use tds_transform::{CategoryPolicy, classify, reshape};
//!
//! let table = RawTable::new(
//!     vec![
//!         ColumnLabel::new("COUNTY", "", ""),
//!         ColumnLabel::new("Cardiology", "123", "Time"),
//!         ColumnLabel::new("Cardiology", "123", "Distance"),
//!     ],
//!     vec![vec![CellValue::text("Wake"), CellValue::Number(12.5), CellValue::Empty]],
//! )
//! .unwrap();
//!
//! let metadata = classify(&table, &["COUNTY"]);
//! let records = reshape(&table, &metadata, CategoryPolicy::PerCategory).unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("distance").unwrap().to_string(), "Missing");
//! ```

mod classify;
mod reshape;

pub use classify::{
    DEFAULT_METADATA_KEYS, EntityMetadataMap, HeaderLayout, MeasurementColumn, MetadataColumn,
    classify, classify_header,
};
pub use reshape::{CategoryPolicy, reshape, reshape_table};

pub use tds_model::{Result, ShapeError};
