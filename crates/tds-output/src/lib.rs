//! Output sinks for normalized time & distance records.
//!
//! - [`SqliteSink`]: full-refresh SQLite tables (drop, create, insert in one
//!   transaction)
//! - [`write_csv`] / [`records_to_dataframe`]: polars-based export

mod error;
mod frame;
mod schema;
mod sink;
mod sqlite;

pub use error::{OutputError, Result};
pub use frame::{records_to_dataframe, write_csv};
pub use schema::{ColumnType, RecordSchema};
pub use sink::RecordSink;
pub use sqlite::{SqliteSink, quote_ident};
