//! Record sink abstraction.

use tds_model::NormalizedRecord;

use crate::error::Result;

/// Destination for reshaped records.
///
/// Every call replaces the whole table: previous contents are discarded.
pub trait RecordSink {
    /// Replaces `table` with `records`, returning the number of rows written.
    fn replace_all(&mut self, table: &str, records: &[NormalizedRecord]) -> Result<usize>;
}
