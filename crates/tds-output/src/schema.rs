//! Column layout shared by every sink.

use tds_model::{NormalizedRecord, RecordValue};

use crate::error::{OutputError, Result};

/// Storage type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every value is a number or null.
    Real,
    Text,
}

impl ColumnType {
    pub fn sql(self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

/// Ordered output columns derived from a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub columns: Vec<(String, ColumnType)>,
}

impl RecordSchema {
    /// Derives the schema from the first record and checks the rest against it.
    ///
    /// Returns `None` for an empty record set.
    pub fn infer(records: &[NormalizedRecord]) -> Result<Option<Self>> {
        let Some(first) = records.first() else {
            return Ok(None);
        };
        let names: Vec<&str> = first.field_names().collect();
        let mut numeric = vec![true; names.len()];

        for (index, record) in records.iter().enumerate() {
            if !record.field_names().eq(names.iter().copied()) {
                return Err(OutputError::SchemaMismatch {
                    record: index,
                    expected: names.iter().map(|name| (*name).to_string()).collect(),
                    found: record.field_names().map(str::to_string).collect(),
                });
            }
            for (flag, (_, value)) in numeric.iter_mut().zip(record.iter()) {
                *flag &= matches!(value, RecordValue::Number(_) | RecordValue::Null);
            }
        }

        let columns = names
            .into_iter()
            .zip(numeric)
            .map(|(name, is_numeric)| {
                let kind = if is_numeric {
                    ColumnType::Real
                } else {
                    ColumnType::Text
                };
                (name.to_string(), kind)
            })
            .collect();
        Ok(Some(Self { columns }))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
