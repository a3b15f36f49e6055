//! Polars export of record sets.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tds_model::NormalizedRecord;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::schema::RecordSchema;

/// Builds a string-typed frame with one column per record field.
///
/// `Null` becomes a polars null; `Missing` keeps its sentinel text.
pub fn records_to_dataframe(records: &[NormalizedRecord]) -> Result<DataFrame> {
    let Some(schema) = RecordSchema::infer(records)? else {
        return Ok(DataFrame::empty());
    };

    let mut values: Vec<Vec<Option<String>>> =
        vec![Vec::with_capacity(records.len()); schema.len()];
    for record in records {
        for (column, (_, value)) in values.iter_mut().zip(record.iter()) {
            column.push(value.as_text());
        }
    }

    let columns: Vec<Column> = schema
        .names()
        .zip(values)
        .map(|(name, column)| Column::new(name.into(), column))
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Writes records to a CSV file with a header row.
pub fn write_csv(path: &Path, records: &[NormalizedRecord]) -> Result<usize> {
    let mut df = records_to_dataframe(records)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(path = %path.display(), records = df.height(), "wrote CSV");
    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tds_model::RecordValue;

    #[test]
    fn test_records_to_dataframe() {
        let mut first = NormalizedRecord::new();
        first.push("county", RecordValue::from("Wake")).unwrap();
        first.push("st", RecordValue::Null).unwrap();
        first.push("time", RecordValue::Number(12.5)).unwrap();
        let mut second = NormalizedRecord::new();
        second.push("county", RecordValue::from("Durham")).unwrap();
        second.push("st", RecordValue::from("NC")).unwrap();
        second.push("time", RecordValue::Missing).unwrap();

        let df = records_to_dataframe(&[first, second]).unwrap();

        assert_eq!(df.shape(), (2, 3));
        let names: Vec<&str> = df
            .get_column_names()
            .into_iter()
            .map(PlSmallStr::as_str)
            .collect();
        assert_eq!(names, vec!["county", "st", "time"]);
        let time = df.column("time").unwrap().str().unwrap();
        assert_eq!(time.get(0), Some("12.5"));
        assert_eq!(time.get(1), Some("Missing"));
        let st = df.column("st").unwrap().str().unwrap();
        assert_eq!(st.get(0), None);
    }

    #[test]
    fn test_empty_records_give_empty_frame() {
        let df = records_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }
}
