//! SQLite full-refresh sink.

use std::path::Path;
use std::time::Instant;

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tds_model::{NormalizedRecord, RecordValue, format_numeric};
use tracing::{debug, info, info_span};

use crate::error::{OutputError, Result};
use crate::schema::{ColumnType, RecordSchema};
use crate::sink::RecordSink;

/// Writes record sets into SQLite tables, replacing each table wholesale.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordSink for SqliteSink {
    /// Drops `table`, recreates it from the records' schema, and inserts every
    /// record, all in one transaction. An empty record set only drops the table.
    fn replace_all(&mut self, table: &str, records: &[NormalizedRecord]) -> Result<usize> {
        if table.trim().is_empty() {
            return Err(OutputError::EmptyTableName);
        }
        let _span = info_span!("persist", table, records = records.len()).entered();
        let start = Instant::now();
        let schema = RecordSchema::infer(records)?;

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])?;

        let Some(schema) = schema else {
            tx.commit()?;
            info!(table, "no records, table dropped");
            return Ok(0);
        };

        tx.execute(&create_table_sql(table, &schema), [])?;
        debug!(table, columns = schema.len(), "created table");
        {
            let mut stmt = tx.prepare(&insert_sql(table, &schema))?;
            for record in records {
                let values = schema
                    .columns
                    .iter()
                    .zip(record.iter())
                    .map(|((_, kind), (_, value))| sql_value(value, *kind));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(
            table,
            records = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "table replaced"
        );
        Ok(records.len())
    }
}

/// Numbers in TEXT columns are bound in their display form, as the CSV export
/// writes them.
fn sql_value(value: &RecordValue, kind: ColumnType) -> Value {
    match (value, kind) {
        (RecordValue::Null, _) => Value::Null,
        (RecordValue::Number(number), ColumnType::Real) => Value::Real(*number),
        (RecordValue::Number(number), ColumnType::Text) => Value::Text(format_numeric(*number)),
        (other, _) => other.as_text().map_or(Value::Null, Value::Text),
    }
}

/// Double-quotes an SQL identifier, escaping embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn create_table_sql(table: &str, schema: &RecordSchema) -> String {
    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|(name, kind)| format!("{} {}", quote_ident(name), kind.sql()))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", "))
}

fn insert_sql(table: &str, schema: &RecordSchema) -> String {
    let names: Vec<String> = schema.names().map(quote_ident).collect();
    let placeholders = vec!["?"; schema.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        placeholders
    )
}
