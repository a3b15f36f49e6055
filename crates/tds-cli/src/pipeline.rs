//! Decode → reshape → persist stages shared by the CLI commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tds_ingest::{SheetLayout, read_sheet};
use tds_model::{NormalizedRecord, RawTable};
use tds_output::{RecordSink, SqliteSink, write_csv};
use tds_transform::{CategoryPolicy, HeaderLayout, classify_header, reshape_table};
use tracing::{info, info_span};

/// Where reshaped records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Sqlite { database: PathBuf, table: String },
    Csv(PathBuf),
    /// Reshape only.
    None,
}

impl Destination {
    pub fn describe(&self) -> String {
        match self {
            Self::Sqlite { database, table } => format!("{}#{table}", database.display()),
            Self::Csv(path) => path.display().to_string(),
            Self::None => "-".to_string(),
        }
    }
}

/// Inputs for one reshape run.
#[derive(Debug, Clone)]
pub struct ReshapeRequest<'a> {
    pub input: &'a Path,
    /// Required for workbooks.
    pub sheet: Option<&'a str>,
    pub layout: SheetLayout,
    pub metadata_keys: &'a [String],
    pub policy: CategoryPolicy,
}

/// A decoded table with its header classification.
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub table: RawTable,
    pub header: HeaderLayout,
}

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub policy: CategoryPolicy,
    pub rows: usize,
    pub columns: usize,
    pub metadata_keys: Vec<String>,
    pub categories: usize,
    pub records: usize,
    pub destination: String,
    pub written: usize,
}

/// Reads the sheet and classifies its header.
pub fn decode(
    input: &Path,
    sheet: Option<&str>,
    layout: &SheetLayout,
    metadata_keys: &[String],
) -> Result<DecodedSheet> {
    let span = info_span!("decode", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_sheet(input, sheet, layout)
        .with_context(|| format!("decode {}", input.display()))?;
    let header = classify_header(&table, metadata_keys);
    info!(
        rows = table.height(),
        columns = table.width(),
        metadata_keys = header.metadata.len(),
        measurements = header.measurements.len(),
        ignored = header.ignored.len(),
        duration_ms = start.elapsed().as_millis(),
        "sheet decoded"
    );
    Ok(DecodedSheet { table, header })
}

/// Decodes and reshapes a sheet.
pub fn load_and_reshape(
    request: &ReshapeRequest<'_>,
) -> Result<(DecodedSheet, Vec<NormalizedRecord>)> {
    let decoded = decode(
        request.input,
        request.sheet,
        &request.layout,
        request.metadata_keys,
    )?;

    let records = reshape_table(&decoded.table, &decoded.header, request.policy)
        .with_context(|| format!("reshape {}", request.input.display()))?;
    Ok((decoded, records))
}

/// Writes records to `destination`, replacing previous contents.
pub fn persist(records: &[NormalizedRecord], destination: &Destination) -> Result<usize> {
    match destination {
        Destination::Sqlite { database, table } => {
            let mut sink = SqliteSink::open(database)
                .with_context(|| format!("open database {}", database.display()))?;
            sink.replace_all(table, records)
                .with_context(|| format!("replace table {table} in {}", database.display()))
        }
        Destination::Csv(path) => {
            write_csv(path, records).with_context(|| format!("write {}", path.display()))
        }
        Destination::None => Ok(0),
    }
}

/// Full local pipeline: decode, reshape, persist.
pub fn run_local(
    request: &ReshapeRequest<'_>,
    destination: &Destination,
) -> Result<PipelineSummary> {
    let (decoded, records) = load_and_reshape(request)?;
    let written = persist(&records, destination)?;

    Ok(PipelineSummary {
        input: request.input.to_path_buf(),
        sheet: request.sheet.map(str::to_string),
        policy: request.policy,
        rows: decoded.table.height(),
        columns: decoded.table.width(),
        metadata_keys: decoded.header.metadata.keys().map(str::to_string).collect(),
        categories: decoded.header.categories().len(),
        records: records.len(),
        destination: destination.describe(),
        written,
    })
}
