use std::path::PathBuf;

use anyhow::{Context, Result};
use tds_cli::config::Config;
use tds_cli::fetch::{build_client, download_workbook};
use tds_cli::pipeline::{
    DecodedSheet, Destination, PipelineSummary, ReshapeRequest, decode, run_local,
};
use tds_ingest::{SheetLayout, is_workbook, list_sheets};
use tds_transform::DEFAULT_METADATA_KEYS;
use tracing::{info, info_span, warn};

use crate::cli::{InspectArgs, ReshapeArgs, RunArgs};

/// Result of `tds inspect`.
pub enum Inspection {
    /// Workbook given without a sheet.
    Sheets { input: PathBuf, sheets: Vec<String> },
    Header(Box<DecodedSheet>),
}

pub fn run_config(args: &RunArgs) -> Result<PipelineSummary> {
    let config = Config::load(&args.config)?;
    let span = info_span!("run", config = %args.config.display());
    let _guard = span.enter();

    let workbook = config.download_dir.join(config.file_name());
    if args.skip_download {
        info!(path = %workbook.display(), "using existing workbook");
    } else {
        let client = build_client()?;
        download_workbook(&client, &config.url, &config.download_dir, &config.file_name())?;
    }

    let request = ReshapeRequest {
        input: &workbook,
        sheet: Some(config.sheet()),
        layout: config.layout,
        metadata_keys: &config.metadata_keys,
        policy: config.policy,
    };
    let destination = Destination::Sqlite {
        database: config.output.database.clone(),
        table: config.output.table.clone(),
    };
    run_local(&request, &destination)
}

pub fn run_reshape(args: &ReshapeArgs) -> Result<PipelineSummary> {
    let metadata_keys = metadata_keys_or_default(&args.metadata_keys);
    let request = ReshapeRequest {
        input: &args.input,
        sheet: args.sheet.as_deref(),
        layout: layout_with_skip(args.skip_rows),
        metadata_keys: &metadata_keys,
        policy: args.policy.into(),
    };
    let destination = match (&args.database, &args.csv) {
        (Some(database), _) => Destination::Sqlite {
            database: database.clone(),
            table: args.table.clone(),
        },
        (None, Some(path)) => Destination::Csv(path.clone()),
        (None, None) => {
            warn!("no --database or --csv given; records are not stored");
            Destination::None
        }
    };
    run_local(&request, &destination)
}

pub fn run_inspect(args: &InspectArgs) -> Result<Inspection> {
    if is_workbook(&args.input) && args.sheet.is_none() {
        let sheets = list_sheets(&args.input)
            .with_context(|| format!("list sheets in {}", args.input.display()))?;
        return Ok(Inspection::Sheets {
            input: args.input.clone(),
            sheets,
        });
    }
    let metadata_keys = metadata_keys_or_default(&[]);
    let decoded = decode(
        &args.input,
        args.sheet.as_deref(),
        &layout_with_skip(args.skip_rows),
        &metadata_keys,
    )?;
    Ok(Inspection::Header(Box::new(decoded)))
}

fn metadata_keys_or_default(keys: &[String]) -> Vec<String> {
    if keys.is_empty() {
        DEFAULT_METADATA_KEYS.map(String::from).to_vec()
    } else {
        keys.to_vec()
    }
}

fn layout_with_skip(skip_rows: usize) -> SheetLayout {
    SheetLayout {
        skip_rows,
        ..SheetLayout::default()
    }
}
