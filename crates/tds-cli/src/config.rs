//! JSON pipeline configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tds_ingest::SheetLayout;
use tds_transform::{CategoryPolicy, DEFAULT_METADATA_KEYS};

use crate::fetch::file_name_for_pattern;

/// Sheet holding the provider time & distance standards.
pub const DEFAULT_SHEET: &str = "Provider Time & Distance";
pub const DEFAULT_FILE_PATTERN: &str = "Provider Time Distance";
pub const DEFAULT_DATABASE: &str = "time_distance.db";
pub const DEFAULT_TABLE: &str = "time_distance_data";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Settings for a `tds run` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workbook download URL.
    pub url: String,
    /// Base name of the saved workbook; spaces become underscores.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default)]
    pub sheets: SheetNames,
    #[serde(default)]
    pub layout: SheetLayout,
    #[serde(default = "default_metadata_keys")]
    pub metadata_keys: Vec<String>,
    #[serde(default)]
    pub policy: CategoryPolicy,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNames {
    #[serde(default = "default_sheet")]
    pub provider_time_distance: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            provider_time_distance: default_sheet(),
        }
    }
}

/// SQLite destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            table: default_table(),
        }
    }
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_sheet() -> String {
    DEFAULT_SHEET.to_string()
}

fn default_metadata_keys() -> Vec<String> {
    DEFAULT_METADATA_KEYS.map(String::from).to_vec()
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOAD_DIR)
}

impl Config {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("url must not be empty");
        }
        if self.file_pattern.trim().is_empty() {
            bail!("file_pattern must not be empty");
        }
        if self.output.table.trim().is_empty() {
            bail!("output.table must not be empty");
        }
        if self.layout.header_rows != tds_model::HEADER_DEPTH {
            bail!(
                "layout.header_rows must be {}, got {}",
                tds_model::HEADER_DEPTH,
                self.layout.header_rows
            );
        }
        Ok(())
    }

    /// File name the workbook is saved under.
    pub fn file_name(&self) -> String {
        file_name_for_pattern(&self.file_pattern)
    }

    pub fn sheet(&self) -> &str {
        &self.sheets.provider_time_distance
    }
}
