//! Workbook download.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Content types accepted as a spreadsheet download.
pub const SPREADSHEET_CONTENT_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/octet-stream",
];

/// Blocking HTTP client used for downloads.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build HTTP client")
}

/// Saved file name for a configured pattern: spaces become `_`, `.xlsx` is appended.
pub fn file_name_for_pattern(pattern: &str) -> String {
    format!("{}.xlsx", pattern.trim().replace(' ', "_"))
}

/// True if a `Content-Type` header value names a spreadsheet.
///
/// Parameters such as `; charset=...` are ignored.
pub fn is_spreadsheet_content_type(value: &str) -> bool {
    let media_type = value.split(';').next().unwrap_or_default().trim();
    SPREADSHEET_CONTENT_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(media_type))
}

/// Downloads `url` into `dest_dir/file_name`, creating the directory.
///
/// Fails on a non-success status or a response that is not a spreadsheet;
/// nothing is written in either case.
pub fn download_workbook(
    client: &Client,
    url: &str,
    dest_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let start = Instant::now();
    debug!(url, "requesting workbook");

    let response = client
        .get(url)
        .header(
            USER_AGENT,
            format!("tds/{}", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .with_context(|| format!("request {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("download of {url} failed with status {status}");
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !is_spreadsheet_content_type(&content_type) {
        bail!("unexpected content type '{content_type}' from {url}; not a spreadsheet");
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("read response body from {url}"))?;

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("create {}", dest_dir.display()))?;
    let path = dest_dir.join(file_name);
    std::fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "workbook downloaded"
    );
    Ok(path)
}
