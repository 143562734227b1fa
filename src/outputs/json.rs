//! JSON dump of a finished crawl.
//!
//! The file holds the full [`CrawlResult`]: every record plus the page and
//! article totals, for consumers that want more than the CSV export.

use crate::models::CrawlResult;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `result` to `{output_dir}/{stem}.json` and return the path.
///
/// Creates `output_dir` when it does not exist yet.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_result(
    result: &CrawlResult,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = output_dir.join(format!("{stem}.json"));
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = result.total_articles, "Wrote JSON result");

    Ok(path)
}
