//! # Blog Paginator
//!
//! Command-line front end for the pagination crawler. It resolves the locator
//! configuration, runs one crawl in a headless Chromium, mirrors the run log
//! into `tracing`, and writes the export files.
//!
//! ## Usage
//!
//! ```sh
//! blog_paginator -n 20 -d 3 -o ./exports --json
//! ```
//!
//! Press Ctrl-C to stop after the current page; the records gathered so far
//! are still exported.

use blog_paginator::outputs::{csv, json};
use blog_paginator::utils::{ensure_writable_dir, export_file_stem, truncate_for_log};
use blog_paginator::{ChromiumLauncher, CrawlSettings, PaginationEngine, TracingObserver};
use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

/// How many of the last articles to echo once the run is over.
const PREVIEW_COUNT: usize = 5;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("blog_paginator starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: fail before spending minutes in the browser
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let locators = args.locators().await?;
    let settings = CrawlSettings::new(args.max_pages as usize, args.delay)?;
    let launcher = ChromiumLauncher {
        executable: args.chrome_executable.clone(),
        headful: args.headful,
        ..ChromiumLauncher::default()
    };
    let mut engine = PaginationEngine::new(locators, settings, launcher)?;

    let (locators, settings) = (engine.locators(), engine.settings());
    info!(
        url = %locators.url,
        category = %locators.category,
        title = %locators.title,
        description = %locators.description,
        date = %locators.date,
        link = %locators.link,
        next_page = %locators.next_page,
        max_pages = settings.max_pages,
        delay_secs = settings.delay.as_secs(),
        "Resolved crawl configuration"
    );
    let mut observer = TracingObserver {
        max_pages: settings.max_pages,
    };

    let stop = engine.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received; stopping after the current page");
            stop.raise();
        }
    });

    let outcome = engine.run(&mut observer).await;
    let result = &outcome.result;

    let preview_from = result.articles.len().saturating_sub(PREVIEW_COUNT);
    for article in &result.articles[preview_from..] {
        info!(date = %article.date, "{}", truncate_for_log(&article.title, 120));
    }

    // ---- Export ----
    let stem = export_file_stem(&Local::now());
    let csv_path = csv::write_csv(&result.articles, &args.output_dir, &stem).await?;
    info!(path = %csv_path.display(), articles = result.total_articles, "CSV export ready");

    if args.json {
        if let Err(e) = json::write_result(result, &args.output_dir, &stem).await {
            error!(error = %e, "Failed to write JSON result");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        state = ?outcome.state,
        pages = result.total_pages,
        articles = result.total_articles,
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
