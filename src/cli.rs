//! Command-line interface definitions for Blog Paginator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Locators come from built-in defaults, optionally replaced by a YAML
//! profile, and finally by individual flags.

use blog_paginator::config::LocatorConfig;
use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Command-line arguments for the Blog Paginator application.
///
/// # Examples
///
/// ```sh
/// # Crawl the default listing, 10 pages at most
/// blog_paginator
///
/// # Another site, described by a locator profile
/// blog_paginator --profile ./profiles/acme.yaml -n 25 -o ./exports --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML locator profile (url, category, title, description, date, link, next_page)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Listing page to start from
    #[arg(short, long)]
    pub url: Option<String>,

    /// Category label copied onto every article
    #[arg(short, long)]
    pub category: Option<String>,

    /// Selector for article titles (text and href)
    #[arg(long)]
    pub title_locator: Option<String>,

    /// Selector for article descriptions
    #[arg(long)]
    pub description_locator: Option<String>,

    /// Selector for publish dates
    #[arg(long)]
    pub date_locator: Option<String>,

    /// Selector for the link container
    #[arg(long)]
    pub link_locator: Option<String>,

    /// Selector for the "next page" control
    #[arg(long)]
    pub next_locator: Option<String>,

    /// Maximum number of pages to crawl
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=50))]
    pub max_pages: u64,

    /// Seconds to wait between pages
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..=10))]
    pub delay: u64,

    /// Directory receiving the CSV (and JSON) export
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Chrome/Chromium binary to use instead of auto-detection
    #[arg(long, env = "CHROME_EXECUTABLE")]
    pub chrome_executable: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

impl Cli {
    /// Resolve the locator configuration: defaults, then profile, then flags.
    pub async fn locators(&self) -> Result<LocatorConfig, Box<dyn Error>> {
        let mut config = match self.profile {
            Some(ref path) => load_profile(path).await?,
            None => LocatorConfig::default(),
        };

        let overrides = [
            (&self.url, &mut config.url),
            (&self.category, &mut config.category),
            (&self.title_locator, &mut config.title),
            (&self.description_locator, &mut config.description),
            (&self.date_locator, &mut config.date),
            (&self.link_locator, &mut config.link),
            (&self.next_locator, &mut config.next_page),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        Ok(config)
    }
}

/// Load a YAML locator profile.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_profile(path: &Path) -> Result<LocatorConfig, Box<dyn Error>> {
    let text = tokio::fs::read_to_string(path).await?;
    let config: LocatorConfig = serde_yaml::from_str(&text)?;
    info!(url = %config.url, category = %config.category, "Loaded locator profile");
    Ok(config)
}
