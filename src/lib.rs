//! # Blog Paginator
//!
//! Crawl a paginated blog listing in a headless browser, extract one record per
//! article (title, description, url, date, category) from every page, and
//! export the records as CSV.
//!
//! ## Architecture
//!
//! A run is a single, strictly sequential walk over the listing:
//! 1. **Launch**: Acquire one browser session ([`browser`])
//! 2. **Extract**: Read the articles of the current page ([`crawler::extractor`])
//! 3. **Advance**: Click "next" and detect whether the page changed ([`crawler::transition`])
//! 4. **Repeat** until the page cap, the last page, or a failure ([`crawler::engine`])
//! 5. **Export**: Write the accumulated records ([`outputs`])
//!
//! Progress and log entries are reported to an injected [`observer::CrawlObserver`].
//!
//! ## Usage
//!
//! ```ignore
//! let settings = CrawlSettings::new(10, 5)?;
//! let mut engine = PaginationEngine::new(LocatorConfig::default(), settings, ChromiumLauncher::default())?;
//! let outcome = engine.run(&mut NullObserver).await;
//! let csv = to_delimited_text(&outcome.result.articles)?;
//! ```

pub mod browser;
pub mod config;
pub mod crawler;
pub mod models;
pub mod observer;
pub mod outputs;
pub mod utils;

pub use browser::chromium::ChromiumLauncher;
pub use config::{ConfigError, CrawlSettings, LocatorConfig, Timeouts};
pub use crawler::{PaginationEngine, StopSignal};
pub use models::{ArticleRecord, CrawlOutcome, CrawlResult, LogEvent, ProgressEvent, RunState, Severity};
pub use observer::{CrawlObserver, NullObserver, RecordingObserver, TracingObserver};
pub use outputs::csv::{parse_delimited_text, to_delimited_text};
