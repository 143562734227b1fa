//! Sinks for the events a crawl emits while it runs.
//!
//! The engine calls an injected [`CrawlObserver`] synchronously from its loop.
//! Front ends implement it to surface status; any buffering or throttling is
//! their business.

use crate::models::{LogEvent, ProgressEvent, Severity};
use tracing::{error, info, warn};

/// Receives run events as they happen.
pub trait CrawlObserver {
    /// A new entry was appended to the run log.
    fn on_log(&mut self, _event: &LogEvent) {}

    /// A page finished extracting.
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}

/// Ignores everything.
pub struct NullObserver;
impl CrawlObserver for NullObserver {}

/// Mirrors run events into `tracing`.
///
/// `success` entries are logged at `INFO` with `outcome = "success"`.
pub struct TracingObserver {
    /// Page cap of the run, shown next to the current page.
    pub max_pages: usize,
}

impl CrawlObserver for TracingObserver {
    fn on_log(&mut self, event: &LogEvent) {
        match event.severity {
            Severity::Info => info!(target: "crawl", "{}", event.message),
            Severity::Success => info!(target: "crawl", outcome = "success", "{}", event.message),
            Severity::Warning => warn!(target: "crawl", "{}", event.message),
            Severity::Error => error!(target: "crawl", "{}", event.message),
        }
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        info!(
            target: "crawl",
            page = event.current_page,
            max_pages = self.max_pages,
            articles = event.cumulative_count,
            "Page {}/{} - {} articles found",
            event.current_page,
            self.max_pages,
            event.cumulative_count
        );
    }
}

/// Keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub logs: Vec<LogEvent>,
    pub progress: Vec<ProgressEvent>,
}

impl CrawlObserver for RecordingObserver {
    fn on_log(&mut self, event: &LogEvent) {
        self.logs.push(event.clone());
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        self.progress.push(*event);
    }
}
