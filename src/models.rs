//! Data models for scraped articles and crawl runs.
//!
//! This module defines the values that flow out of the pagination engine:
//! - [`ArticleRecord`]: One article extracted from a listing page
//! - [`CrawlResult`]: All records of a run plus page/article totals
//! - [`LogEvent`] and [`Severity`]: Human-readable run log entries
//! - [`ProgressEvent`]: Emitted once per completed page
//! - [`RunState`] and [`CrawlOutcome`]: Engine lifecycle and what a run hands back

use serde::{Deserialize, Serialize};
use std::fmt;

/// One article as extracted from a listing page.
///
/// Field order matches the export header: `title, description, url, date, category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The trimmed title text. Never empty.
    pub title: String,
    /// The description aligned by position with the title, or empty.
    pub description: String,
    /// The link read from the title element, or empty when it has none.
    pub url: String,
    /// The publish date text aligned by position with the title, or empty.
    pub date: String,
    /// The category label of the run, copied verbatim.
    pub category: String,
}

/// The accumulated output of one run.
///
/// Records keep extraction order. `total_articles` always equals
/// `articles.len()`; use [`CrawlResult::push_page`] to append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub articles: Vec<ArticleRecord>,
    pub total_pages: usize,
    pub total_articles: usize,
}

impl CrawlResult {
    /// Append one page worth of records and count the page.
    pub fn push_page(&mut self, records: Vec<ArticleRecord>) {
        self.articles.extend(records);
        self.total_articles = self.articles.len();
        self.total_pages += 1;
    }

    /// Mark the start page as visited even though nothing was extracted from it.
    pub(crate) fn ensure_start_page_counted(&mut self) {
        if self.total_pages == 0 {
            self.total_pages = 1;
        }
    }
}

/// Severity of a [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// A log line meant for whoever presents the run to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub severity: Severity,
}

impl LogEvent {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Emitted after each page has been extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// 1-based index of the page just completed.
    pub current_page: usize,
    /// Number of records accumulated so far, this page included.
    pub cumulative_count: usize,
}

/// Lifecycle of the pagination engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    /// Ended on the page cap, exhaustion, a load timeout or a stop request.
    Completed,
    /// Ended on a failure; the result holds whatever was extracted before it.
    Aborted,
}

/// Everything a finished run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlOutcome {
    pub state: RunState,
    pub result: CrawlResult,
    pub logs: Vec<LogEvent>,
}
