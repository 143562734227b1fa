//! Mutable state of a single run.

use crate::models::{CrawlOutcome, CrawlResult, LogEvent, ProgressEvent, RunState, Severity};
use crate::observer::CrawlObserver;

/// Accumulator threaded through every step of one run.
///
/// Log entries are appended here and forwarded to the observer in the same
/// call, so the observer sees exactly the sequence the caller gets back.
pub struct RunContext<'o, O: CrawlObserver + ?Sized> {
    observer: &'o mut O,
    pub(crate) result: CrawlResult,
    logs: Vec<LogEvent>,
    start_loaded: bool,
}

impl<'o, O: CrawlObserver + ?Sized> RunContext<'o, O> {
    pub fn new(observer: &'o mut O) -> Self {
        Self {
            observer,
            result: CrawlResult::default(),
            logs: Vec::new(),
            start_loaded: false,
        }
    }

    pub fn log(&mut self, severity: Severity, message: impl Into<String>) {
        let event = LogEvent::new(message, severity);
        self.observer.on_log(&event);
        self.logs.push(event);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.log(Severity::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    /// Report that `current_page` is done, with the running record count.
    pub fn progress(&mut self, current_page: usize) {
        let event = ProgressEvent {
            current_page,
            cumulative_count: self.result.total_articles,
        };
        self.observer.on_progress(&event);
    }

    /// Page 1 has begun; from here on the run counts at least one page.
    pub(crate) fn mark_start_loaded(&mut self) {
        self.start_loaded = true;
    }

    /// Apply the start-page minimum so the summary and the result agree.
    pub(crate) fn settle(&mut self) {
        if self.start_loaded {
            self.result.ensure_start_page_counted();
        }
    }

    pub fn result(&self) -> &CrawlResult {
        &self.result
    }

    pub fn logs(&self) -> &[LogEvent] {
        &self.logs
    }

    /// Freeze the run into what the caller gets back.
    pub fn finish(mut self, state: RunState) -> CrawlOutcome {
        self.settle();
        CrawlOutcome {
            state,
            result: self.result,
            logs: self.logs,
        }
    }
}
