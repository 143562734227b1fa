//! Locator configuration and crawl settings.
//!
//! A [`LocatorConfig`] names the target listing and the CSS selectors used to
//! pick fields out of it. [`CrawlSettings`] bounds a run (page cap, delay
//! between pages) and carries the [`Timeouts`] used by the waits. Both are
//! validated before an engine is built, so no rule is ever blank once a run
//! starts.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Allowed values for [`CrawlSettings::max_pages`].
pub const MAX_PAGES_RANGE: RangeInclusive<usize> = 1..=50;
/// Allowed values, in seconds, for [`CrawlSettings::delay`].
pub const DELAY_SECONDS_RANGE: RangeInclusive<u64> = 1..=10;

/// Configuration errors raised before a run can start.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{0}` must not be blank")]
    Blank(&'static str),

    #[error("invalid target url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("max pages must be within {min}..={max}, got {got}", min = MAX_PAGES_RANGE.start(), max = MAX_PAGES_RANGE.end())]
    MaxPagesOutOfRange { got: usize },

    #[error("delay must be within {min}..={max} seconds, got {got}", min = DELAY_SECONDS_RANGE.start(), max = DELAY_SECONDS_RANGE.end())]
    DelayOutOfRange { got: u64 },
}

/// Where to crawl and how to find each field on a listing page.
///
/// Field names double as the keys of a YAML locator profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// The first listing page.
    pub url: String,
    /// Free-text tag copied onto every record.
    pub category: String,
    /// Elements whose text is the article title and whose `href` is its link.
    pub title: String,
    /// Elements holding descriptions, aligned to titles by position.
    pub description: String,
    /// Elements holding publish dates, aligned to titles by position.
    pub date: String,
    /// Link container rule. Validated and reported, links are read from the title elements.
    pub link: String,
    /// The "next page" control.
    pub next_page: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            url: "https://www.therapixel.fr/blog/".to_string(),
            category: "medical".to_string(),
            title: "h3 > a".to_string(),
            description: ".entry-content > p".to_string(),
            date: ".entry-date".to_string(),
            link: ".entry-image > a".to_string(),
            next_page: ".pagination .page-next".to_string(),
        }
    }
}

impl LocatorConfig {
    /// Check that every field is present and the URL is absolute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, &str); 7] = [
            ("url", &self.url),
            ("category", &self.category),
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("link", &self.link),
            ("next_page", &self.next_page),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Blank(name));
            }
        }

        Url::parse(self.url.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Bounds on the waits performed while crawling.
///
/// URL and title change detection is a heuristic: a page slower than
/// `url_change + title_change` to swap its content is reported as "no change".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// How long a page may take to show its first title element.
    pub content_load: Duration,
    /// How long to wait for the URL to change after clicking "next".
    pub url_change: Duration,
    /// How long to then wait for the first title to change.
    pub title_change: Duration,
    /// Pause between two probes of a wait condition.
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            content_load: Duration::from_secs(10),
            url_change: Duration::from_secs(3),
            title_change: Duration::from_secs(3),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Per-run limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    pub max_pages: usize,
    /// Pause after each successful page transition.
    pub delay: Duration,
    pub timeouts: Timeouts,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages: 10,
            delay: Duration::from_secs(5),
            timeouts: Timeouts::default(),
        }
    }
}

impl CrawlSettings {
    /// Build settings from the user-facing knobs, rejecting out-of-range values.
    pub fn new(max_pages: usize, delay_seconds: u64) -> Result<Self, ConfigError> {
        if !MAX_PAGES_RANGE.contains(&max_pages) {
            return Err(ConfigError::MaxPagesOutOfRange { got: max_pages });
        }
        if !DELAY_SECONDS_RANGE.contains(&delay_seconds) {
            return Err(ConfigError::DelayOutOfRange { got: delay_seconds });
        }
        Ok(Self {
            max_pages,
            delay: Duration::from_secs(delay_seconds),
            timeouts: Timeouts::default(),
        })
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}
