//! Bounded waits on page conditions.
//!
//! A wait probes its condition, sleeps for the poll interval and probes again
//! until the condition holds or the timeout elapses. A probe that hangs is cut
//! off by the same timeout.

use crate::browser::{DriverError, PageDriver};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;

/// Something a page can be waited on for.
#[derive(Debug, Clone, Copy)]
pub enum Condition<'a> {
    /// At least one element matches the selector.
    AnyMatch(&'a str),
    /// The page URL is no longer `previous`.
    UrlDiffers(&'a str),
    /// The first element matching `selector` has non-empty text other than `previous`.
    FirstTextDiffers { selector: &'a str, previous: &'a str },
}

impl Condition<'_> {
    async fn holds<P: PageDriver>(&self, page: &mut P) -> Result<bool, DriverError> {
        match *self {
            Condition::AnyMatch(selector) => Ok(page.count(selector).await? > 0),
            Condition::UrlDiffers(previous) => Ok(page.current_url().await? != previous),
            Condition::FirstTextDiffers { selector, previous } => {
                Ok(match page.first_text(selector).await? {
                    Some(text) => {
                        let text = text.trim();
                        !text.is_empty() && text != previous
                    }
                    None => false,
                })
            }
        }
    }
}

/// Wait until `condition` holds on `page`, for at most `limit`.
///
/// Returns `Ok(false)` on timeout; driver failures are passed through.
pub async fn wait_for<P: PageDriver>(
    page: &mut P,
    condition: Condition<'_>,
    limit: Duration,
    poll: Duration,
) -> Result<bool, DriverError> {
    let polled = timeout(limit, async {
        loop {
            if condition.holds(page).await? {
                return Ok::<bool, DriverError>(true);
            }
            sleep(poll).await;
        }
    })
    .await;

    match polled {
        Ok(outcome) => outcome,
        Err(_) => {
            debug!(?condition, ?limit, "Wait timed out");
            Ok(false)
        }
    }
}
