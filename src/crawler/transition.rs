//! Decide whether clicking "next" produced a new page.
//!
//! Sites either change the URL when paginating or swap the listing in place.
//! After the click we first wait for the URL to move, then for the first title
//! to change. Both waits are bounded, so a page that renders slower than the
//! two timeouts together is reported as unchanged. An AJAX-only swap that
//! changes neither the URL nor the first title is not detected either.

use super::context::RunContext;
use super::wait::{Condition, wait_for};
use crate::browser::{DriverError, PageDriver};
use crate::config::{LocatorConfig, Timeouts};
use crate::observer::CrawlObserver;
use tracing::{debug, instrument};

/// State of the page just extracted, compared against after clicking "next".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Title of the first record on the page, or empty when it had none.
    pub first_title: String,
    pub url: String,
}

/// Click the next-page control and report whether a new page showed up.
///
/// `false` means pagination is over: no control, a hidden or disabled one, no
/// change within the timeouts, or an automation failure (logged as an error).
#[instrument(level = "debug", skip_all, fields(next = %locators.next_page, previous_url = %snapshot.url))]
pub async fn attempt_advance<P, O>(
    page: &mut P,
    locators: &LocatorConfig,
    timeouts: &Timeouts,
    snapshot: &PageSnapshot,
    ctx: &mut RunContext<'_, O>,
) -> bool
where
    P: PageDriver,
    O: CrawlObserver + ?Sized,
{
    match advance(page, locators, timeouts, snapshot, ctx).await {
        Ok(advanced) => advanced,
        Err(e) => {
            ctx.error(format!("failed to move to the next page: {e}"));
            false
        }
    }
}

async fn advance<P, O>(
    page: &mut P,
    locators: &LocatorConfig,
    timeouts: &Timeouts,
    snapshot: &PageSnapshot,
    ctx: &mut RunContext<'_, O>,
) -> Result<bool, DriverError>
where
    P: PageDriver,
    O: CrawlObserver + ?Sized,
{
    let next = locators.next_page.as_str();
    if page.count(next).await? == 0 {
        debug!("No next-page control");
        return Ok(false);
    }
    if !page.is_visible_and_enabled(next).await? {
        debug!("Next-page control is hidden or disabled");
        return Ok(false);
    }

    ctx.info("clicking next page");
    page.click(next).await?;

    let url_changed = wait_for(
        page,
        Condition::UrlDiffers(&snapshot.url),
        timeouts.url_change,
        timeouts.poll_interval,
    )
    .await?;
    if url_changed {
        debug!("URL changed after click");
        return Ok(true);
    }

    let title_changed = wait_for(
        page,
        Condition::FirstTextDiffers {
            selector: &locators.title,
            previous: &snapshot.first_title,
        },
        timeouts.title_change,
        timeouts.poll_interval,
    )
    .await?;
    if title_changed {
        debug!("First title changed after click");
        return Ok(true);
    }

    ctx.warning("no change detected after click");
    Ok(false)
}
