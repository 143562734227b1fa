//! The pagination state machine.
//!
//! ```text
//! Idle ──run()──▶ Running ──┬──▶ Completed   page cap, no next page, load timeout, stop request
//!                           └──▶ Aborted     browser unavailable or automation failure
//! ```
//!
//! Every run launches its own browser session and closes it before returning,
//! whatever the exit path. A run never fails: problems surface as log entries
//! and a smaller result.

use super::context::RunContext;
use super::extractor::extract;
use super::transition::{PageSnapshot, attempt_advance};
use super::wait::{Condition, wait_for};
use crate::browser::{DriverError, Launcher, PageDriver, REMEDIATION_HINT};
use crate::config::{ConfigError, CrawlSettings, LocatorConfig};
use crate::models::{CrawlOutcome, RunState};
use crate::observer::CrawlObserver;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Cooperative stop request, checked before each page.
///
/// Clones share the same flag. Raising it never interrupts a wait or the
/// delay between pages; the run ends at the next page boundary. Every run
/// clears the flag on its way out.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Crawls one paginated listing per [`run`](PaginationEngine::run).
pub struct PaginationEngine<L: Launcher> {
    locators: LocatorConfig,
    settings: CrawlSettings,
    launcher: L,
    state: RunState,
    stop: StopSignal,
}

impl<L: Launcher> PaginationEngine<L> {
    /// Build an idle engine; rejects blank locators and out-of-range settings.
    pub fn new(
        locators: LocatorConfig,
        settings: CrawlSettings,
        launcher: L,
    ) -> Result<Self, ConfigError> {
        locators.validate()?;
        CrawlSettings::new(settings.max_pages, settings.delay.as_secs())?;
        Ok(Self {
            locators,
            settings,
            launcher,
            state: RunState::Idle,
            stop: StopSignal::default(),
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn locators(&self) -> &LocatorConfig {
        &self.locators
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// A handle that ends the current or next run at a page boundary.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run one crawl from a clean slate and hand back its result and log.
    #[instrument(level = "info", skip_all, fields(url = %self.locators.url, max_pages = self.settings.max_pages))]
    pub async fn run<O>(&mut self, observer: &mut O) -> CrawlOutcome
    where
        O: CrawlObserver + ?Sized,
    {
        let t0 = Instant::now();
        self.state = RunState::Running;
        let mut ctx = RunContext::new(observer);

        ctx.info("launching browser");
        let state = match self.launcher.launch().await {
            Ok(mut page) => {
                let state = match self.crawl(&mut page, &mut ctx).await {
                    Ok(()) => RunState::Completed,
                    Err(e) => {
                        ctx.error(format!("error while scraping: {e}"));
                        RunState::Aborted
                    }
                };
                if let Err(e) = page.close().await {
                    warn!(error = %e, "Failed to release browser session");
                }
                state
            }
            Err(DriverError::Unavailable { reason }) => {
                ctx.error(format!("browser automation is not available: {reason}"));
                ctx.info(format!("to fix this, {REMEDIATION_HINT}"));
                RunState::Aborted
            }
            Err(e) => {
                ctx.error(format!("could not start the browser: {e}"));
                RunState::Aborted
            }
        };

        self.stop.clear();
        ctx.settle();
        let (articles, pages) = (ctx.result().total_articles, ctx.result().total_pages);
        ctx.success(format!(
            "scraping finished: {articles} articles over {pages} pages"
        ));
        self.state = state;

        let elapsed = t0.elapsed();
        info!(?state, articles, pages, secs = elapsed.as_secs(), "Run finished");
        ctx.finish(state)
    }

    async fn crawl<P, O>(&self, page: &mut P, ctx: &mut RunContext<'_, O>) -> Result<(), DriverError>
    where
        P: PageDriver,
        O: CrawlObserver + ?Sized,
    {
        let timeouts = &self.settings.timeouts;
        let start_url = self.locators.url.trim();

        ctx.info(format!("navigating to {start_url}"));
        page.goto(start_url).await?;

        let mut current_page = 1;
        loop {
            if self.stop.is_raised() {
                ctx.warning(format!("stop requested; ending before page {current_page}"));
                break;
            }
            if current_page == 1 {
                ctx.mark_start_loaded();
            }

            ctx.info(format!("scraping page {current_page}"));
            let loaded = wait_for(
                page,
                Condition::AnyMatch(&self.locators.title),
                timeouts.content_load,
                timeouts.poll_interval,
            )
            .await?;
            if !loaded {
                ctx.warning(format!(
                    "timed out after {}s waiting for articles on page {current_page}",
                    timeouts.content_load.as_secs()
                ));
                break;
            }

            let records = extract(page, &self.locators, ctx).await;
            let found = records.len();
            let first_title = records.first().map(|r| r.title.clone()).unwrap_or_default();
            ctx.result.push_page(records);
            ctx.success(format!("page {current_page} done: {found} articles found"));
            ctx.progress(current_page);

            let snapshot = PageSnapshot {
                first_title,
                url: page.current_url().await?,
            };
            debug!(?snapshot, "Captured page snapshot");

            if current_page >= self.settings.max_pages {
                ctx.info(format!(
                    "reached the limit of {} pages",
                    self.settings.max_pages
                ));
                break;
            }

            if !attempt_advance(page, &self.locators, timeouts, &snapshot, ctx).await {
                ctx.info("no more pages");
                break;
            }

            current_page += 1;
            sleep(self.settings.delay).await;
        }
        Ok(())
    }
}
