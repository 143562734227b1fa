//! Turn one rendered listing page into article records.
//!
//! Titles drive the record count. Descriptions and dates are located
//! independently and paired with titles by position, not by DOM proximity: the
//! i-th description belongs to the i-th title, and a missing one is an empty
//! string.

use super::context::RunContext;
use crate::browser::{DriverError, PageDriver};
use crate::config::LocatorConfig;
use crate::models::ArticleRecord;
use crate::observer::CrawlObserver;
use crate::utils::truncate_for_log;
use tracing::{debug, instrument};
use url::Url;

/// Extract every article on the current page.
///
/// Never fails: a broken element is logged as a warning and skipped, and a
/// failed lookup of a whole element collection is logged as an error, leaving
/// the page with the records built so far. The caller is responsible for
/// waiting until the content is present.
#[instrument(level = "debug", skip_all, fields(selector = %config.title))]
pub async fn extract<P, O>(
    page: &mut P,
    config: &LocatorConfig,
    ctx: &mut RunContext<'_, O>,
) -> Vec<ArticleRecord>
where
    P: PageDriver,
    O: CrawlObserver + ?Sized,
{
    let mut records = Vec::new();
    if let Err(e) = extract_into(page, config, ctx, &mut records).await {
        ctx.error(format!("failed to extract articles from page: {e}"));
    }
    debug!(count = records.len(), "Extracted page");
    records
}

async fn extract_into<P, O>(
    page: &mut P,
    config: &LocatorConfig,
    ctx: &mut RunContext<'_, O>,
    records: &mut Vec<ArticleRecord>,
) -> Result<(), DriverError>
where
    P: PageDriver,
    O: CrawlObserver + ?Sized,
{
    let titles = page.query_all(&config.title).await?;
    let descriptions = read_texts(page, &config.description, "description", ctx).await?;
    let dates = read_texts(page, &config.date, "date", ctx).await?;
    let base = Url::parse(&page.current_url().await?).ok();

    for (i, element) in titles.iter().enumerate() {
        match read_title(page, element).await {
            Ok(Some((title, href))) => {
                debug!(index = i, title = %truncate_for_log(&title, 80), "Found article");
                records.push(ArticleRecord {
                    title,
                    description: descriptions.get(i).cloned().unwrap_or_default(),
                    url: resolve_href(base.as_ref(), href),
                    date: dates.get(i).cloned().unwrap_or_default(),
                    category: config.category.clone(),
                });
            }
            Ok(None) => debug!(index = i, "Skipping title element without text"),
            Err(e) => ctx.warning(format!("failed to extract article {}: {e}", i + 1)),
        }
    }
    Ok(())
}

/// Trimmed title text and raw `href` of a title element; `None` when the text is blank.
async fn read_title<P: PageDriver>(
    page: &mut P,
    element: &P::Element,
) -> Result<Option<(String, Option<String>)>, DriverError> {
    let title = page.text(element).await?.unwrap_or_default();
    let title = title.trim();
    if title.is_empty() {
        return Ok(None);
    }
    let href = page.attribute(element, "href").await?;
    Ok(Some((title.to_string(), href)))
}

/// Trimmed text of every element matching `selector`, keeping positions.
///
/// An element whose text cannot be read becomes an empty string so later
/// elements stay aligned with their titles.
async fn read_texts<P, O>(
    page: &mut P,
    selector: &str,
    field: &str,
    ctx: &mut RunContext<'_, O>,
) -> Result<Vec<String>, DriverError>
where
    P: PageDriver,
    O: CrawlObserver + ?Sized,
{
    let elements = page.query_all(selector).await?;
    let mut texts = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        match page.text(element).await {
            Ok(text) => texts.push(text.map(|t| t.trim().to_string()).unwrap_or_default()),
            Err(e) => {
                ctx.warning(format!("failed to read {field} {}: {e}", i + 1));
                texts.push(String::new());
            }
        }
    }
    Ok(texts)
}

/// Make `href` absolute against the page URL; absent or blank links become `""`.
fn resolve_href(base: Option<&Url>, href: Option<String>) -> String {
    let Some(href) = href else {
        return String::new();
    };
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    base.and_then(|b| b.join(trimmed).ok())
        .map(String::from)
        .unwrap_or(href)
}
