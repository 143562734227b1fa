//! Browser automation seam used by the crawler.
//!
//! The crawler never talks to a browser directly. It drives a [`PageDriver`]
//! obtained from a [`Launcher`], one per run:
//!
//! | Implementation | Module | Notes |
//! |----------------|--------|-------|
//! | Headless Chromium | [`chromium`] | Real pages over the DevTools protocol |
//! | Scripted site | `fake` | Test-only, in-memory pages |
//!
//! A driver owns the browser session behind it; [`PageDriver::close`] releases
//! it and must be called on every exit path of a run.

use thiserror::Error;

pub mod chromium;

#[cfg(test)]
pub(crate) mod fake;

/// Logged next to [`DriverError::Unavailable`] so the user knows what to install.
pub const REMEDIATION_HINT: &str =
    "install Chrome or Chromium, or point --chrome-executable (CHROME_EXECUTABLE) at one";

/// Failures raised by the automation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The automation capability itself is missing (no browser executable).
    #[error("browser unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("automation error: {0}")]
    Automation(String),
}

/// One live page of a browser session.
///
/// Element handles are only valid until the page changes; the crawler reads
/// them right after querying.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// Handle to an element returned by [`PageDriver::query_all`].
    type Element;

    /// Navigate to `url` and wait for it to load.
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// The page's current location.
    async fn current_url(&mut self) -> Result<String, DriverError>;

    /// All elements matching `selector`, in document order.
    async fn query_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, DriverError>;

    /// Number of elements matching `selector`.
    async fn count(&mut self, selector: &str) -> Result<usize, DriverError> {
        Ok(self.query_all(selector).await?.len())
    }

    /// Text content of an element, untrimmed.
    async fn text(&mut self, element: &Self::Element) -> Result<Option<String>, DriverError>;

    /// Value of attribute `name`, if the element carries it.
    async fn attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Trimmed text of the first element matching `selector`, if any.
    async fn first_text(&mut self, selector: &str) -> Result<Option<String>, DriverError>;

    /// Whether the first element matching `selector` is both visible and enabled.
    async fn is_visible_and_enabled(&mut self, selector: &str) -> Result<bool, DriverError>;

    /// Click the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<(), DriverError>;

    /// Release the page and the browser session behind it.
    async fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}

/// Acquires a fresh browser session for a run.
#[allow(async_fn_in_trait)]
pub trait Launcher {
    type Page: PageDriver;

    /// Start a browser and open one blank page in it.
    ///
    /// Returns [`DriverError::Unavailable`] when the browser cannot be found at all.
    async fn launch(&self) -> Result<Self::Page, DriverError>;
}
