//! Headless Chromium driver built on `chromiumoxide`.
//!
//! Each [`ChromiumLauncher::launch`] starts its own browser process and opens a
//! single blank page in it. The DevTools event handler runs on a spawned task
//! for the lifetime of the session and is stopped by [`ChromiumPage::close`].

use super::{DriverError, Launcher, PageDriver};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        DriverError::Automation(e.to_string())
    }
}

/// Options for starting a Chromium session.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    /// Explicit browser binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Show the browser window instead of running headless.
    pub headful: bool,
    /// Upper bound for any single DevTools request.
    pub request_timeout: Duration,
}

impl Default for ChromiumLauncher {
    fn default() -> Self {
        Self {
            executable: None,
            headful: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Launcher for ChromiumLauncher {
    type Page = ChromiumPage;

    #[instrument(level = "info", skip_all, fields(headful = self.headful))]
    async fn launch(&self) -> Result<ChromiumPage, DriverError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.request_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if self.headful {
            builder = builder.with_head();
        }
        if let Some(ref path) = self.executable {
            builder = builder.chrome_executable(path);
        }

        // build() fails only when no executable could be detected.
        let config = builder
            .build()
            .map_err(|reason| DriverError::Unavailable { reason })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| match e {
            CdpError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                DriverError::Unavailable {
                    reason: e.to_string(),
                }
            }
            other => DriverError::Launch(other.to_string()),
        })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                let _ = browser.close().await;
                handler_task.abort();
                return Err(DriverError::Launch(e.to_string()));
            }
        };

        info!("Chromium session started");
        Ok(ChromiumPage {
            browser,
            page,
            handler_task,
        })
    }
}

/// A page inside a dedicated Chromium process.
pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromiumPage {
    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T, DriverError> {
        let value = self.page.evaluate(script).await?;
        value
            .into_value::<T>()
            .map_err(|e| DriverError::Automation(format!("unexpected script result: {e}")))
    }
}

/// Quote `selector` as a JavaScript string literal.
fn js_string(selector: &str) -> String {
    serde_json::Value::String(selector.to_string()).to_string()
}

/// Reads `textContent`, which unlike `innerText` keeps the text of hidden elements.
const TEXT_CONTENT_FN: &str = "function() { return this.textContent; }";

fn first_text_script(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({sel}); return el ? el.textContent.trim() : null; }})()",
        sel = js_string(selector)
    )
}

fn visible_and_enabled_script(selector: &str) -> String {
    format!(
        r#"(() => {{
    const el = document.querySelector({sel});
    if (!el) return false;
    const style = window.getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    const visible = style.visibility !== 'hidden' && style.display !== 'none'
        && rect.width > 0 && rect.height > 0;
    const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
    return visible && enabled;
}})()"#,
        sel = js_string(selector)
    )
}

impl PageDriver for ChromiumPage {
    type Element = Element;

    #[instrument(level = "debug", skip(self))]
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn query_all(&mut self, selector: &str) -> Result<Vec<Element>, DriverError> {
        let elements = self.page.find_elements(selector).await?;
        debug!(selector, count = elements.len(), "Queried elements");
        Ok(elements)
    }

    async fn text(&mut self, element: &Element) -> Result<Option<String>, DriverError> {
        let value = element.call_js_fn(TEXT_CONTENT_FN, false).await?.result.value;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn attribute(
        &mut self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(element.attribute(name).await?)
    }

    async fn first_text(&mut self, selector: &str) -> Result<Option<String>, DriverError> {
        self.eval(first_text_script(selector)).await
    }

    async fn is_visible_and_enabled(&mut self, selector: &str) -> Result<bool, DriverError> {
        self.eval(visible_and_enabled_script(selector)).await
    }

    async fn click(&mut self, selector: &str) -> Result<(), DriverError> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    #[instrument(level = "info", skip_all)]
    async fn close(self) -> Result<(), DriverError> {
        let ChromiumPage {
            mut browser,
            page,
            handler_task,
        } = self;

        if let Err(e) = page.close().await {
            debug!(error = %e, "Page close failed; closing browser anyway");
        }
        let closed = browser.close().await;
        if let Err(ref e) = closed {
            warn!(error = %e, "Browser close request failed");
        }
        let _ = browser.wait().await;
        handler_task.abort();
        info!("Chromium session closed");
        closed.map(|_| ()).map_err(DriverError::from)
    }
}
