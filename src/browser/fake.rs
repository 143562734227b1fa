//! Scripted in-memory site for exercising the crawler without a browser.

use super::{DriverError, Launcher, PageDriver};
use crate::config::LocatorConfig;
use std::sync::{Arc, Mutex};

/// What clicking "next" on a page does.
#[derive(Debug, Clone)]
pub enum NextControl {
    /// No element matches the next-page locator.
    Absent,
    /// An element matches but is hidden or disabled.
    Disabled,
    /// Clickable, but the page stays exactly as it was.
    Inert,
    /// Moves to page `target`; `keep_url` swaps content without changing the URL.
    GoTo { target: usize, keep_url: bool },
}

/// Which automation call breaks on a page.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Every call on the page fails, as if the browser went away.
    Everything,
    /// Querying `selector` fails.
    Query(String),
    /// Clicking "next" fails.
    Click,
}

#[derive(Debug, Clone)]
pub struct FakeTitle {
    pub text: Option<String>,
    pub href: Option<String>,
    /// Reading this element's text fails.
    pub broken: bool,
}

impl FakeTitle {
    pub fn new(text: &str, href: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            href: Some(href.to_string()),
            broken: false,
        }
    }

    pub fn without_href(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            href: None,
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            text: None,
            href: None,
            broken: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakePage {
    pub url: String,
    pub titles: Vec<FakeTitle>,
    pub descriptions: Vec<String>,
    pub dates: Vec<String>,
    pub next: NextControl,
    pub fault: Option<Fault>,
}

impl FakePage {
    /// A page with `count` titles named `"{prefix} {i}"`, each with a description and date.
    pub fn with_articles(url: &str, prefix: &str, count: usize) -> Self {
        Self {
            url: url.to_string(),
            titles: (1..=count)
                .map(|i| FakeTitle::new(&format!("{prefix} {i}"), &format!("/posts/{prefix}-{i}")))
                .collect(),
            descriptions: (1..=count).map(|i| format!("about {prefix} {i}")).collect(),
            dates: (1..=count).map(|i| format!("2024-01-{i:02}")).collect(),
            next: NextControl::Absent,
            fault: None,
        }
    }

    pub fn next(mut self, next: NextControl) -> Self {
        self.next = next;
        self
    }

    pub fn fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// Calls observed across every page a launcher handed out.
#[derive(Debug, Default)]
pub struct Journal {
    pub launches: usize,
    pub closes: usize,
    pub clicks: usize,
    pub visited: Vec<String>,
}

pub enum FakeElement {
    Title(FakeTitle),
    Text(String),
    Marker,
}

/// A site made of [`FakePage`]s, addressed by the locators of `locators`.
#[derive(Clone)]
pub struct FakeSite {
    pub locators: LocatorConfig,
    pub pages: Vec<FakePage>,
    pub unavailable: bool,
    pub journal: Arc<Mutex<Journal>>,
}

impl FakeSite {
    pub fn new(pages: Vec<FakePage>) -> Self {
        let locators = LocatorConfig {
            url: pages
                .first()
                .map(|p| p.url.clone())
                .unwrap_or_else(|| "https://blog.example/".to_string()),
            ..LocatorConfig::default()
        };
        Self {
            locators,
            pages,
            unavailable: false,
            journal: Arc::new(Mutex::new(Journal::default())),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn journal(&self) -> std::sync::MutexGuard<'_, Journal> {
        self.journal.lock().unwrap()
    }
}

impl Launcher for FakeSite {
    type Page = FakeDriver;

    async fn launch(&self) -> Result<FakeDriver, DriverError> {
        if self.unavailable {
            return Err(DriverError::Unavailable {
                reason: "no chrome executable".to_string(),
            });
        }
        self.journal().launches += 1;
        Ok(FakeDriver {
            site: self.clone(),
            current: None,
            url: "about:blank".to_string(),
        })
    }
}

pub struct FakeDriver {
    site: FakeSite,
    current: Option<usize>,
    url: String,
}

impl FakeDriver {
    fn page(&self) -> Result<&FakePage, DriverError> {
        let page = self
            .current
            .and_then(|i| self.site.pages.get(i))
            .ok_or_else(|| DriverError::Automation("no page loaded".to_string()))?;
        if let Some(Fault::Everything) = page.fault {
            return Err(DriverError::Automation("target closed".to_string()));
        }
        Ok(page)
    }
}

impl PageDriver for FakeDriver {
    type Element = FakeElement;

    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        let index = self
            .site
            .pages
            .iter()
            .position(|p| p.url == url)
            .ok_or_else(|| DriverError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            })?;
        self.current = Some(index);
        self.url = url.to_string();
        self.site.journal().visited.push(url.to_string());
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        self.page()?;
        Ok(self.url.clone())
    }

    async fn query_all(&mut self, selector: &str) -> Result<Vec<FakeElement>, DriverError> {
        let page = self.page()?;
        if let Some(Fault::Query(ref broken)) = page.fault {
            if broken == selector {
                return Err(DriverError::Automation(format!(
                    "failed to query `{selector}`"
                )));
            }
        }

        let locators = &self.site.locators;
        let found = if selector == locators.title {
            page.titles.iter().cloned().map(FakeElement::Title).collect()
        } else if selector == locators.description {
            page.descriptions.iter().cloned().map(FakeElement::Text).collect()
        } else if selector == locators.date {
            page.dates.iter().cloned().map(FakeElement::Text).collect()
        } else if selector == locators.next_page {
            match page.next {
                NextControl::Absent => Vec::new(),
                _ => vec![FakeElement::Marker],
            }
        } else {
            Vec::new()
        };
        Ok(found)
    }

    async fn text(&mut self, element: &FakeElement) -> Result<Option<String>, DriverError> {
        self.page()?;
        match element {
            FakeElement::Title(title) if title.broken => {
                Err(DriverError::Automation("element is detached".to_string()))
            }
            FakeElement::Title(title) => Ok(title.text.clone()),
            FakeElement::Text(text) => Ok(Some(text.clone())),
            FakeElement::Marker => Ok(Some("Next".to_string())),
        }
    }

    async fn attribute(
        &mut self,
        element: &FakeElement,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.page()?;
        match element {
            FakeElement::Title(title) if name == "href" => Ok(title.href.clone()),
            _ => Ok(None),
        }
    }

    async fn first_text(&mut self, selector: &str) -> Result<Option<String>, DriverError> {
        let first = self.query_all(selector).await?.into_iter().next();
        match first {
            Some(element) => Ok(self.text(&element).await?.map(|t| t.trim().to_string())),
            None => Ok(None),
        }
    }

    async fn is_visible_and_enabled(&mut self, selector: &str) -> Result<bool, DriverError> {
        let page = self.page()?;
        if selector != self.site.locators.next_page {
            return Ok(false);
        }
        Ok(matches!(
            page.next,
            NextControl::Inert | NextControl::GoTo { .. }
        ))
    }

    async fn click(&mut self, selector: &str) -> Result<(), DriverError> {
        let page = self.page()?;
        if let Some(Fault::Click) = page.fault {
            return Err(DriverError::Automation("click intercepted".to_string()));
        }
        if selector != self.site.locators.next_page {
            return Err(DriverError::Automation(format!("no element `{selector}`")));
        }
        let next = page.next.clone();
        self.site.journal().clicks += 1;

        if let NextControl::GoTo { target, keep_url } = next {
            let url = self
                .site
                .pages
                .get(target)
                .map(|p| p.url.clone())
                .ok_or_else(|| DriverError::Automation(format!("no page {target}")))?;
            self.current = Some(target);
            if !keep_url {
                self.url = url.clone();
            }
            self.site.journal().visited.push(url);
        }
        Ok(())
    }

    async fn close(self) -> Result<(), DriverError> {
        self.site.journal().closes += 1;
        Ok(())
    }
}
