//! The pagination crawl.
//!
//! A run walks a single listing page by page:
//!
//! 1. **Wait**: Poll until the page shows at least one title element
//! 2. **Extract**: Turn the page into [`ArticleRecord`](crate::models::ArticleRecord)s ([`extractor`])
//! 3. **Advance**: Click "next" and decide whether the page really changed ([`transition`])
//!
//! [`engine::PaginationEngine`] drives the loop and owns the state of a run.
//! Stop conditions that are expected on a real site (no next control, no change
//! after a click, a page that never shows content) end the run quietly; only
//! failures of the automation layer abort it, and even then the records already
//! extracted are handed back.

pub mod context;
pub mod engine;
pub mod extractor;
pub mod transition;
pub mod wait;

pub use context::RunContext;
pub use engine::{PaginationEngine, StopSignal};
pub use transition::PageSnapshot;
