//! Export artifacts for a finished crawl.
//!
//! # Submodules
//!
//! - [`csv`]: Delimited-text export of the article records (the main artifact)
//! - [`json`]: The whole [`CrawlResult`](crate::models::CrawlResult) as JSON
//!
//! # Output Structure
//!
//! Both files share a timestamped stem:
//!
//! ```text
//! output_dir/
//! ├── articles_scraped_20250506_203000.csv
//! └── articles_scraped_20250506_203000.json   # only with --json
//! ```

pub mod csv;
pub mod json;
