//! # review-crawler
//!
//! A Rust library for crawling review listings whose content is loaded lazily by client-side
//! scripting, driven through Chrome DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **Scroll-driven loading**: scrolls the rendered page a fixed number of times to pull in lazily loaded reviews
//! - **Resilient discovery**: locates review containers with a primary marker and a fallback ancestor walk
//! - **Field extraction**: review text, a 0-5 star rating decoded from icon path data, and an optional date
//! - **Failure isolation**: a malformed review is counted and skipped, never aborting the batch
//! - **Selector profiles**: every generated class name lives in data, so site revisions need no code changes
//!
//! ## Running the crawler
//!
//! ```bash
//! # Crawl with the built-in defaults, writing ./res/reviews.json
//! cargo run --bin review-crawler
//!
//! # Watch the browser while it scrolls
//! cargo run --bin review-crawler -- --headed --scrolls 5
//!
//! # Dump the markup around the first reviews when extraction degrades
//! cargo run --bin inspect-structure
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use review_crawler::{CrawlConfig, ReviewCrawler};
//!
//! # fn main() -> review_crawler::Result<()> {
//! let crawler = ReviewCrawler::new(CrawlConfig::default())?;
//! let report = crawler.crawl()?;
//!
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! Extraction does not need a browser; any rendered HTML can be fed to it:
//!
//! ```rust
//! use review_crawler::{SelectorProfile, extract_reviews};
//!
//! # fn main() -> review_crawler::Result<()> {
//! let html = r#"<div class="css-166s55a"><p class="content-text css-vjs6b8">Great view</p></div>"#;
//! let profile = SelectorProfile::default().compile()?;
//!
//! let report = extract_reviews(html, &profile);
//! assert_eq!(report.success_count(), 1);
//! assert_eq!(report.records()[0].text(), "Great view");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and launch options
//! - [`crawler`]: The end-to-end pipeline
//! - [`scroll`]: Time-based scroll driver
//! - [`locate`]: Container discovery strategies
//! - [`extract`]: Per-container field extraction
//! - [`rating`]: Star rating decoding from icon path data
//! - [`report`]: Outcome aggregation and run summary
//! - [`persist`]: JSON output
//! - [`profile`]: Selector profile
//! - [`inspect`]: Structure inspection for diagnosing markup drift

pub mod browser;
pub mod config;
pub mod crawler;
pub mod date;
pub mod dom;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod locate;
pub mod persist;
pub mod profile;
pub mod rating;
pub mod record;
pub mod report;
pub mod scroll;

pub use browser::{BrowserSession, LaunchOptions};
pub use config::CrawlConfig;
pub use crawler::{ReviewCrawler, ReviewPage, extract_reviews};
pub use error::{CrawlError, Result};
pub use extract::RecordExtractor;
pub use locate::{ContainerLocator, DiscoveryStrategy};
pub use persist::{load_reviews, save_reviews};
pub use profile::{CompiledProfile, SelectorProfile};
pub use rating::{IconState, PathPrefixDecoder, RatingDecoder};
pub use record::{ExtractionOutcome, RecordError, ReviewRecord};
pub use report::{BatchReport, ResultAggregator};
pub use scroll::{ScrollDriver, ScrollTarget};
