//! The crawl pipeline: render, scroll, locate, extract, aggregate, persist

use crate::browser::BrowserSession;
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::extract::RecordExtractor;
use crate::locate::ContainerLocator;
use crate::persist::save_reviews;
use crate::profile::CompiledProfile;
use crate::report::{BatchReport, ResultAggregator};
use crate::scroll::{ScrollDriver, ScrollTarget};
use scraper::Html;

/// A rendered page the crawler can navigate, scroll and read back
pub trait ReviewPage: ScrollTarget {
    fn navigate(&self, url: &str) -> Result<()>;

    fn page_source(&self) -> Result<String>;
}

impl ReviewPage for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        BrowserSession::navigate(self, url)
    }

    fn page_source(&self) -> Result<String> {
        BrowserSession::page_source(self)
    }
}

/// Locate and extract every review in a rendered document
pub fn extract_reviews(html: &str, profile: &CompiledProfile) -> BatchReport {
    let document = Html::parse_document(html);
    let locator = ContainerLocator::from_profile(profile);
    let extractor = RecordExtractor::from_profile(profile);

    let containers = locator.locate(&document);
    log::info!("Parsing {} reviews", containers.len());

    ResultAggregator::collect(containers, |index, container| extractor.extract(index, container))
}

/// Runs complete crawls for one configuration
pub struct ReviewCrawler {
    config: CrawlConfig,
    profile: CompiledProfile,
}

impl ReviewCrawler {
    /// Fails when the configured selector profile does not compile
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let profile = config.profile.compile()?;
        for (role, css) in config.profile.selector_roles() {
            log::debug!("Selector {}: {}", role, css);
        }
        Ok(Self { config, profile })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Full run against a freshly launched browser
    pub fn crawl(&self) -> Result<BatchReport> {
        let launch = self.config.launch.clone();
        self.crawl_with(move || BrowserSession::launch(launch))
    }

    /// Full run against a page produced by `acquire`.
    ///
    /// The page is dropped as soon as the document has been read, or as soon as any step fails.
    pub fn crawl_with<P, F>(&self, acquire: F) -> Result<BatchReport>
    where
        P: ReviewPage,
        F: FnOnce() -> Result<P>,
    {
        log::info!("Crawling {}", self.config.url);

        let html = {
            let page = acquire()?;
            self.render(&page)?
        };

        let report = extract_reviews(&html, &self.profile);
        log::info!("{}", report);

        save_reviews(report.records(), &self.config.output_path)?;
        Ok(report)
    }

    /// Like [`crawl`](Self::crawl), but a failed run yields an empty report after logging why
    pub fn run(&self) -> BatchReport {
        self.crawl().unwrap_or_else(|e| {
            log::error!("Crawl failed: {}", e);
            BatchReport::empty()
        })
    }

    fn render<P: ReviewPage>(&self, page: &P) -> Result<String> {
        page.navigate(&self.config.url)?;
        log::info!("Page loaded");

        std::thread::sleep(self.config.initial_wait());

        ScrollDriver::new(self.config.scroll_iterations, self.config.scroll_pause()).drive(page)?;
        page.page_source()
    }
}
