//! Review crawler
//!
//! Loads a review listing in Chrome, scrolls it to pull in lazily loaded reviews, extracts
//! every review and writes them to a JSON file.

use anyhow::Context;
use clap::Parser;
use review_crawler::{CrawlConfig, ReviewCrawler};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "review-crawler")]
#[command(version)]
#[command(about = "Crawl a lazily loaded review listing into JSON", long_about = None)]
struct Cli {
    /// JSON config file; command line options override its values
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Review listing URL (keep the sort query parameter)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output JSON path
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Number of scroll-to-bottom actions
    #[arg(long, value_name = "N")]
    scrolls: Option<u32>,

    /// Pause after each scroll, in milliseconds
    #[arg(long, value_name = "MS")]
    pause_ms: Option<u64>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CrawlConfig::default(),
        };

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(scrolls) = self.scrolls {
            let pause = config.scroll_pause();
            config = config.with_scrolls(scrolls, pause);
        }
        if let Some(pause_ms) = self.pause_ms {
            let iterations = config.scroll_iterations;
            config = config.with_scrolls(iterations, Duration::from_millis(pause_ms));
        }
        if self.headed {
            config.launch.headless = false;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    let crawler = ReviewCrawler::new(config).context("Invalid selector profile")?;

    log::info!("Review crawler v{}", env!("CARGO_PKG_VERSION"));
    log::info!("URL: {}", crawler.config().url);

    match crawler.crawl() {
        Ok(report) => {
            log::info!(
                "{} reviews written to {}",
                report.success_count(),
                crawler.config().output_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::error!("Crawl failed: {}", e);
            log::info!("Collected 0 reviews");
            Ok(ExitCode::FAILURE)
        }
    }
}
