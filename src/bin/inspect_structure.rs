//! Review markup inspector
//!
//! Loads a review listing, scrolls it briefly and writes a human-readable report of the markup
//! around the first reviews. Use it to write a new selector profile when the crawler stops
//! finding reviews.

use anyhow::Context;
use clap::Parser;
use review_crawler::inspect::{InspectOptions, inspect_structure};
use review_crawler::{BrowserSession, CrawlConfig, ScrollDriver};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "inspect-structure")]
#[command(version)]
#[command(about = "Report the markup structure around review texts", long_about = None)]
struct Cli {
    /// JSON config file providing the URL, launch options and selector profile
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Review listing URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Number of reviews to analyse
    #[arg(long, short = 'n', default_value = "5")]
    reviews: usize,

    /// Extra class substring to flag (repeatable)
    #[arg(long = "keyword", short = 'k', value_name = "TEXT")]
    keywords: Vec<String>,

    /// Report destination
    #[arg(long, short = 'o', default_value = "./debug_html_structure.txt")]
    output: PathBuf,

    /// Write JSON instead of text
    #[arg(long)]
    json: bool,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CrawlConfig::from_json_file(path)?,
        None => CrawlConfig::default(),
    };
    if let Some(url) = cli.url {
        config.url = url;
    }
    if cli.headed {
        config.launch.headless = false;
    }
    let profile = config.profile.compile()?;

    let html = {
        let session = BrowserSession::launch(config.launch.clone())?;
        session.navigate(&config.url)?;
        std::thread::sleep(config.initial_wait());
        ScrollDriver::new(2, Duration::from_secs(2)).drive(&session)?;
        session.page_source()?
    };

    let mut options = InspectOptions::default().with_limit(cli.reviews);
    for keyword in cli.keywords {
        options = options.with_keyword(keyword);
    }

    let report = inspect_structure(&html, &profile, &options);
    log::info!("Found {} review texts, {} svg elements", report.review_text_count, report.svg_count);

    let body = if cli.json { serde_json::to_string_pretty(&report)? } else { report.to_string() };
    std::fs::write(&cli.output, body).with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!("Structure report written to {}", cli.output.display());
    Ok(())
}
