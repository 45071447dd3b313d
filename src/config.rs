use crate::browser::LaunchOptions;
use crate::error::{CrawlError, Result};
use crate::profile::SelectorProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Review listing crawled when no URL is configured (latest-first ordering)
pub const DEFAULT_URL: &str = "https://nol.yanolja.com/reviews/domestic/3013417?sort=LATEST";

/// Settings for one crawl run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrawlConfig {
    /// Listing page; the sort query parameter decides which reviews are visible
    pub url: String,

    /// Number of scroll-to-bottom actions
    pub scroll_iterations: u32,

    /// Pause after each scroll, in milliseconds
    pub scroll_pause_ms: u64,

    /// Pause after the initial navigation, in milliseconds
    pub initial_wait_ms: u64,

    /// Destination of the JSON review file
    pub output_path: PathBuf,

    pub launch: LaunchOptions,

    pub profile: SelectorProfile,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            scroll_iterations: 20,
            scroll_pause_ms: 2000,
            initial_wait_ms: 3000,
            output_path: PathBuf::from("./res/reviews.json"),
            launch: LaunchOptions::default(),
            profile: SelectorProfile::default(),
        }
    }
}

impl CrawlConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    /// Load a config from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CrawlError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| CrawlError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn with_scrolls(mut self, iterations: u32, pause: Duration) -> Self {
        self.scroll_iterations = iterations;
        self.scroll_pause_ms = pause.as_millis() as u64;
        self
    }

    pub fn with_initial_wait(mut self, wait: Duration) -> Self {
        self.initial_wait_ms = wait.as_millis() as u64;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_launch_options(mut self, launch: LaunchOptions) -> Self {
        self.launch = launch;
        self
    }

    pub fn with_profile(mut self, profile: SelectorProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn initial_wait(&self) -> Duration {
        Duration::from_millis(self.initial_wait_ms)
    }
}
