use crate::{browser::config::LaunchOptions,
            error::{CrawlError, Result},
            scroll::ScrollTarget};
use headless_chrome::{Browser, Tab};
use std::{sync::Arc, time::Duration};

const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Browser session that manages a Chrome/Chromium instance and the tab a crawl runs in
///
/// Dropping the session releases the browser process, so holding it in a local binding
/// is enough to guarantee release on every exit path.
pub struct BrowserSession {
    /// Owns the Chrome process; dropping it terminates the process
    _browser: Browser,

    /// Tab opened at launch; all navigation happens here
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // A full crawl scrolls for well over the default 30 second idle window
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| CrawlError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CrawlError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Browser launched (headless: {})", options.headless);

        Ok(Self { _browser: browser, tab })
    }

    /// Navigate to a URL and wait for the navigation to complete
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| CrawlError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| CrawlError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Serialized HTML of the current document, including lazily inserted content
    pub fn page_source(&self) -> Result<String> {
        self.tab.get_content().map_err(|e| CrawlError::ContentUnavailable(e.to_string()))
    }

    /// Close the session's tab
    ///
    /// The browser process itself is terminated when the session is dropped.
    pub fn close(&self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| CrawlError::ReleaseFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

impl ScrollTarget for BrowserSession {
    fn scroll_to_bottom(&self) -> Result<()> {
        self.tab
            .evaluate(SCROLL_TO_BOTTOM_JS, false)
            .map_err(|e| CrawlError::ScrollFailed(e.to_string()))?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::debug!("Tab close on release failed: {}", e);
        }
        log::info!("Browser released");
    }
}
