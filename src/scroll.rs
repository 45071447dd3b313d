//! Time-based scrolling that coaxes lazily loaded reviews into the document

use crate::error::Result;
use std::time::Duration;

/// Anything whose rendered view can be scrolled to its current bottom
pub trait ScrollTarget {
    fn scroll_to_bottom(&self) -> Result<()>;
}

/// Scrolls a target a fixed number of times, pausing a fixed duration after each scroll.
///
/// The driver never inspects the document. When the pause is too short for the site,
/// fewer reviews get loaded and nothing reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollDriver {
    iterations: u32,
    pause: Duration,
}

impl ScrollDriver {
    pub fn new(iterations: u32, pause: Duration) -> Self {
        Self { iterations, pause }
    }

    /// Perform every scroll, sleeping `pause` after each one
    pub fn drive<T: ScrollTarget + ?Sized>(&self, target: &T) -> Result<()> {
        log::info!("Scrolling page {} times", self.iterations);

        for i in 0..self.iterations {
            target.scroll_to_bottom()?;
            std::thread::sleep(self.pause);

            if (i + 1) % 3 == 0 {
                log::info!("Scroll progress: {}/{}", i + 1, self.iterations);
            }
        }

        log::info!("Scrolling finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use std::cell::Cell;
    use std::time::Instant;

    #[derive(Default)]
    struct CountingTarget {
        calls: Cell<u32>,
        fail_at: Option<u32>,
    }

    impl ScrollTarget for CountingTarget {
        fn scroll_to_bottom(&self) -> Result<()> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if self.fail_at == Some(call) {
                return Err(CrawlError::ScrollFailed("script error".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_scrolls_configured_number_of_times() {
        let target = CountingTarget::default();
        let driver = ScrollDriver::new(7, Duration::ZERO);

        driver.drive(&target).unwrap();

        assert_eq!(target.calls.get(), 7);
    }

    #[test]
    fn test_zero_iterations_never_scrolls() {
        let target = CountingTarget::default();
        ScrollDriver::new(0, Duration::from_secs(10)).drive(&target).unwrap();

        assert_eq!(target.calls.get(), 0);
    }

    #[test]
    fn test_pauses_after_each_scroll() {
        let target = CountingTarget::default();
        let driver = ScrollDriver::new(3, Duration::from_millis(20));

        let started = Instant::now();
        driver.drive(&target).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_scroll_error_stops_driving() {
        let target = CountingTarget { fail_at: Some(2), ..Default::default() };
        let result = ScrollDriver::new(5, Duration::ZERO).drive(&target);

        assert!(matches!(result, Err(CrawlError::ScrollFailed(_))));
        assert_eq!(target.calls.get(), 2);
    }
}
