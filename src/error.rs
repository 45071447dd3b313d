use thiserror::Error;

/// Run-level errors raised while crawling a review listing
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Scrolling failed: {0}")]
    ScrollFailed(String),

    #[error("Page content unavailable: {0}")]
    ContentUnavailable(String),

    #[error("Failed to release browser: {0}")]
    ReleaseFailed(String),

    #[error("Invalid selector for '{role}' ({selector}): {reason}")]
    InvalidSelector {
        role: &'static str,
        selector: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to persist reviews: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selector_message() {
        let err = CrawlError::InvalidSelector {
            role: "rating_icon",
            selector: "svg..broken".to_string(),
            reason: "unexpected token".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("rating_icon"));
        assert!(message.contains("svg..broken"));
    }

    #[test]
    fn test_io_error_converts_to_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CrawlError = io.into();
        assert!(matches!(err, CrawlError::Persistence(_)));
    }

    #[test]
    fn test_release_failure_is_not_navigation() {
        let err = CrawlError::ReleaseFailed("Failed to close tab: target closed".to_string());

        assert!(!matches!(err, CrawlError::NavigationFailed(_)));
        assert_eq!(err.to_string(), "Failed to release browser: Failed to close tab: target closed");
    }
}
