//! Selector profile: every markup-coupled identifier the crawler depends on
//!
//! The site's class names are generated and change between revisions. Keeping them in one
//! serializable profile means a revision is handled by editing data, not code.

use crate::error::{CrawlError, Result};
use indexmap::IndexMap;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logical role → marker pattern for one site revision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorProfile {
    /// Wraps one whole review (primary discovery strategy)
    pub container: String,

    /// Review body text
    pub review_text: String,

    /// Broader review text match, tried when `review_text` finds nothing
    pub review_text_broad: String,

    /// Ancestor a review text node is walked up to by the fallback discovery strategy
    pub container_ancestor: String,

    /// Rating sub-container holding the row of icons
    pub rating_container: String,

    /// One rating icon, filled or not
    pub rating_icon: String,

    /// Vector element inside an icon carrying the path data
    pub icon_path: String,

    /// Secondary text lines; the first one holds the date
    pub secondary_text: String,

    /// Leading coordinate token of a filled icon's path data
    pub filled_path_token: String,

    /// Leading coordinate token of an unfilled icon's path data
    pub unfilled_path_token: String,
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self {
            container: "div.css-166s55a".to_string(),
            review_text: "p.content-text.css-vjs6b8".to_string(),
            review_text_broad: "p[class*='content']".to_string(),
            container_ancestor: "div[class*='css-']".to_string(),
            rating_container: "div.css-rz7kwu".to_string(),
            rating_icon: "svg.css-1mj121y".to_string(),
            icon_path: "path".to_string(),
            secondary_text: "p.css-6lreu3".to_string(),
            filled_path_token: "12".to_string(),
            unfilled_path_token: "10".to_string(),
        }
    }
}

impl SelectorProfile {
    /// Load a profile from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CrawlError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| CrawlError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// CSS selector roles in a stable order
    pub fn selector_roles(&self) -> IndexMap<&'static str, &str> {
        IndexMap::from([
            ("container", self.container.as_str()),
            ("review_text", self.review_text.as_str()),
            ("review_text_broad", self.review_text_broad.as_str()),
            ("container_ancestor", self.container_ancestor.as_str()),
            ("rating_container", self.rating_container.as_str()),
            ("rating_icon", self.rating_icon.as_str()),
            ("icon_path", self.icon_path.as_str()),
            ("secondary_text", self.secondary_text.as_str()),
        ])
    }

    /// Validate and compile every selector
    pub fn compile(&self) -> Result<CompiledProfile> {
        if self.filled_path_token.is_empty() || self.unfilled_path_token.is_empty() {
            return Err(CrawlError::Config("Icon path tokens must not be empty".to_string()));
        }
        if self.filled_path_token == self.unfilled_path_token {
            return Err(CrawlError::Config(format!(
                "Filled and unfilled path tokens are both '{}'",
                self.filled_path_token
            )));
        }

        let parse = |role: &'static str, css: &str| {
            Selector::parse(css).map_err(|e| CrawlError::InvalidSelector {
                role,
                selector: css.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(CompiledProfile {
            container: parse("container", &self.container)?,
            review_text: parse("review_text", &self.review_text)?,
            review_text_broad: parse("review_text_broad", &self.review_text_broad)?,
            container_ancestor: parse("container_ancestor", &self.container_ancestor)?,
            rating_container: parse("rating_container", &self.rating_container)?,
            rating_icon: parse("rating_icon", &self.rating_icon)?,
            icon_path: parse("icon_path", &self.icon_path)?,
            secondary_text: parse("secondary_text", &self.secondary_text)?,
            markers: IconMarkers {
                filled: self.filled_path_token.clone(),
                unfilled: self.unfilled_path_token.clone(),
            },
        })
    }
}

/// Leading path tokens distinguishing filled from unfilled rating icons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMarkers {
    pub filled: String,
    pub unfilled: String,
}

/// A [`SelectorProfile`] with every selector parsed
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    pub container: Selector,
    pub review_text: Selector,
    pub review_text_broad: Selector,
    pub container_ancestor: Selector,
    pub rating_container: Selector,
    pub rating_icon: Selector,
    pub icon_path: Selector,
    pub secondary_text: Selector,
    pub markers: IconMarkers,
}
