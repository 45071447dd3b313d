//! Review container discovery
//!
//! Discovery is an ordered chain of strategies. The first strategy that finds at least one
//! container wins; later strategies only run when every earlier one came back empty.

use crate::profile::CompiledProfile;
use scraper::{ElementRef, Html, Selector};

/// One way of finding review containers in a rendered document
pub trait DiscoveryStrategy {
    fn name(&self) -> &str;

    /// Containers in document order
    fn discover<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;
}

/// Selects every element matching a marker believed to wrap a whole review
#[derive(Debug, Clone)]
pub struct MarkerStrategy {
    container: Selector,
}

impl MarkerStrategy {
    pub fn new(container: Selector) -> Self {
        Self { container }
    }
}

impl DiscoveryStrategy for MarkerStrategy {
    fn name(&self) -> &str {
        "container-marker"
    }

    fn discover<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.container).collect()
    }
}

/// Finds review text nodes and walks up from each to the nearest matching ancestor.
///
/// Text nodes without such an ancestor are dropped.
#[derive(Debug, Clone)]
pub struct AncestorStrategy {
    content: Selector,
    ancestor: Selector,
}

impl AncestorStrategy {
    pub fn new(content: Selector, ancestor: Selector) -> Self {
        Self { content, ancestor }
    }
}

impl DiscoveryStrategy for AncestorStrategy {
    fn name(&self) -> &str {
        "content-ancestor"
    }

    fn discover<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document
            .select(&self.content)
            .filter_map(|text_node| nearest_ancestor(text_node, &self.ancestor))
            .collect()
    }
}

/// Closest ancestor of `element` matching `selector`
pub fn nearest_ancestor<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}

/// Runs discovery strategies in order until one finds containers
pub struct ContainerLocator {
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
}

impl ContainerLocator {
    pub fn new(strategies: Vec<Box<dyn DiscoveryStrategy>>) -> Self {
        Self { strategies }
    }

    /// Container marker first, then review text walked up to its container
    pub fn from_profile(profile: &CompiledProfile) -> Self {
        Self::new(vec![
            Box::new(MarkerStrategy::new(profile.container.clone())),
            Box::new(AncestorStrategy::new(profile.review_text.clone(), profile.container_ancestor.clone())),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Containers from the first strategy with a non-empty result, or none at all
    pub fn locate<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for strategy in &self.strategies {
            let containers = strategy.discover(document);
            if !containers.is_empty() {
                log::info!("Found {} review containers via {}", containers.len(), strategy.name());
                return containers;
            }
            log::debug!("Discovery strategy {} found no containers", strategy.name());
        }

        log::warn!("No review containers found by any discovery strategy");
        Vec::new()
    }
}
