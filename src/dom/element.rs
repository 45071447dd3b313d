use indexmap::IndexMap;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Detached snapshot of a DOM element, used in structure reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Tag name (e.g., "div", "svg", "path")
    pub tag_name: String,

    /// Attributes, in the order the parser reports them
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Trimmed direct text of the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            text_content: None,
            children: Vec::new(),
        }
    }

    /// Snapshot `element` and its descendants down to `depth` levels below it
    pub fn snapshot(element: ElementRef<'_>, depth: usize) -> Self {
        let mut node = Self::new(element.value().name());

        for (key, value) in element.value().attrs() {
            node.add_attribute(key, value);
        }

        let own_text: String = element
            .children()
            .filter_map(|child| child.value().as_text().map(|t| &**t))
            .collect();
        let own_text = own_text.trim();
        if !own_text.is_empty() {
            node.text_content = Some(own_text.to_string());
        }

        if depth > 0 {
            for child in element.children().filter_map(ElementRef::wrap) {
                node.add_child(Self::snapshot(child, depth - 1));
            }
        }

        node
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Class names in attribute order
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().contains(&class_name)
    }

    /// Attributes whose name starts with `data-`
    pub fn data_attributes(&self) -> impl Iterator<Item = (&String, &String)> {
        self.attributes.iter().filter(|(k, _)| k.starts_with("data-"))
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Count this element and all descendants
    pub fn count_elements(&self) -> usize {
        1 + self.children.iter().map(ElementNode::count_elements).sum::<usize>()
    }

    /// Convert to a simplified string representation
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name)];

        if let Some(id) = self.get_attribute("id") {
            parts.push(format!(" id=\"{}\"", id));
        }

        if let Some(class) = self.attributes.get("class") {
            parts.push(format!(" class=\"{}\"", class));
        }

        parts.push(">".to_string());

        if let Some(text) = &self.text_content {
            parts.push(text.clone());
        }

        parts.join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_snapshot_attributes_and_text() {
        let doc = Html::parse_fragment(r#"<div id="r1" class="css-a css-b" data-idx="3" aria-label="리뷰">hi <b>there</b></div>"#);
        let node = ElementNode::snapshot(first(&doc, "div"), 0);

        assert_eq!(node.attributes.len(), 4);
        assert_eq!(node.get_attribute("aria-label").map(String::as_str), Some("리뷰"));
        assert_eq!(node.classes(), vec!["css-a", "css-b"]);
        assert_eq!(node.text_content.as_deref(), Some("hi"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_snapshot_depth_limit() {
        let doc = Html::parse_fragment("<div><section><p><span>deep</span></p></section></div>");

        assert_eq!(ElementNode::snapshot(first(&doc, "div"), 0).count_elements(), 1);
        assert_eq!(ElementNode::snapshot(first(&doc, "div"), 1).count_elements(), 2);
        assert_eq!(ElementNode::snapshot(first(&doc, "div"), 5).count_elements(), 4);
    }

    #[test]
    fn test_classes_and_data_attributes() {
        let mut node = ElementNode::new("div");
        node.add_attribute("class", "css-166s55a  wide");
        node.add_attribute("data-review-id", "42");
        node.add_attribute("role", "article");

        assert_eq!(node.classes(), vec!["css-166s55a", "wide"]);
        assert!(node.has_class("wide"));
        assert!(!node.has_class("css"));

        let data: Vec<_> = node.data_attributes().collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].1, "42");
    }

    #[test]
    fn test_to_simple_string() {
        let mut node = ElementNode::new("p").with_text("2022.09.30");
        node.add_attribute("class", "css-6lreu3");

        assert_eq!(node.to_simple_string(), r#"<p class="css-6lreu3">2022.09.30"#);
        assert!(node.is_tag("P"));
    }

    #[test]
    fn test_serialization() {
        let mut node = ElementNode::new("svg");
        node.add_attribute("class", "css-1mj121y");
        node.add_child(ElementNode::new("path"));

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: ElementNode = serde_json::from_str(&json).unwrap();

        assert_eq!(node, deserialized);
    }
}
