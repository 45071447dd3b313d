//! Structure inspection for diagnosing markup drift
//!
//! When both discovery strategies degrade, the generated class names have usually changed.
//! [`inspect_structure`] dumps what surrounds the first few review texts (ancestor classes,
//! icon samples, labelled and data attributes) so a new selector profile can be written.
//! Nothing here feeds the crawl pipeline.

use crate::dom::ElementNode;
use crate::profile::CompiledProfile;
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;

const TEXT_PREVIEW_CHARS: usize = 100;
const MAX_ANCESTOR_LEVELS: usize = 5;
const MAX_SVG_SAMPLES: usize = 10;
const PATH_PREVIEW_CHARS: usize = 50;
const MAX_ARIA_SAMPLES: usize = 5;
const MAX_KEYWORD_SAMPLES: usize = 3;
const SNAPSHOT_LEVELS: usize = 3;
const SNIPPET_CHARS: usize = 800;

/// What to inspect
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Number of review texts to analyse
    pub limit: usize,

    /// Class substrings worth flagging (matched case-insensitively)
    pub keywords: Vec<String>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            keywords: vec!["star".to_string(), "rating".to_string(), "score".to_string()],
        }
    }
}

impl InspectOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }
}

/// Page-wide structure overview
#[derive(Debug, Clone, Serialize)]
pub struct StructureReport {
    pub svg_count: usize,
    pub review_text_count: usize,
    /// First svg on the page, with its parent
    pub first_svg: Option<SvgSample>,
    pub reviews: Vec<ReviewStructure>,
}

/// Structure around one review text node
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStructure {
    /// 1-based position among review texts
    pub number: usize,
    pub text_preview: String,
    /// Enclosing `div`s, nearest first
    pub ancestors: Vec<AncestorLevel>,
    pub svgs: Vec<SvgSample>,
    pub svg_count: usize,
    pub aria_labels: Vec<ElementNode>,
    pub data_attributes: IndexMap<String, String>,
    pub keyword_matches: Vec<KeywordMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AncestorLevel {
    pub level: usize,
    pub element: ElementNode,
    /// Leading part of the level's outer HTML, for the innermost levels only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SvgSample {
    pub classes: Option<String>,
    pub parent_tag: Option<String>,
    pub parent_classes: Option<String>,
    pub path_preview: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub count: usize,
    pub samples: Vec<ElementNode>,
}

/// Analyse the structure around the first `options.limit` review texts of `html`
pub fn inspect_structure(html: &str, profile: &CompiledProfile, options: &InspectOptions) -> StructureReport {
    let document = Html::parse_document(html);
    let svg = selector("svg");
    let div = selector("div");
    let path = selector("path");
    let aria = selector("[aria-label]");
    let any = selector("*");

    let svgs: Vec<_> = document.select(&svg).collect();
    let texts: Vec<_> = document.select(&profile.review_text_broad).collect();

    let reviews = texts
        .iter()
        .take(options.limit)
        .enumerate()
        .map(|(i, text)| {
            let levels: Vec<_> = text
                .ancestors()
                .filter_map(ElementRef::wrap)
                .filter(|el| div.matches(el))
                .take(MAX_ANCESTOR_LEVELS)
                .collect();
            // The widest level is the most likely to contain the rating row
            let scope = levels.last().copied().unwrap_or(*text);

            let ancestors = levels
                .iter()
                .enumerate()
                .map(|(depth, el)| AncestorLevel {
                    level: depth + 1,
                    element: ElementNode::snapshot(*el, 0),
                    snippet: (depth < SNAPSHOT_LEVELS).then(|| truncate(&el.html(), SNIPPET_CHARS)),
                })
                .collect();

            let scope_svgs: Vec<_> = scope.select(&svg).collect();

            let keyword_matches = options
                .keywords
                .iter()
                .filter_map(|keyword| {
                    let needle = keyword.to_lowercase();
                    let matches: Vec<_> = scope
                        .select(&any)
                        .filter(|el| {
                            el.value()
                                .attr("class")
                                .is_some_and(|c| c.to_lowercase().contains(&needle))
                        })
                        .collect();
                    (!matches.is_empty()).then(|| KeywordMatch {
                        keyword: keyword.clone(),
                        count: matches.len(),
                        samples: matches
                            .iter()
                            .take(MAX_KEYWORD_SAMPLES)
                            .map(|el| ElementNode::snapshot(*el, 0))
                            .collect(),
                    })
                })
                .collect();

            ReviewStructure {
                number: i + 1,
                text_preview: truncate(text.text().collect::<String>().trim(), TEXT_PREVIEW_CHARS),
                ancestors,
                svg_count: scope_svgs.len(),
                svgs: scope_svgs
                    .iter()
                    .take(MAX_SVG_SAMPLES)
                    .map(|el| svg_sample(*el, &path))
                    .collect(),
                aria_labels: scope
                    .select(&aria)
                    .take(MAX_ARIA_SAMPLES)
                    .map(|el| ElementNode::snapshot(el, 0))
                    .collect(),
                data_attributes: ElementNode::snapshot(scope, 0)
                    .data_attributes()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                keyword_matches,
            }
        })
        .collect();

    StructureReport {
        svg_count: svgs.len(),
        review_text_count: texts.len(),
        first_svg: svgs.first().map(|el| svg_sample(*el, &path)),
        reviews,
    }
}

fn svg_sample(svg: ElementRef<'_>, path: &Selector) -> SvgSample {
    let parent = svg.parent().and_then(ElementRef::wrap);
    SvgSample {
        classes: svg.value().attr("class").map(str::to_string),
        parent_tag: parent.map(|p| p.value().name().to_string()),
        parent_classes: parent.and_then(|p| p.value().attr("class")).map(str::to_string),
        path_preview: svg
            .select(path)
            .next()
            .and_then(|p| p.value().attr("d"))
            .map(|d| truncate(d, PATH_PREVIEW_CHARS)),
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("built-in selector is valid")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl fmt::Display for SvgSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    class: {}", opt(&self.classes))?;
        writeln!(f, "    parent: <{}> class={}", opt(&self.parent_tag), opt(&self.parent_classes))?;
        write!(f, "    path d: {}", opt(&self.path_preview))
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);

        writeln!(f, "{}", rule)?;
        writeln!(f, "Review markup structure")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Review texts found: {}", self.review_text_count)?;
        writeln!(
            f,
            "SVG elements on page: {} (expected about {} for 5 icons per review)",
            self.svg_count,
            self.review_text_count * 5
        )?;
        if let Some(sample) = &self.first_svg {
            writeln!(f, "First SVG:")?;
            writeln!(f, "{}", sample)?;
        }

        for review in &self.reviews {
            writeln!(f, "\n{}", rule)?;
            writeln!(f, "Review #{}", review.number)?;
            writeln!(f, "{}", rule)?;
            writeln!(f, "Text: {}", review.text_preview)?;

            writeln!(f, "\nAncestor hierarchy ({} levels):", review.ancestors.len())?;
            for level in &review.ancestors {
                writeln!(f, "  Level {}: {}", level.level, level.element.to_simple_string())?;
            }
            if review.ancestors.is_empty() {
                writeln!(f, "  (no enclosing div)")?;
            }

            writeln!(f, "\nSVG elements: {}", review.svg_count)?;
            for (i, svg) in review.svgs.iter().enumerate() {
                writeln!(f, "  SVG #{}:", i + 1)?;
                writeln!(f, "{}", svg)?;
            }

            if !review.aria_labels.is_empty() {
                writeln!(f, "\naria-label holders:")?;
                for node in &review.aria_labels {
                    writeln!(f, "  {}: {}", node.tag_name, opt(&node.get_attribute("aria-label").cloned()))?;
                }
            }

            if !review.data_attributes.is_empty() {
                writeln!(f, "\ndata attributes:")?;
                for (key, value) in &review.data_attributes {
                    writeln!(f, "  {}: {}", key, value)?;
                }
            }

            for found in &review.keyword_matches {
                writeln!(f, "\nClasses containing '{}': {}", found.keyword, found.count)?;
                for node in &found.samples {
                    writeln!(f, "  {}", node.to_simple_string())?;
                }
            }

            let snippets: Vec<_> = review.ancestors.iter().filter(|l| l.snippet.is_some()).collect();
            if !snippets.is_empty() {
                writeln!(f, "\nHTML by level:")?;
                for level in snippets {
                    writeln!(f, "  --- Level {} ---", level.level)?;
                    writeln!(f, "{}", opt(&level.snippet))?;
                }
            }
        }
        Ok(())
    }
}
