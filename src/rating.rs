//! Star rating decoding
//!
//! The listing renders a rating as a row of icons that share one class whether they are filled
//! or not. Only the path data differs, so the decoder classifies each icon by the leading
//! coordinate token of its path description. That heuristic is tied to the generated markup;
//! the tokens live in the selector profile so a markup revision only changes data.

use crate::profile::{CompiledProfile, IconMarkers};
use crate::record::MAX_RATING;
use scraper::{ElementRef, Selector};

/// Visual state of one rating icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    Filled,
    Unfilled,
    Unknown,
}

/// Integer part of the first coordinate in an SVG path description.
///
/// `"M12.638 2.471..."` yields `"12"`.
pub fn leading_token(path_data: &str) -> Option<&str> {
    let rest = path_data.trim_start();
    let rest = rest.strip_prefix(['M', 'm']).unwrap_or(rest).trim_start();

    let sign = usize::from(rest.starts_with('-'));
    let digits = rest[sign..].bytes().take_while(u8::is_ascii_digit).count();

    if digits == 0 {
        return None;
    }
    Some(&rest[..sign + digits])
}

/// Classify an icon by the leading token of its path data
pub fn classify_path(path_data: &str, markers: &IconMarkers) -> IconState {
    match leading_token(path_data) {
        Some(token) if token == markers.filled => IconState::Filled,
        Some(token) if token == markers.unfilled => IconState::Unfilled,
        _ => IconState::Unknown,
    }
}

/// Icon classification counts for one rating row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconTally {
    pub filled: usize,
    pub unfilled: usize,
    pub unknown: usize,
}

impl IconTally {
    pub fn total(&self) -> usize {
        self.filled + self.unfilled + self.unknown
    }

    fn add(&mut self, state: IconState) {
        match state {
            IconState::Filled => self.filled += 1,
            IconState::Unfilled => self.unfilled += 1,
            IconState::Unknown => self.unknown += 1,
        }
    }
}

/// Anomaly policy for rows reporting more filled icons than a rating allows.
///
/// Such markup is malformed; the rating falls back to the number of icons present,
/// capped at [`MAX_RATING`]. This is not a clamp of the filled count.
pub fn cap_to_icon_count(total_icons: usize) -> u8 {
    total_icons.min(usize::from(MAX_RATING)) as u8
}

/// Turn an icon tally into a rating in `0..=5`
pub fn resolve_rating(tally: IconTally) -> u8 {
    if tally.filled <= usize::from(MAX_RATING) {
        return tally.filled as u8;
    }

    log::warn!(
        "Malformed rating row: {} filled of {} icons, falling back to icon count",
        tally.filled,
        tally.total()
    );
    cap_to_icon_count(tally.total())
}

/// Strategy that reads a star rating out of a review container
pub trait RatingDecoder {
    /// Rating in `0..=5`; a container without a rating widget rates 0
    fn decode(&self, container: ElementRef<'_>) -> u8;
}

/// Decodes ratings by classifying icon path data against the profile's tokens
#[derive(Debug, Clone)]
pub struct PathPrefixDecoder {
    rating_container: Selector,
    rating_icon: Selector,
    icon_path: Selector,
    markers: IconMarkers,
}

impl PathPrefixDecoder {
    pub fn from_profile(profile: &CompiledProfile) -> Self {
        Self {
            rating_container: profile.rating_container.clone(),
            rating_icon: profile.rating_icon.clone(),
            icon_path: profile.icon_path.clone(),
            markers: profile.markers.clone(),
        }
    }

    /// Classify every icon of the container's rating row.
    ///
    /// `None` when the container has no rating sub-container.
    pub fn tally(&self, container: ElementRef<'_>) -> Option<IconTally> {
        let row = container.select(&self.rating_container).next()?;

        let mut tally = IconTally::default();
        for icon in row.select(&self.rating_icon) {
            let path_data = icon
                .select(&self.icon_path)
                .next()
                .and_then(|path| path.value().attr("d"))
                .unwrap_or("");
            tally.add(classify_path(path_data, &self.markers));
        }
        Some(tally)
    }
}

impl RatingDecoder for PathPrefixDecoder {
    fn decode(&self, container: ElementRef<'_>) -> u8 {
        match self.tally(container) {
            Some(tally) if tally.total() > 0 => resolve_rating(tally),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SelectorProfile;
    use scraper::Html;

    const FILLED: &str = "M12.638 2.471a.75.75 0 0 0-1.276 0L8.9 6.75";
    const UNFILLED: &str = "M10.693 3.123a1.5 1.5 0 0 1 2.614 0l2.06 3.87";

    fn markers() -> IconMarkers {
        IconMarkers { filled: "12".to_string(), unfilled: "10".to_string() }
    }

    fn star(path: &str) -> String {
        format!(r#"<svg class="css-1mj121y" viewBox="0 0 24 24"><path d="{}"></path></svg>"#, path)
    }

    fn review_with_icons(filled: usize, unfilled: usize) -> String {
        let icons: String = std::iter::repeat(star(FILLED))
            .take(filled)
            .chain(std::iter::repeat(star(UNFILLED)).take(unfilled))
            .collect();
        format!(r#"<div class="css-166s55a"><div class="css-rz7kwu">{}</div></div>"#, icons)
    }

    fn decode_html(html: &str) -> u8 {
        let profile = SelectorProfile::default().compile().unwrap();
        let decoder = PathPrefixDecoder::from_profile(&profile);
        let doc = Html::parse_fragment(html);
        let container = doc.select(&profile.container).next().unwrap();
        decoder.decode(container)
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token(FILLED), Some("12"));
        assert_eq!(leading_token(UNFILLED), Some("10"));
        assert_eq!(leading_token("  m -3.5 4"), Some("-3"));
        assert_eq!(leading_token("M.5 1"), None);
        assert_eq!(leading_token(""), None);
    }

    #[test]
    fn test_classify_path() {
        assert_eq!(classify_path(FILLED, &markers()), IconState::Filled);
        assert_eq!(classify_path(UNFILLED, &markers()), IconState::Unfilled);
        assert_eq!(classify_path("M4.2 8", &markers()), IconState::Unknown);
        // Only the whole token counts, not a textual prefix
        assert_eq!(classify_path("M120.5 3", &markers()), IconState::Unknown);
    }

    #[test]
    fn test_counts_filled_icons() {
        for k in 0..=5 {
            assert_eq!(decode_html(&review_with_icons(k, 5 - k)), k as u8, "k = {}", k);
        }
    }

    #[test]
    fn test_missing_rating_container() {
        assert_eq!(decode_html(r#"<div class="css-166s55a"><p>no stars here</p></div>"#), 0);
    }

    #[test]
    fn test_rating_container_without_icons() {
        assert_eq!(decode_html(r#"<div class="css-166s55a"><div class="css-rz7kwu"></div></div>"#), 0);
    }

    #[test]
    fn test_anomalous_filled_count_falls_back_to_icon_count() {
        assert_eq!(decode_html(&review_with_icons(7, 0)), 5);
    }

    #[test]
    fn test_unknown_icons_are_not_counted() {
        let html = format!(
            r#"<div class="css-166s55a"><div class="css-rz7kwu">{}{}{}</div></div>"#,
            star(FILLED),
            star("M4.2 8"),
            r#"<svg class="css-1mj121y"></svg>"#
        );
        assert_eq!(decode_html(&html), 1);
    }

    #[test]
    fn test_other_svgs_ignored() {
        let html = format!(
            r#"<div class="css-166s55a"><div class="css-rz7kwu">{}{}<svg class="css-165qm45"><path d="{}"></path></svg></div></div>"#,
            star(FILLED),
            star(UNFILLED),
            FILLED
        );
        assert_eq!(decode_html(&html), 1);
    }

    #[test]
    fn test_resolve_rating_policy() {
        assert_eq!(resolve_rating(IconTally { filled: 3, unfilled: 2, unknown: 0 }), 3);
        assert_eq!(resolve_rating(IconTally { filled: 6, unfilled: 0, unknown: 0 }), 5);
        assert_eq!(cap_to_icon_count(2), 2);
        assert_eq!(cap_to_icon_count(40), 5);
    }
}
