use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also accept other Unicode digit classes
static DATE_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}\.[0-9]{2}\.[0-9]{2}").expect("date pattern is valid"));

static DATE_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2}$").expect("date pattern is valid"));

/// Pull the first `YYYY.MM.DD` date out of a secondary text line.
///
/// Returns an empty string when the line holds no date (the line may be a username or a room name).
pub fn extract_date(text: &str) -> String {
    DATE_IN_TEXT
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Whether `date` is a valid record date: empty, or exactly `YYYY.MM.DD`
pub fn is_record_date(date: &str) -> bool {
    date.is_empty() || DATE_EXACT.is_match(date)
}
