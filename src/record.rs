//! Review records and per-container extraction outcomes

use crate::date::is_record_date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest star rating a review can carry
pub const MAX_RATING: u8 = 5;

/// One extracted review
///
/// Fields are validated on construction and cannot change afterwards. Serialized keys are
/// `review`, `stars`, `date`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct ReviewRecord {
    #[serde(rename = "review")]
    text: String,

    #[serde(rename = "stars")]
    star_rating: u8,

    date: String,
}

impl ReviewRecord {
    /// Build a record, checking the rating range and the date format
    pub fn new(text: impl Into<String>, star_rating: u8, date: impl Into<String>) -> Result<Self, RecordError> {
        let date = date.into();

        if star_rating > MAX_RATING {
            return Err(RecordError::RatingOutOfRange(star_rating));
        }
        if !is_record_date(&date) {
            return Err(RecordError::MalformedDate(date));
        }

        Ok(Self { text: text.into(), star_rating, date })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn star_rating(&self) -> u8 {
        self.star_rating
    }

    /// `YYYY.MM.DD`, or empty when the review showed no date
    pub fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Deserialize)]
struct RecordFields {
    review: String,
    stars: u8,
    date: String,
}

impl TryFrom<RecordFields> for ReviewRecord {
    type Error = RecordError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        Self::new(fields.review, fields.stars, fields.date)
    }
}

/// Why a single container did not yield a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("review text not found")]
    MissingText,

    #[error("star rating {0} outside 0..=5")]
    RatingOutOfRange(u8),

    #[error("malformed date '{0}'")]
    MalformedDate(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Result of processing one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A complete record
    Record(ReviewRecord),

    /// A required field was absent; the container is skipped
    FieldFailure { index: usize, field: &'static str },

    /// Anything else went wrong while processing the container
    RecordFailure { index: usize, reason: String },
}

impl ExtractionOutcome {
    /// Classify the result of extracting container `index`
    pub fn from_result(index: usize, result: Result<ReviewRecord, RecordError>) -> Self {
        match result {
            Ok(record) => Self::Record(record),
            Err(RecordError::MissingText) => Self::FieldFailure { index, field: "review_text" },
            Err(other) => Self::RecordFailure { index, reason: other.to_string() },
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = ReviewRecord::new("깨끗하고 좋았어요", 4, "2024.05.01").unwrap();

        assert_eq!(record.text(), "깨끗하고 좋았어요");
        assert_eq!(record.star_rating(), 4);
        assert_eq!(record.date(), "2024.05.01");
    }

    #[test]
    fn test_empty_date_is_allowed() {
        assert!(ReviewRecord::new("ok", 0, "").is_ok());
    }

    #[test]
    fn test_rating_out_of_range() {
        assert_eq!(ReviewRecord::new("ok", 6, ""), Err(RecordError::RatingOutOfRange(6)));
    }

    #[test]
    fn test_malformed_date() {
        assert_eq!(
            ReviewRecord::new("ok", 3, "2024/05/01"),
            Err(RecordError::MalformedDate("2024/05/01".to_string()))
        );
    }

    #[test]
    fn test_serialized_field_order() {
        let record = ReviewRecord::new("좋아요", 5, "2023.12.24").unwrap();
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(json, r#"{"review":"좋아요","stars":5,"date":"2023.12.24"}"#);
    }

    #[test]
    fn test_deserialize_rejects_invalid_rating() {
        let result: Result<ReviewRecord, _> = serde_json::from_str(r#"{"review":"x","stars":9,"date":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_classification() {
        assert!(ExtractionOutcome::from_result(0, ReviewRecord::new("a", 1, "")).is_record());

        assert_eq!(
            ExtractionOutcome::from_result(3, Err(RecordError::MissingText)),
            ExtractionOutcome::FieldFailure { index: 3, field: "review_text" }
        );

        match ExtractionOutcome::from_result(4, Err(RecordError::Unexpected("boom".to_string()))) {
            ExtractionOutcome::RecordFailure { index, reason } => {
                assert_eq!(index, 4);
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
