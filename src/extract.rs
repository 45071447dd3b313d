//! Per-container field extraction

use crate::date::extract_date;
use crate::profile::CompiledProfile;
use crate::rating::{PathPrefixDecoder, RatingDecoder};
use crate::record::{ExtractionOutcome, RecordError, ReviewRecord};
use scraper::{ElementRef, Selector};

/// Turns one review container into an [`ExtractionOutcome`]
pub struct RecordExtractor {
    review_text: Selector,
    review_text_broad: Selector,
    secondary_text: Selector,
    decoder: Box<dyn RatingDecoder>,
}

impl RecordExtractor {
    pub fn new(
        review_text: Selector,
        review_text_broad: Selector,
        secondary_text: Selector,
        decoder: Box<dyn RatingDecoder>,
    ) -> Self {
        Self { review_text, review_text_broad, secondary_text, decoder }
    }

    pub fn from_profile(profile: &CompiledProfile) -> Self {
        Self::new(
            profile.review_text.clone(),
            profile.review_text_broad.clone(),
            profile.secondary_text.clone(),
            Box::new(PathPrefixDecoder::from_profile(profile)),
        )
    }

    /// Extract container `index`; never fails, failures are part of the outcome
    pub fn extract(&self, index: usize, container: ElementRef<'_>) -> ExtractionOutcome {
        let outcome = ExtractionOutcome::from_result(index, self.try_extract(container));

        match &outcome {
            ExtractionOutcome::Record(_) => {}
            ExtractionOutcome::FieldFailure { field, .. } => {
                log::debug!("Review {} skipped: missing {}", index, field);
            }
            ExtractionOutcome::RecordFailure { reason, .. } => {
                log::warn!("Review {} failed to parse: {}", index, reason);
            }
        }
        outcome
    }

    fn try_extract(&self, container: ElementRef<'_>) -> Result<ReviewRecord, RecordError> {
        let text = self.review_text(container).ok_or(RecordError::MissingText)?;
        let stars = self.decoder.decode(container);
        let date = self.date(container);

        ReviewRecord::new(text, stars, date)
    }

    /// Trimmed review text, trying the primary marker before the broad one
    pub fn review_text(&self, container: ElementRef<'_>) -> Option<String> {
        container
            .select(&self.review_text)
            .next()
            .or_else(|| container.select(&self.review_text_broad).next())
            .map(|node| collect_text(node).trim().to_string())
    }

    /// Date from the first secondary text line only; later lines hold other details
    pub fn date(&self, container: ElementRef<'_>) -> String {
        container
            .select(&self.secondary_text)
            .next()
            .map(|line| extract_date(collect_text(line).trim()))
            .unwrap_or_default()
    }
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
