//! Batch aggregation of extraction outcomes

use crate::record::{ExtractionOutcome, ReviewRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Final result of one crawl
///
/// `records.len() == success_count`, `failure_count == field_failures + record_failures`,
/// and the histogram holds exactly the ratings present in `records`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    records: Vec<ReviewRecord>,
    success_count: usize,
    failure_count: usize,
    field_failures: usize,
    record_failures: usize,
    rating_histogram: BTreeMap<u8, usize>,
}

impl BatchReport {
    /// Report of a run that produced nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    /// Containers that yielded no record, for any reason
    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    /// Containers skipped because a required field was absent
    pub fn field_failures(&self) -> usize {
        self.field_failures
    }

    /// Containers that failed for any other reason
    pub fn record_failures(&self) -> usize {
        self.record_failures
    }

    /// Containers examined
    pub fn processed(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Rating → number of records with that rating, in ascending rating order
    pub fn rating_histogram(&self) -> &BTreeMap<u8, usize> {
        &self.rating_histogram
    }

    pub fn rating_average(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: usize = self.records.iter().map(|r| usize::from(r.star_rating())).sum();
        Some(total as f64 / self.records.len() as f64)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parsed {} reviews: {} succeeded, {} failed",
            self.processed(),
            self.success_count,
            self.failure_count
        )?;
        if self.failure_count > 0 {
            write!(f, " ({} missing text, {} errors)", self.field_failures, self.record_failures)?;
        }

        if !self.rating_histogram.is_empty() {
            write!(f, "\nRating distribution:")?;
            for (stars, count) in &self.rating_histogram {
                write!(f, "\n  {} stars: {}", stars, count)?;
            }
        }
        Ok(())
    }
}

/// Classifies outcomes one at a time into a [`BatchReport`]
#[derive(Debug, Default)]
pub struct ResultAggregator {
    report: BatchReport,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive every item through `extract` in order and aggregate the outcomes
    pub fn collect<T>(
        items: impl IntoIterator<Item = T>,
        mut extract: impl FnMut(usize, T) -> ExtractionOutcome,
    ) -> BatchReport {
        let mut aggregator = Self::new();
        for (index, item) in items.into_iter().enumerate() {
            aggregator.accept(extract(index, item));
        }
        aggregator.finish()
    }

    pub fn accept(&mut self, outcome: ExtractionOutcome) {
        let report = &mut self.report;
        match outcome {
            ExtractionOutcome::Record(record) => {
                *report.rating_histogram.entry(record.star_rating()).or_insert(0) += 1;
                report.records.push(record);
                report.success_count += 1;
            }
            ExtractionOutcome::FieldFailure { .. } => {
                report.field_failures += 1;
                report.failure_count += 1;
            }
            ExtractionOutcome::RecordFailure { .. } => {
                report.record_failures += 1;
                report.failure_count += 1;
            }
        }
    }

    pub fn finish(self) -> BatchReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stars: u8) -> ExtractionOutcome {
        ExtractionOutcome::Record(ReviewRecord::new(format!("{} stars", stars), stars, "").unwrap())
    }

    fn mixed_outcomes() -> Vec<ExtractionOutcome> {
        vec![
            record(5),
            ExtractionOutcome::FieldFailure { index: 1, field: "review_text" },
            record(3),
            ExtractionOutcome::RecordFailure { index: 3, reason: "bad".to_string() },
            record(5),
        ]
    }

    #[test]
    fn test_collect_counts_every_outcome_once() {
        let outcomes = mixed_outcomes();
        let examined = outcomes.len();

        let report = ResultAggregator::collect(outcomes, |_, outcome| outcome);

        assert_eq!(report.success_count(), 3);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.field_failures(), 1);
        assert_eq!(report.record_failures(), 1);
        assert_eq!(report.processed(), examined);
        assert_eq!(report.records().len(), report.success_count());
    }

    #[test]
    fn test_histogram_matches_records() {
        let report = ResultAggregator::collect(mixed_outcomes(), |_, outcome| outcome);

        let expected: BTreeMap<u8, usize> = [(3, 1), (5, 2)].into_iter().collect();
        assert_eq!(report.rating_histogram(), &expected);
    }

    #[test]
    fn test_order_preserved() {
        let report = ResultAggregator::collect(mixed_outcomes(), |_, outcome| outcome);
        let texts: Vec<_> = report.records().iter().map(|r| r.text()).collect();

        assert_eq!(texts, vec!["5 stars", "3 stars", "5 stars"]);
    }

    #[test]
    fn test_indices_passed_in_order() {
        let mut seen = Vec::new();
        ResultAggregator::collect(["a", "b", "c"], |index, item| {
            seen.push((index, item));
            record(1)
        });

        assert_eq!(seen, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::empty();

        assert_eq!(report.processed(), 0);
        assert!(report.rating_histogram().is_empty());
        assert_eq!(report.rating_average(), None);
    }

    #[test]
    fn test_rating_average() {
        let report = ResultAggregator::collect(mixed_outcomes(), |_, outcome| outcome);
        let average = report.rating_average().unwrap();

        assert!((average - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_display() {
        let report = ResultAggregator::collect(mixed_outcomes(), |_, outcome| outcome);
        let summary = report.to_string();

        assert!(summary.starts_with("Parsed 5 reviews: 3 succeeded, 2 failed"));
        assert!(summary.contains("3 stars: 1"));
        assert!(summary.contains("5 stars: 2"));
        assert!(summary.find("3 stars").unwrap() < summary.find("5 stars: 2").unwrap());
    }
}
