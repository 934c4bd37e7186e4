//! Day-bucketed sentiment trend derivation.
//!
//! Like the summary, the trend series is derived from the ledger at read
//! time and never persisted.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::review::{Review, Sentiment};

/// Aggregate sentiment counts for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub positive: u64,
    pub negative: u64,
    pub suggestive: u64,
}

/// Build the trend series from the full ledger.
///
/// Reviews are grouped by the local calendar day of their classification
/// timestamp — two reviews on the same day at different times collapse into
/// one point. Output is ascending by day with no duplicate days; an empty
/// ledger yields an empty series.
pub fn build(ledger: &[Review]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, [u64; 3]> = BTreeMap::new();

    for review in ledger {
        let day = review.date.with_timezone(&Local).date_naive();
        let counts = days.entry(day).or_default();
        match review.sentiment {
            Sentiment::Positive => counts[0] += 1,
            Sentiment::Negative => counts[1] += 1,
            Sentiment::Suggestive => counts[2] += 1,
        }
    }

    days.into_iter()
        .map(|(day, [positive, negative, suggestive])| TrendPoint {
            day,
            positive,
            negative,
            suggestive,
        })
        .collect()
}
