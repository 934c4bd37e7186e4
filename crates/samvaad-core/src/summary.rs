//! Sentiment summary derivation.
//!
//! The summary is a cache over the review ledger, never a source of truth.
//! It is recomputed from scratch on every ledger change rather than patched
//! incrementally, so it cannot drift from the ledger.

use serde::{Deserialize, Serialize};

use crate::review::{Review, Sentiment};

/// Count and share of one sentiment category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSlice {
    pub count: u64,
    /// Rounded share of the total, 0–100. Zero when the ledger is empty.
    pub percentage: u8,
}

/// Per-category counts and percentages for one draft.
///
/// Each percentage is rounded independently from its count/total ratio, so
/// the three may sum to 98–102 rather than exactly 100. That slack is
/// documented behaviour, not corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: SentimentSlice,
    pub negative: SentimentSlice,
    pub suggestive: SentimentSlice,
}

impl SentimentSummary {
    /// Total review count across all three categories.
    pub fn total(&self) -> u64 {
        self.positive.count + self.negative.count + self.suggestive.count
    }

    pub fn slice(&self, sentiment: Sentiment) -> SentimentSlice {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Suggestive => self.suggestive,
        }
    }
}

/// Recompute the summary from the full ledger.
///
/// Pure function of the ledger contents; consults no prior summary state.
pub fn recompute(ledger: &[Review]) -> SentimentSummary {
    let mut counts = [0u64; 3];
    for review in ledger {
        match review.sentiment {
            Sentiment::Positive => counts[0] += 1,
            Sentiment::Negative => counts[1] += 1,
            Sentiment::Suggestive => counts[2] += 1,
        }
    }

    let total: u64 = counts.iter().sum();
    let slice = |count: u64| SentimentSlice {
        count,
        percentage: percentage_of(count, total),
    };

    SentimentSummary {
        positive: slice(counts[0]),
        negative: slice(counts[1]),
        suggestive: slice(counts[2]),
    }
}

fn percentage_of(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u8
}
