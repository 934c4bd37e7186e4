//! Shared domain types: drafts, reviews, and sentiment categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment category assigned to a review by the analysis service.
///
/// Serialized as lowercase strings on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Suggestive,
}

impl Sentiment {
    /// All categories, in display order.
    pub const ALL: [Sentiment; 3] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Suggestive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Suggestive => "suggestive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "suggestive" => Ok(Self::Suggestive),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// A sentiment string outside the three known categories.
#[derive(Debug, thiserror::Error)]
#[error("unknown sentiment category: {0}")]
pub struct UnknownSentiment(pub String);

/// A consultation draft under which uploaded reviews are collected.
///
/// Created by explicit user action and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub title: String,
    /// Calendar date of the consultation as entered, `YYYY-MM-DD`.
    pub date: String,
    pub description: String,
}

/// One classified review document in a draft's ledger.
///
/// Created only by the upload path; immutable and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique within the draft's ledger, allocated sequentially.
    pub id: u64,
    /// Display title derived from the uploaded filename.
    pub title: String,
    pub sentiment: Sentiment,
    /// Classification time, not the time the document was written.
    pub date: DateTime<Utc>,
    /// Numeric score assigned by the classifier.
    pub score: f64,
}

impl Review {
    /// Filename this review's document was stored under on the analysis
    /// service.
    ///
    /// The upload path only accepts `.pdf` documents, so the stored name is
    /// the title with spaces restored to underscores plus that extension.
    pub fn source_filename(&self) -> String {
        format!("{}.pdf", self.title.replace(' ', "_"))
    }
}

/// Derive a review title from an uploaded filename.
///
/// The extension is dropped and separators (`_`, `-`) become spaces:
/// `public_feedback-round2.pdf` → `public feedback round2`.
pub fn title_from_filename(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    stem.replace(['_', '-'], " ")
}
