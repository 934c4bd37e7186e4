//! Wire types exchanged with the external analysis services.

use serde::{Deserialize, Serialize};

use crate::review::Sentiment;

/// A raw uploaded document queued for classification.
#[derive(Debug, Clone)]
pub struct Document {
    /// Original filename; the classifier echoes it back in its verdict.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// One classifier verdict for a submitted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedDocument {
    pub filename: String,
    pub category: Sentiment,
    pub score: f64,
}

/// Word frequency entry from the keyword service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub count: u64,
}

/// Per-comment breakdown for one stored review document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetails {
    pub overall_score: f64,
    pub comments: Vec<ReviewComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    pub text: String,
    pub score: f64,
}
