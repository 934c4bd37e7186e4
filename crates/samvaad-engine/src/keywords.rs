//! Sentiment-filtered keyword passthrough.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use samvaad_client::{ClientError, Keywords};
use samvaad_core::document::KeywordStat;
use samvaad_core::{Review, Sentiment};
use samvaad_store::{ReviewLedger, StoreError};

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("keyword request failed: {0}")]
    ServiceFailed(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Forwards a draft's sentiment-filtered document names to the keyword
/// service.
///
/// Stateless passthrough: no local cache, no retry — failures surface to
/// the caller as-is.
pub struct KeywordQuery {
    ledger: ReviewLedger,
    service: Arc<dyn Keywords>,
}

impl KeywordQuery {
    pub fn new(ledger: ReviewLedger, service: Arc<dyn Keywords>) -> Self {
        Self { ledger, service }
    }

    /// Word frequencies across a draft's reviews of one sentiment.
    ///
    /// Returns an empty map without calling the service when the draft has
    /// no reviews of that sentiment.
    pub async fn frequencies(
        &self,
        draft_id: i64,
        sentiment: Sentiment,
    ) -> Result<HashMap<String, KeywordStat>, KeywordError> {
        let filenames: Vec<String> = self
            .ledger
            .get_all(draft_id)?
            .iter()
            .filter(|r| r.sentiment == sentiment)
            .map(Review::source_filename)
            .collect();

        if filenames.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self.service.keywords(&filenames, sentiment).await?)
    }
}
