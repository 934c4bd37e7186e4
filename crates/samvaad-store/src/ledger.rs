//! Append-only review ledger and its cached summary.

use std::sync::Arc;

use tracing::{info, warn};

use samvaad_core::{Review, SentimentSummary, summary};

use crate::{KvStore, StoreError, decode};

fn reviews_key(draft_id: i64) -> String {
    format!("reviews_{draft_id}")
}

fn summary_key(draft_id: i64) -> String {
    format!("sentimentSummary_{draft_id}")
}

/// Per-draft ordered collection of review records.
///
/// Append-only by contract: there is no delete or mutate operation. The
/// ledger is the sole source of truth from which the summary and trend are
/// derived.
pub struct ReviewLedger {
    store: Arc<dyn KvStore>,
}

impl ReviewLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All reviews for a draft, in insertion order.
    pub fn get_all(&self, draft_id: i64) -> Result<Vec<Review>, StoreError> {
        let key = reviews_key(draft_id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };
        Ok(decode(&key, &raw).unwrap_or_default())
    }

    /// Append a batch to a draft's ledger in one write.
    ///
    /// Returns the full updated sequence.
    pub fn append(
        &self,
        draft_id: i64,
        reviews: Vec<Review>,
    ) -> Result<Vec<Review>, StoreError> {
        let mut all = self.get_all(draft_id)?;
        let appended = reviews.len();
        all.extend(reviews);
        self.store
            .set(&reviews_key(draft_id), &serde_json::to_string(&all)?)?;
        info!(draft_id, appended, total = all.len(), "appended reviews");
        Ok(all)
    }

    /// Next free review id for a draft's ledger: one greater than the
    /// highest id ever appended, starting at 1.
    pub fn next_id(&self, draft_id: i64) -> Result<u64, StoreError> {
        Ok(self
            .get_all(draft_id)?
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(1, |max| max + 1))
    }

    /// Current summary for a draft, derived from the ledger.
    ///
    /// The cached value is never trusted: the summary is recomputed from
    /// the ledger on every read, and a cache that disagrees (a batch whose
    /// summary write was lost, or malformed data) is rewritten to match.
    pub fn summary(&self, draft_id: i64) -> Result<SentimentSummary, StoreError> {
        let derived = summary::recompute(&self.get_all(draft_id)?);
        match self.cached_summary(draft_id)? {
            Some(cached) if cached == derived => {}
            cached => {
                if cached.is_some() {
                    warn!(draft_id, "cached summary disagrees with ledger, rewriting");
                }
                self.write_summary(draft_id, &derived)?;
            }
        }
        Ok(derived)
    }

    /// The raw cached summary, if one was persisted. Diagnostics only —
    /// use [`summary`](Self::summary) for a trustworthy value.
    pub fn cached_summary(
        &self,
        draft_id: i64,
    ) -> Result<Option<SentimentSummary>, StoreError> {
        let key = summary_key(draft_id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };
        Ok(decode(&key, &raw))
    }

    /// Persist the cached summary for a draft.
    pub fn write_summary(
        &self,
        draft_id: i64,
        summary: &SentimentSummary,
    ) -> Result<(), StoreError> {
        self.store
            .set(&summary_key(draft_id), &serde_json::to_string(summary)?)
    }
}
