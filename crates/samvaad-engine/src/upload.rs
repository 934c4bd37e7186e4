//! Batch upload coordination.
//!
//! Turns one upload action into a consistent ledger and summary update:
//! one classifier exchange, one ledger write, one summary write. The
//! persistence medium is not transactional, so the summary write can be
//! lost after the ledger write succeeds; the ledger's read-time
//! reconciliation closes that window on the next summary read.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use samvaad_client::{Classify, ClientError};
use samvaad_core::document::Document;
use samvaad_core::{Review, SentimentSummary, summary, title_from_filename};
use samvaad_store::{DraftStore, ReviewLedger, StoreError};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("classifier request failed: {0}")]
    ClassifierFailed(#[from] ClientError),

    #[error("classifier matched {matched} of {expected} submitted documents")]
    PartialBatch { expected: usize, matched: usize },

    #[error("unknown draft: {0}")]
    UnknownDraft(i64),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Result of a successful batch submission.
#[derive(Debug, Clone, Copy)]
pub struct BatchOutcome {
    /// Number of reviews appended to the ledger.
    pub accepted: usize,
    /// Summary derived from the updated ledger.
    pub summary: SentimentSummary,
}

/// Coordinates a batch of raw documents through classification, ledger
/// append, and summary refresh.
///
/// Callers must serialise submissions for the same draft: two interleaved
/// submissions would each read the same pre-batch ledger and one batch
/// would silently overwrite the other's tail.
pub struct UploadCoordinator {
    drafts: DraftStore,
    ledger: ReviewLedger,
    classifier: Arc<dyn Classify>,
}

impl UploadCoordinator {
    pub fn new(
        drafts: DraftStore,
        ledger: ReviewLedger,
        classifier: Arc<dyn Classify>,
    ) -> Self {
        Self {
            drafts,
            ledger,
            classifier,
        }
    }

    /// Submit one batch of documents for a draft.
    ///
    /// An empty batch is a no-op success: no network call is made and the
    /// current summary is returned. A classifier failure or any result
    /// mismatch rejects the whole batch and leaves the ledger untouched —
    /// there is no partial application.
    pub async fn submit(
        &self,
        draft_id: i64,
        documents: &[Document],
    ) -> Result<BatchOutcome, UploadError> {
        if documents.is_empty() {
            return Ok(BatchOutcome {
                accepted: 0,
                summary: self.ledger.summary(draft_id)?,
            });
        }
        if self.drafts.get(draft_id)?.is_none() {
            return Err(UploadError::UnknownDraft(draft_id));
        }

        let results = self.classifier.classify(documents).await?;
        if results.len() != documents.len() {
            return Err(UploadError::PartialBatch {
                expected: documents.len(),
                matched: results.len(),
            });
        }

        // Verdicts are matched to documents by their echoed filename,
        // never by position in the response array.
        let mut verdicts: HashMap<&str, _> = results
            .iter()
            .map(|r| (r.filename.as_str(), r))
            .collect();

        let mut next_id = self.ledger.next_id(draft_id)?;
        let now = Utc::now();
        let mut reviews = Vec::with_capacity(documents.len());
        for doc in documents {
            let Some(verdict) = verdicts.remove(doc.filename.as_str()) else {
                return Err(UploadError::PartialBatch {
                    expected: documents.len(),
                    matched: reviews.len(),
                });
            };
            reviews.push(Review {
                id: next_id,
                title: title_from_filename(&doc.filename),
                sentiment: verdict.category,
                date: now,
                score: verdict.score,
            });
            next_id += 1;
        }

        let all = self.ledger.append(draft_id, reviews)?;
        let summary = summary::recompute(&all);
        self.ledger.write_summary(draft_id, &summary)?;

        info!(
            draft_id,
            accepted = documents.len(),
            total = all.len(),
            "batch applied"
        );
        Ok(BatchOutcome {
            accepted: documents.len(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use samvaad_core::Sentiment;
    use samvaad_core::document::ClassifiedDocument;
    use samvaad_store::MemoryStore;

    struct FixedClassifier(Vec<ClassifiedDocument>);

    #[async_trait]
    impl Classify for FixedClassifier {
        async fn classify(
            &self,
            _documents: &[Document],
        ) -> Result<Vec<ClassifiedDocument>, ClientError> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl Classify for FailingClassifier {
        async fn classify(
            &self,
            _documents: &[Document],
        ) -> Result<Vec<ClassifiedDocument>, ClientError> {
            Err(ClientError::Server {
                status: 502,
                body: "bad gateway".into(),
            })
        }
    }

    /// Stub for paths that must never reach the network.
    struct UnreachableClassifier;

    #[async_trait]
    impl Classify for UnreachableClassifier {
        async fn classify(
            &self,
            _documents: &[Document],
        ) -> Result<Vec<ClassifiedDocument>, ClientError> {
            panic!("classifier must not be called");
        }
    }

    fn verdict(filename: &str, category: Sentiment, score: f64) -> ClassifiedDocument {
        ClassifiedDocument {
            filename: filename.to_string(),
            category,
            score,
        }
    }

    fn document(filename: &str) -> Document {
        Document::new(filename, b"%PDF-1.4".to_vec())
    }

    /// Coordinator over a fresh in-memory store with one draft (id 1),
    /// plus an independent ledger view for assertions.
    fn setup(classifier: Arc<dyn Classify>) -> (UploadCoordinator, ReviewLedger) {
        let kv = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(kv.clone());
        drafts.create("Test Draft", "2026-03-01", "").unwrap();
        let coordinator =
            UploadCoordinator::new(drafts, ReviewLedger::new(kv.clone()), classifier);
        (coordinator, ReviewLedger::new(kv))
    }

    #[tokio::test]
    async fn batch_of_two_grows_ledger_by_two() {
        let classifier = Arc::new(FixedClassifier(vec![
            verdict("alpha_report.pdf", Sentiment::Positive, 88.0),
            verdict("beta_report.pdf", Sentiment::Negative, 23.0),
        ]));
        let (coordinator, ledger) = setup(classifier);

        let outcome = coordinator
            .submit(1, &[document("alpha_report.pdf"), document("beta_report.pdf")])
            .await
            .unwrap();

        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.summary.total(), 2);

        let all = ledger.get_all(1).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].title, "alpha report");
        assert_eq!(all[0].score, 88.0);
        assert_eq!(all[1].id, 2);
        assert_eq!(all[1].sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn verdicts_are_matched_by_filename_not_position() {
        // Response order is the reverse of submission order.
        let classifier = Arc::new(FixedClassifier(vec![
            verdict("beta_report.pdf", Sentiment::Negative, 23.0),
            verdict("alpha_report.pdf", Sentiment::Positive, 88.0),
        ]));
        let (coordinator, ledger) = setup(classifier);

        coordinator
            .submit(1, &[document("alpha_report.pdf"), document("beta_report.pdf")])
            .await
            .unwrap();

        let all = ledger.get_all(1).unwrap();
        assert_eq!(all[0].title, "alpha report");
        assert_eq!(all[0].sentiment, Sentiment::Positive);
        assert_eq!(all[1].title, "beta report");
        assert_eq!(all[1].sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn classifier_failure_leaves_ledger_untouched() {
        let (coordinator, ledger) = setup(Arc::new(FailingClassifier));

        let err = coordinator
            .submit(1, &[document("alpha_report.pdf")])
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::ClassifierFailed(_)));
        assert!(ledger.get_all(1).unwrap().is_empty());
        assert!(ledger.cached_summary(1).unwrap().is_none());
    }

    #[tokio::test]
    async fn result_count_mismatch_rejects_the_batch() {
        let classifier = Arc::new(FixedClassifier(vec![verdict(
            "alpha_report.pdf",
            Sentiment::Positive,
            88.0,
        )]));
        let (coordinator, ledger) = setup(classifier);

        let err = coordinator
            .submit(1, &[document("alpha_report.pdf"), document("beta_report.pdf")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::PartialBatch {
                expected: 2,
                matched: 1
            }
        ));
        assert!(ledger.get_all(1).unwrap().is_empty());
    }

    #[tokio::test]
    async fn filename_mismatch_rejects_the_batch() {
        let classifier = Arc::new(FixedClassifier(vec![
            verdict("alpha_report.pdf", Sentiment::Positive, 88.0),
            verdict("unrelated.pdf", Sentiment::Negative, 10.0),
        ]));
        let (coordinator, ledger) = setup(classifier);

        let err = coordinator
            .submit(1, &[document("alpha_report.pdf"), document("beta_report.pdf")])
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::PartialBatch { expected: 2, .. }));
        assert!(ledger.get_all(1).unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_a_noop_without_network() {
        let (coordinator, ledger) = setup(Arc::new(UnreachableClassifier));

        let outcome = coordinator.submit(1, &[]).await.unwrap();

        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.summary.total(), 0);
        assert!(ledger.get_all(1).unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_draft_is_rejected_before_classification() {
        let (coordinator, _) = setup(Arc::new(UnreachableClassifier));

        let err = coordinator
            .submit(99, &[document("alpha_report.pdf")])
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::UnknownDraft(99)));
    }

    #[tokio::test]
    async fn second_batch_continues_the_id_sequence() {
        let classifier = Arc::new(FixedClassifier(vec![verdict(
            "alpha_report.pdf",
            Sentiment::Positive,
            88.0,
        )]));
        let (coordinator, ledger) = setup(classifier);

        coordinator
            .submit(1, &[document("alpha_report.pdf")])
            .await
            .unwrap();
        coordinator
            .submit(1, &[document("alpha_report.pdf")])
            .await
            .unwrap();

        let ids: Vec<u64> = ledger.get_all(1).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn summary_cache_matches_the_ledger_after_submit() {
        let classifier = Arc::new(FixedClassifier(vec![
            verdict("a.pdf", Sentiment::Positive, 90.0),
            verdict("b.pdf", Sentiment::Suggestive, 50.0),
        ]));
        let (coordinator, ledger) = setup(classifier);

        let outcome = coordinator
            .submit(1, &[document("a.pdf"), document("b.pdf")])
            .await
            .unwrap();

        assert_eq!(ledger.cached_summary(1).unwrap(), Some(outcome.summary));
        assert_eq!(outcome.summary.positive.percentage, 50);
        assert_eq!(outcome.summary.suggestive.percentage, 50);
    }
}
