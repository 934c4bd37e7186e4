//! HTTP client for the analysis service's upload, keyword, and review
//! endpoints.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use samvaad_core::document::{ClassifiedDocument, Document, KeywordStat, ReviewDetails};
use samvaad_core::review::Sentiment;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Batch classification seam.
///
/// One call covers one upload action; the service answers with one verdict
/// per submitted document, echoing each filename.
#[async_trait]
pub trait Classify: Send + Sync {
    async fn classify(
        &self,
        documents: &[Document],
    ) -> Result<Vec<ClassifiedDocument>, ClientError>;
}

/// Keyword-frequency seam.
#[async_trait]
pub trait Keywords: Send + Sync {
    async fn keywords(
        &self,
        filenames: &[String],
        sentiment: Sentiment,
    ) -> Result<HashMap<String, KeywordStat>, ClientError>;
}

/// HTTP client for the external analysis service.
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct KeywordRequest<'a> {
    filenames: &'a [String],
    sentiment: Sentiment,
}

impl AnalysisClient {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:5001` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the per-comment breakdown for one stored document.
    pub async fn review_details(&self, filename: &str) -> Result<ReviewDetails, ClientError> {
        let url = format!("{}/api/review/{filename}", self.base_url);

        info!(url = %url, "fetching review details");
        let resp = self.client.get(&url).send().await?;
        let details = Self::check(resp).await?.json().await?;
        Ok(details)
    }

    /// Turn a non-success response into [`ClientError::Server`].
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Server {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Classify for AnalysisClient {
    /// Submit one upload action's documents as a single multipart exchange.
    async fn classify(
        &self,
        documents: &[Document],
    ) -> Result<Vec<ClassifiedDocument>, ClientError> {
        let url = format!("{}/api/upload", self.base_url);

        let mut form = reqwest::multipart::Form::new();
        for doc in documents {
            let part = reqwest::multipart::Part::bytes(doc.bytes.clone())
                .file_name(doc.filename.clone())
                .mime_str("application/pdf")?;
            form = form.part("files[]", part);
        }

        info!(url = %url, count = documents.len(), "submitting documents for classification");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let results: Vec<ClassifiedDocument> = Self::check(resp).await?.json().await?;
        info!(count = results.len(), "classification complete");
        Ok(results)
    }
}

#[async_trait]
impl Keywords for AnalysisClient {
    async fn keywords(
        &self,
        filenames: &[String],
        sentiment: Sentiment,
    ) -> Result<HashMap<String, KeywordStat>, ClientError> {
        let url = format!("{}/api/keywords", self.base_url);
        let request = KeywordRequest {
            filenames,
            sentiment,
        };

        info!(url = %url, count = filenames.len(), sentiment = %sentiment, "fetching keyword frequencies");
        let resp = self.client.post(&url).json(&request).send().await?;
        let frequencies = Self::check(resp).await?.json().await?;
        Ok(frequencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AnalysisClient::new("http://localhost:5001/".into());
        assert_eq!(client.base_url, "http://localhost:5001");
    }

    #[test]
    fn classifier_response_array_parses() {
        let json = r#"[
            {"filename": "round_one.pdf", "category": "positive", "score": 88},
            {"filename": "round_two.pdf", "category": "suggestive", "score": 41}
        ]"#;
        let parsed: Vec<ClassifiedDocument> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].category, Sentiment::Positive);
        assert_eq!(parsed[1].filename, "round_two.pdf");
    }

    #[test]
    fn keyword_request_serializes_expected_shape() {
        let filenames = vec!["a.pdf".to_string(), "b.pdf".to_string()];
        let request = KeywordRequest {
            filenames: &filenames,
            sentiment: Sentiment::Negative,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sentiment"], "negative");
        assert_eq!(value["filenames"][1], "b.pdf");
    }

    #[test]
    fn keyword_response_map_parses() {
        let json = r#"{"pollution": {"count": 12}, "compliance": {"count": 4}}"#;
        let parsed: HashMap<String, KeywordStat> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["pollution"].count, 12);
        assert_eq!(parsed["compliance"].count, 4);
    }
}
