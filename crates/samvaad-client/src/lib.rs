//! HTTP clients for the external analysis services.

mod http;

pub use http::{AnalysisClient, Classify, ClientError, Keywords};
