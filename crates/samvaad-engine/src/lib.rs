//! Orchestration layer: batch upload coordination and keyword queries.

mod keywords;
mod upload;

pub use keywords::{KeywordError, KeywordQuery};
pub use upload::{BatchOutcome, UploadCoordinator, UploadError};
