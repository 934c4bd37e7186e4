//! Storage layer: the opaque key-value medium and the stores built on it.

mod drafts;
mod error;
mod kv;
mod ledger;

pub use drafts::DraftStore;
pub use error::StoreError;
pub use kv::{FileStore, KvStore, MemoryStore};
pub use ledger::ReviewLedger;

use serde::de::DeserializeOwned;
use tracing::warn;

/// Decode a persisted JSON value, treating malformed data as absent.
///
/// A value that fails to parse must not take down the reader; it is logged
/// and the caller falls back to the type's empty state.
pub(crate) fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "malformed persisted value, treating as absent");
            None
        }
    }
}
