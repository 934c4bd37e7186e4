//! Draft collection persistence.

use std::sync::Arc;

use tracing::info;

use samvaad_core::Draft;

use crate::{KvStore, StoreError, decode};

const DRAFTS_KEY: &str = "drafts";

/// Store for the draft collection — the source of truth for which drafts
/// exist.
pub struct DraftStore {
    store: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Create a draft with the next free id and persist the collection.
    pub fn create(
        &self,
        title: &str,
        date: &str,
        description: &str,
    ) -> Result<Draft, StoreError> {
        let mut drafts = self.list()?;
        let id = drafts.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let draft = Draft {
            id,
            title: title.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        };
        drafts.push(draft.clone());
        self.store.set(DRAFTS_KEY, &serde_json::to_string(&drafts)?)?;
        info!(id, title, "created draft");
        Ok(draft)
    }

    /// All drafts, in creation order.
    pub fn list(&self) -> Result<Vec<Draft>, StoreError> {
        let Some(raw) = self.store.get(DRAFTS_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(decode(DRAFTS_KEY, &raw).unwrap_or_default())
    }

    pub fn get(&self, id: i64) -> Result<Option<Draft>, StoreError> {
        Ok(self.list()?.into_iter().find(|d| d.id == id))
    }

    /// Case-insensitive substring search over titles and descriptions.
    pub fn search(&self, term: &str) -> Result<Vec<Draft>, StoreError> {
        let needle = term.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.description.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
