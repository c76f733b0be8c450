//! In-memory community store.

use super::{encode, CommunityStore, StoredCommunity};
use crate::error::{Result, WizardError};
use crate::record::Community;
use crate::state::WizardState;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Rows kept as raw `(state, data)` strings so loads go through the same
/// decoding as the database.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<i64, (String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw row under `id`, bypassing validation.
    pub async fn put_raw(&self, id: i64, state: &str, data: &str) {
        self.rows
            .write()
            .await
            .insert(id, (state.to_string(), data.to_string()));
    }

    /// Raw `data` column of a row.
    pub async fn raw(&self, id: i64) -> Option<String> {
        self.rows.read().await.get(&id).map(|(_, data)| data.clone())
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CommunityStore for MemoryStore {
    async fn insert(&self, state: WizardState, community: &Community) -> Result<i64> {
        let data = encode(community)?;
        let mut rows = self.rows.write().await;
        let id = rows.keys().next_back().map_or(1, |last| last + 1);
        rows.insert(id, (state.as_str().to_string(), data));
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<StoredCommunity>> {
        let rows = self.rows.read().await;
        rows.get(&id)
            .map(|(state, data)| StoredCommunity::decode(id, state, data))
            .transpose()
    }

    async fn update(&self, id: i64, state: WizardState, community: &Community) -> Result<()> {
        let data = encode(community)?;
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id).ok_or(WizardError::NotFound(id))?;
        *row = (state.as_str().to_string(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fifthworld_geo::Coordinate;

    #[tokio::test]
    async fn test_ids_increase() {
        let store = MemoryStore::new();
        let community = Community::new(Coordinate::new(0.0, 0.0), true);
        let first = store
            .insert(WizardState::AwaitingSpecialties, &community)
            .await
            .unwrap();
        let second = store
            .insert(WizardState::AwaitingSpecialties, &community)
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_raw_rows_are_validated_on_load() {
        let store = MemoryStore::new();
        let truncated = r#"{"territory":{"center":[0,0],"coastal":false}}"#;
        store.put_raw(3, "awaiting_answers", truncated).await;
        assert!(matches!(
            store.load(3).await,
            Err(WizardError::CorruptRecord { id: 3, .. })
        ));
    }
}
