//! Community persistence.
//!
//! One row per community: an integer id, the wizard state tag, and the
//! record as a JSON document. Rows are decoded into typed records on every
//! load and checked against their state tag.
//!
//! ## Stores
//!
//! - [`SqliteStore`] - the `communities` table in a SQLite file
//! - [`MemoryStore`] - the same rows in a map, for tests and demos

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{Result, WizardError};
use crate::record::Community;
use crate::state::WizardState;
use async_trait::async_trait;

/// Where community rows live.
///
/// Writes are whole-record replacements; concurrent updates to one id race
/// and the last one wins.
#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Insert a new row and return its id.
    async fn insert(&self, state: WizardState, community: &Community) -> Result<i64>;

    /// Load and decode a row, `None` if the id is unknown.
    async fn load(&self, id: i64) -> Result<Option<StoredCommunity>>;

    /// Replace an existing row. Unknown ids are [`WizardError::NotFound`].
    async fn update(&self, id: i64, state: WizardState, community: &Community) -> Result<()>;
}

/// A decoded row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCommunity {
    pub id: i64,
    pub state: WizardState,
    pub community: Community,
}

impl StoredCommunity {
    /// Decode the raw `state` and `data` columns of row `id`.
    ///
    /// The JSON must parse into a [`Community`], the record must be
    /// internally consistent, and its shape must agree with the tag.
    pub fn decode(id: i64, tag: &str, data: &str) -> Result<Self> {
        let corrupt = |reason: String| WizardError::CorruptRecord { id, reason };

        let state: WizardState = tag.parse().map_err(corrupt)?;
        let community: Community =
            serde_json::from_str(data).map_err(|e| corrupt(format!("invalid record JSON: {e}")))?;
        let shape = WizardState::of(&community).map_err(corrupt)?;

        if shape != state {
            return Err(corrupt(format!("stored state {state} but record looks {shape}")));
        }

        Ok(Self { id, state, community })
    }
}

/// Serialize a record for storage.
pub(crate) fn encode(community: &Community) -> Result<String> {
    Ok(serde_json::to_string(community)?)
}
