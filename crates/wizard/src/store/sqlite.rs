//! SQLite-backed community store.

use super::{encode, CommunityStore, StoredCommunity};
use crate::error::{Result, WizardError};
use crate::record::Community;
use crate::state::WizardState;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS communities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    state TEXT NOT NULL,
    data TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s','now')),
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);
";

/// Communities in one SQLite connection, shared behind an async mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database file and its schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening community database");

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::with_connection(conn)
    }

    /// A private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory community database");
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored communities.
    pub async fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        Ok(conn.query_row("SELECT COUNT(*) FROM communities", [], |row| row.get(0))?)
    }
}

#[async_trait]
impl CommunityStore for SqliteStore {
    async fn insert(&self, state: WizardState, community: &Community) -> Result<i64> {
        let data = encode(community)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO communities (state, data) VALUES (?1, ?2)",
            params![state.as_str(), data],
        )?;
        let id = conn.last_insert_rowid();
        debug!(community_id = id, %state, "Inserted community");
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<StoredCommunity>> {
        let row: Option<(String, String)> = {
            let conn = self.conn.lock().await;
            conn.query_row(
                "SELECT state, data FROM communities WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?
        };

        row.map(|(state, data)| StoredCommunity::decode(id, &state, &data))
            .transpose()
    }

    async fn update(&self, id: i64, state: WizardState, community: &Community) -> Result<()> {
        let data = encode(community)?;
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE communities SET state = ?1, data = ?2, updated_at = strftime('%s','now') WHERE id = ?3",
            params![state.as_str(), data, id],
        )?;
        if changed == 0 {
            return Err(WizardError::NotFound(id));
        }
        debug!(community_id = id, %state, "Updated community");
        Ok(())
    }
}
