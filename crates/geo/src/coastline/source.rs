//! Where coastline shards come from.

use crate::{GeoError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// File name of shard `n` in every source.
pub fn shard_file_name(shard: u32) -> String {
    format!("coastline-{shard}.json")
}

/// A numbered set of coastline shards.
#[async_trait]
pub trait ShardSource: Send + Sync {
    /// How many shards exist; they are numbered `0..shard_count()`.
    fn shard_count(&self) -> u32;

    /// Raw GeoJSON text of one shard.
    async fn fetch(&self, shard: u32) -> Result<String>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Shards published under an HTTP(S) base URL, e.g. an object-store bucket.
pub struct HttpShardSource {
    client: reqwest::Client,
    base_url: String,
    shard_count: u32,
}

impl HttpShardSource {
    /// Create a source for `{base_url}/coastline-{n}.json`.
    pub fn new(base_url: impl Into<String>, shard_count: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("fifthworld-geo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeoError::fetch(0, e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            shard_count,
        })
    }

    fn url(&self, shard: u32) -> String {
        format!("{}/{}", self.base_url, shard_file_name(shard))
    }
}

#[async_trait]
impl ShardSource for HttpShardSource {
    fn shard_count(&self) -> u32 {
        self.shard_count
    }

    async fn fetch(&self, shard: u32) -> Result<String> {
        let url = self.url(shard);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeoError::fetch(shard, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::fetch(shard, format!("GET {url} returned {status}")));
        }

        response.text().await.map_err(|e| GeoError::fetch(shard, e))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Shards stored as files in a local directory.
pub struct DirShardSource {
    dir: PathBuf,
    shard_count: u32,
}

impl DirShardSource {
    /// Create a source for `{dir}/coastline-{n}.json`.
    pub fn new(dir: impl Into<PathBuf>, shard_count: u32) -> Self {
        Self {
            dir: dir.into(),
            shard_count,
        }
    }
}

#[async_trait]
impl ShardSource for DirShardSource {
    fn shard_count(&self) -> u32 {
        self.shard_count
    }

    async fn fetch(&self, shard: u32) -> Result<String> {
        let path = self.dir.join(shard_file_name(shard));
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| GeoError::fetch(shard, format!("{}: {e}", path.display())))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
