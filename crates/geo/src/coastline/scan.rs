//! Coastline probe that scans every shard per check.

use super::{parse_shard, CoastlineProbe, ShardSource};
use crate::circle::{circle, world_copies, CircleOptions};
use crate::{Coordinate, Result};
use async_trait::async_trait;
use geo::Intersects;
use std::sync::Arc;
use tracing::debug;

/// Unindexed probe: fetches and tests every shard on each call.
///
/// Worst case is every feature of every shard; it keeps no state between
/// calls, so it always reflects the current contents of the source.
pub struct ShardScanner {
    source: Arc<dyn ShardSource>,
    circle: CircleOptions,
}

impl ShardScanner {
    pub fn new(source: Arc<dyn ShardSource>, circle: CircleOptions) -> Self {
        Self { source, circle }
    }
}

#[async_trait]
impl CoastlineProbe for ShardScanner {
    async fn is_coastal(&self, center: Coordinate) -> Result<bool> {
        let walk = world_copies(&circle(center, &self.circle)?);

        for shard in 0..self.source.shard_count() {
            let text = self.source.fetch(shard).await?;
            let features = parse_shard(shard, &text)?;
            let hit = features
                .iter()
                .any(|feature| walk.iter().any(|copy| feature.intersects(copy)));
            if hit {
                debug!(shard, "Coastline intersection found");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
