//! In-memory coastline probe backed by an R-tree.

use super::{parse_shard, CoastlineProbe, ShardSource};
use crate::circle::{circle, world_copies, CircleOptions};
use crate::{Coordinate, Result};
use async_trait::async_trait;
use geo::{BoundingRect, Intersects, MultiPolygon, Polygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use std::time::Instant;
use tracing::info;

type Entry = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Coastline features held in memory behind an R-tree of bounding boxes.
pub struct CoastlineIndex {
    tree: RTree<Entry>,
    features: Vec<MultiPolygon<f64>>,
    circle: CircleOptions,
}

impl CoastlineIndex {
    /// Fetch every shard in order and build the index.
    ///
    /// Shards are fetched sequentially; parsing runs in parallel when the
    /// `parallel` feature is on. The first failing shard aborts the load.
    pub async fn load(source: &dyn ShardSource, circle: CircleOptions) -> Result<Self> {
        let started = Instant::now();
        let mut texts = Vec::with_capacity(source.shard_count() as usize);
        for shard in 0..source.shard_count() {
            texts.push((shard, source.fetch(shard).await?));
        }

        let shards = parse_all(&texts)?;
        let features: Vec<MultiPolygon<f64>> = shards.into_iter().flatten().collect();
        let index = Self::from_features(features, circle);

        info!(
            source = %source.describe(),
            shards = source.shard_count(),
            features = index.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Coastline index built"
        );
        Ok(index)
    }

    /// Build an index from already-parsed features.
    pub fn from_features(features: Vec<MultiPolygon<f64>>, circle: CircleOptions) -> Self {
        let entries: Vec<Entry> = features
            .iter()
            .enumerate()
            .filter_map(|(i, feature)| {
                let rect = feature.bounding_rect()?;
                let corners = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                Some(GeomWithData::new(corners, i))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            features,
            circle,
        }
    }

    /// Number of indexed features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when no coastline features were loaded.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Does `polygon` touch any coastline feature?
    ///
    /// A polygon running past ±180° is also tested shifted onto the other
    /// side of the antimeridian.
    pub fn intersects(&self, polygon: &Polygon<f64>) -> bool {
        world_copies(polygon)
            .iter()
            .any(|copy| self.intersects_planar(copy))
    }

    fn intersects_planar(&self, polygon: &Polygon<f64>) -> bool {
        let Some(rect) = polygon.bounding_rect() else {
            return false;
        };
        let envelope =
            AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .any(|entry| self.features[entry.data].intersects(polygon))
    }
}

#[async_trait]
impl CoastlineProbe for CoastlineIndex {
    async fn is_coastal(&self, center: Coordinate) -> Result<bool> {
        let walk = circle(center, &self.circle)?;
        Ok(self.intersects(&walk))
    }
}

#[cfg(feature = "parallel")]
fn parse_all(texts: &[(u32, String)]) -> Result<Vec<Vec<MultiPolygon<f64>>>> {
    use rayon::prelude::*;
    texts
        .par_iter()
        .map(|(shard, text)| parse_shard(*shard, text))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn parse_all(texts: &[(u32, String)]) -> Result<Vec<Vec<MultiPolygon<f64>>>> {
    texts
        .iter()
        .map(|(shard, text)| parse_shard(*shard, text))
        .collect()
}
