//! Coastline intersection.
//!
//! A settlement is coastal when a circle of walking radius around it touches
//! any coastline polygon. The coastline is split into a fixed, numbered set of
//! GeoJSON shards (`coastline-0.json` .. `coastline-53.json`), retrieved from a
//! [`ShardSource`].
//!
//! Two probes answer the question:
//! - [`CoastlineIndex`] loads every shard once and keeps an R-tree of feature
//!   bounding boxes, so each check is an envelope lookup plus a few exact tests.
//! - [`ShardScanner`] fetches and scans the shards in order on every check,
//!   stopping at the first intersecting feature.
//!
//! Any shard that cannot be fetched or parsed aborts the load or check.

mod index;
mod scan;
mod source;

pub use index::CoastlineIndex;
pub use scan::ShardScanner;
pub use source::{shard_file_name, DirShardSource, HttpShardSource, ShardSource};

use crate::{Coordinate, GeoError, Result};
use async_trait::async_trait;
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;

/// Number of shards the coastline is published as.
pub const DEFAULT_SHARD_COUNT: u32 = 54;

/// Answers "is this point within walking distance of the coast?".
#[async_trait]
pub trait CoastlineProbe: Send + Sync {
    /// `Ok(true)` on the first intersecting coastline feature, `Ok(false)`
    /// once every feature has been ruled out.
    async fn is_coastal(&self, center: Coordinate) -> Result<bool>;
}

/// Parse one shard into multipolygons.
///
/// Accepts a FeatureCollection, a single Feature, or a bare geometry. Features
/// without a Polygon or MultiPolygon geometry are skipped.
pub fn parse_shard(shard: u32, text: &str) -> Result<Vec<MultiPolygon<f64>>> {
    let geojson: GeoJson = text.parse().map_err(|e: geojson::Error| GeoError::parse(shard, e))?;

    let values: Vec<geojson::Value> = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry.map(|g| g.value))
            .collect(),
        GeoJson::Feature(feature) => feature.geometry.map(|g| g.value).into_iter().collect(),
        GeoJson::Geometry(geometry) => vec![geometry.value],
    };

    let mut polygons = Vec::with_capacity(values.len());
    for value in values {
        let geometry: Geometry<f64> = value
            .try_into()
            .map_err(|e: geojson::Error| GeoError::parse(shard, e))?;
        match geometry {
            Geometry::Polygon(polygon) => polygons.push(MultiPolygon::new(vec![polygon])),
            Geometry::MultiPolygon(multi) => polygons.push(multi),
            other => {
                tracing::debug!(
                    shard,
                    kind = geometry_kind(&other),
                    "Skipping non-polygon coastline feature"
                );
            }
        }
    }

    Ok(polygons)
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
