//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// Invalid user coordinates are not errors: the normalizer returns `None`.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values handed to a geometry routine
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Circle parameters that cannot produce a polygon
    #[error("Invalid circle: {0}")]
    InvalidCircle(String),

    /// A coastline shard could not be retrieved
    #[error("Failed to fetch coastline shard {shard}: {message}")]
    ShardFetch {
        /// Shard number
        shard: u32,
        /// Underlying failure
        message: String,
    },

    /// A coastline shard was retrieved but is not usable GeoJSON
    #[error("Failed to parse coastline shard {shard}: {message}")]
    ShardParse {
        /// Shard number
        shard: u32,
        /// Underlying failure
        message: String,
    },
}

/// Numeric code reported alongside core errors. Range: 10xxx.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid circle parameters
    InvalidCircle = 10002,
    /// Shard retrieval failed
    ShardFetch = 10003,
    /// Shard content unusable
    ShardParse = 10004,
}

impl std::fmt::Display for GeoErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "G{}", *self as u32)
    }
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidCircle(_) => GeoErrorCode::InvalidCircle,
            GeoError::ShardFetch { .. } => GeoErrorCode::ShardFetch,
            GeoError::ShardParse { .. } => GeoErrorCode::ShardParse,
        }
    }

    pub(crate) fn fetch(shard: u32, message: impl ToString) -> Self {
        GeoError::ShardFetch {
            shard,
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(shard: u32, message: impl ToString) -> Self {
        GeoError::ShardParse {
            shard,
            message: message.to_string(),
        }
    }
}
