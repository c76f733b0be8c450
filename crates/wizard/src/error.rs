//! Error types for the wizard crate.

use fifthworld_geo::GeoError;
use thiserror::Error;

/// Result type alias for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;

/// Infrastructure failures while running the wizard.
///
/// Input the member can correct is not an error; it comes back as a
/// [`Rejection`](crate::Rejection) inside the outcome.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Database failure
    #[error("Storage error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Coastline data could not be consulted
    #[error("Coastline check failed: {0}")]
    Coastline(#[from] GeoError),

    /// A stored row does not parse or does not match its state tag
    #[error("Community {id} is malformed: {reason}")]
    CorruptRecord {
        /// Row id
        id: i64,
        /// What was wrong with it
        reason: String,
    },

    /// No community with this id
    #[error("Community {0} not found")]
    NotFound(i64),

    /// A record could not be serialized for storage
    #[error("Failed to encode community: {0}")]
    Encode(#[from] serde_json::Error),

    /// An event produced a record the wizard cannot store
    #[error("Wizard produced an inconsistent record: {0}")]
    Inconsistent(String),
}

impl From<WizardError> for fifthworld_core::Error {
    fn from(err: WizardError) -> Self {
        match &err {
            WizardError::Store(_) | WizardError::Encode(_) => {
                fifthworld_core::Error::storage(err.to_string()).with_source(err)
            }
            WizardError::Coastline(geo) => fifthworld_core::Error::coastline(err.to_string())
                .with_context(format!("Geo error {}", geo.code()))
                .with_source(err),
            WizardError::CorruptRecord { id, reason } => {
                fifthworld_core::Error::corrupt_record(*id, reason.clone())
            }
            WizardError::NotFound(_) => fifthworld_core::Error::not_found(err.to_string()),
            WizardError::Inconsistent(_) => {
                fifthworld_core::Error::internal(err.to_string()).with_source(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fifthworld_core::ErrorCode;

    #[test]
    fn test_core_error_codes() {
        let not_found: fifthworld_core::Error = WizardError::NotFound(5).into();
        assert_eq!(not_found.code, ErrorCode::NotFound);

        let corrupt: fifthworld_core::Error = WizardError::CorruptRecord {
            id: 7,
            reason: "bad state tag".into(),
        }
        .into();
        assert_eq!(corrupt.code, ErrorCode::CorruptRecord);
        assert!(corrupt.message.contains("bad state tag"));

        let coastline: fifthworld_core::Error = WizardError::Coastline(GeoError::ShardFetch {
            shard: 3,
            message: "timed out".into(),
        })
        .into();
        assert_eq!(coastline.code, ErrorCode::CoastlineUnavailable);
        assert_eq!(coastline.context.as_deref(), Some("Geo error G10003"));
    }
}
