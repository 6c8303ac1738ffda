use core_types::{AssetId, CoreError};
use record_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The asset has no data source at all.
    #[error("No data exists for {0}")]
    NotFound(AssetId),

    #[error("Error reading data for {asset}")]
    Internal {
        asset: AssetId,
        #[source]
        source: StoreError,
    },

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl ServiceError {
    /// Classifies a store failure for `asset`.
    pub fn from_store(asset: AssetId, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ServiceError::NotFound(asset),
            other => ServiceError::Internal {
                asset,
                source: other,
            },
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        ServiceError::InvalidWindow(err.to_string())
    }
}
