use core_types::AssetId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The data directory {} is not accessible: {source}", .dir.display())]
    DataDirUnavailable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No data source exists for {asset} (expected {})", .path.display())]
    NotFound { asset: AssetId, path: PathBuf },

    #[error("Failed to read price data for {asset}: {source}")]
    Read {
        asset: AssetId,
        #[source]
        source: std::io::Error,
    },
}
