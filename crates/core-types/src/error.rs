use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
