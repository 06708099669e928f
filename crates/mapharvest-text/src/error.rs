use mapharvest_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextError>;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("column `{0}` not found")]
    MissingColumn(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
