use crate::model::MovieId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Invalid {field}: {value:?}")]
    Validation { field: &'static str, value: String },

    #[error("Invalid movie: {}", .0.join("; "))]
    InvalidDraft(Vec<String>),

    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
