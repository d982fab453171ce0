use thiserror::Error;

use crate::storage::json_array_file::LoadError;

/// The two failure kinds surfaced by submission operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    /// Carries the underlying I/O or parse error text verbatim.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }

    pub fn storage(err: impl std::fmt::Display) -> Self { Self::Storage(err.to_string()) }
}


impl From<LoadError> for ServiceError {
    fn from(e: LoadError) -> Self {
        Self::storage(e)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(e)
    }
}
