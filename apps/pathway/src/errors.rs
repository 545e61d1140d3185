use thiserror::Error;

/// Application-level error type.
/// Every fallible library operation returns `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, suitable for a presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidProfile(_) => "INVALID_PROFILE",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "INTERNAL_ERROR"
            }
        }
    }
}
