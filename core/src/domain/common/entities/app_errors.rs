use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    /// The inventory store could not be read or written (network error,
    /// non-2xx status, timeout). Never retried by the core.
    #[error("Inventory store unavailable: {0}")]
    StoreUnavailable(String),

    /// A conditional write was rejected because the document changed since it was read.
    #[error("Inventory document was modified concurrently")]
    VersionConflict,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("No inventory available")]
    EmptyInventory,

    #[error("Internal server error")]
    InternalServerError,
}
