use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Failures crossing the database/storage seams. Handlers collapse these to
/// a flat error string for the client; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("profile {0} not found")]
    ProfileNotFound(Uuid),
}

impl ServiceError {
    /// Whether this should surface as a client error (400) rather than a
    /// generic backend failure (500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::ProfileNotFound(_)
                | ServiceError::Storage(StorageError::InvalidTarget(_))
        )
    }
}
