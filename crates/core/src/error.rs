use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// `Validation` failures are recovered locally and shown inline;
/// `Upload` failures abort the submission and leave state untouched so
/// the user can resubmit.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
