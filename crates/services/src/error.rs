//! Service-level error type and the repo-error mapping policy.

use domains::error::{RepoError, ValidationErrors};
use thiserror::Error;

/// The primary error type for all service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Lookup miss, including the deliberate "owned by someone else looks
    /// like not-found" policy. Carries only the entity kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Field-level failures, surfaced back to the submitting form.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Infrastructure failure. Fatal for the request; no retry logic exists.
    #[error("internal service error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A storage-layer uniqueness race becomes a validation failure, never a
/// crash: the constraint is the last line of defense behind the
/// application-level checks.
impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation { field } => {
                ServiceError::Validation(ValidationErrors::single(field, "has already been taken"))
            }
            RepoError::Internal(e) => ServiceError::Internal(e),
        }
    }
}
