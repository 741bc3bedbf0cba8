//! Session-level error type.

use nightfall_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors surfaced by `GameSession`.
///
/// Every variant is recoverable: a command that returns one has changed
/// nothing in the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Save store error: {0}")]
    Repo(#[from] RepoError),
}

impl SessionError {
    /// The domain error, when this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            SessionError::Domain(e) => Some(e),
            SessionError::Repo(_) => None,
        }
    }

    pub fn is_malformed_save(&self) -> bool {
        matches!(
            self,
            SessionError::Domain(DomainError::MalformedSavePayload(_))
        )
    }
}
