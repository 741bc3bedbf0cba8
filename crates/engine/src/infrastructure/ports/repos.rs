//! Persistence port.

use super::error::RepoError;
use super::types::SavePayload;

/// Single-slot save store for one run.
///
/// Every call completes or fails as a whole; a failed `save` leaves the
/// previous payload in place.
#[cfg_attr(test, mockall::automock)]
pub trait SaveStore: Send + Sync {
    fn save(&self, payload: &SavePayload) -> Result<(), RepoError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SavePayload>, RepoError>;

    fn clear(&self) -> Result<(), RepoError>;
}
