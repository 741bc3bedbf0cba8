//! Unified error types for the domain layer
//!
//! Every command on the simulation core either fully succeeds or returns one of
//! these variants without having mutated anything. None of them are fatal.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The per-phase action budget is exhausted
    #[error("No actions remaining this phase")]
    NoActionsRemaining,

    /// A stat name outside the recognized set
    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    /// Attempted to recruit a companion lacking the recruitable flag
    #[error("Companion is not recruitable: {0}")]
    NotRecruitable(String),

    /// Companion is not currently an active roster member
    #[error("Companion not in roster: {0}")]
    NotInRoster(String),

    /// Save payload failed load-time validation
    #[error("Malformed save payload: {0}")]
    MalformedSavePayload(String),

    /// A player command's own precondition (beyond the action budget) was not met
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Blue-blooded characters must choose a feeding ground explicitly
    #[error("Feeding restricted: {0}")]
    FeedingRestricted(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Validation failed (content pools, settings)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn unknown_stat(name: impl Into<String>) -> Self {
        Self::UnknownStat(name.into())
    }

    pub fn not_recruitable(name: impl Into<String>) -> Self {
        Self::NotRecruitable(name.into())
    }

    pub fn not_in_roster(name: impl Into<String>) -> Self {
        Self::NotInRoster(name.into())
    }

    /// Create a malformed save payload error
    pub fn malformed_save(msg: impl Into<String>) -> Self {
        Self::MalformedSavePayload(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionFailed(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error for content or configuration that breaks an invariant.
    ///
    /// # Example
    /// ```ignore
    /// if !(0.0..=1.0).contains(&probability) {
    ///     return Err(DomainError::validation("probability must be within [0, 1]"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether the host should treat this as "the player tried something not allowed right now"
    /// rather than a programming error.
    pub fn is_player_facing(&self) -> bool {
        matches!(
            self,
            Self::NoActionsRemaining | Self::PreconditionFailed(_) | Self::FeedingRestricted(_)
        )
    }
}
