//! Per-phase action budget.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Remaining actions for the current phase, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBudget {
    remaining: u32,
    max: u32,
}

impl ActionBudget {
    /// A full budget of `max` actions.
    pub fn new(max: u32) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    /// Reconstruct from storage; `remaining` above `max` is malformed.
    pub fn from_storage(remaining: u32, max: u32) -> Result<Self, DomainError> {
        if remaining > max {
            return Err(DomainError::malformed_save(format!(
                "actions remaining {} exceeds per-phase allowance {}",
                remaining, max
            )));
        }
        Ok(Self { remaining, max })
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Spend one action. Fails with `NoActionsRemaining` and changes nothing when empty.
    pub fn try_consume(&mut self) -> Result<u32, DomainError> {
        if self.remaining == 0 {
            return Err(DomainError::NoActionsRemaining);
        }
        self.remaining -= 1;
        Ok(self.remaining)
    }

    /// Fail without spending when the budget is empty.
    pub fn ensure_available(&self) -> Result<(), DomainError> {
        if self.remaining == 0 {
            return Err(DomainError::NoActionsRemaining);
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }
}
