//! Companion-related mutation outcomes
//!
//! Return types from roster and companion mutations, telling the caller
//! what actually happened.

use serde::{Deserialize, Serialize};

use crate::value_objects::LoyaltyStatus;

/// Outcome of a single loyalty mutation on a companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoyaltyOutcome {
    /// Companion is not recruitable; nothing changed
    Untracked,
    /// Loyalty moved (possibly by zero after clamping)
    Adjusted { from: i32, to: i32 },
    /// Loyalty dropped from a positive value to the floor
    Exhausted { from: i32 },
}

impl LoyaltyOutcome {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LoyaltyOutcome::Exhausted { .. })
    }
}

/// Outcome of recruiting a companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitOutcome {
    Recruited,
    /// Already in the coterie; nothing changed
    AlreadyActive,
}

/// One companion's reaction to a declared action.
///
/// `delta` is the raw keyword sum before clamping; `loyalty` is the value
/// after the clamped mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyReaction {
    pub companion_name: String,
    pub delta: i32,
    pub loyalty: i32,
    pub status: LoyaltyStatus,
}

/// Result of running a declared action past the whole coterie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoterieReaction {
    /// Reactions for every companion whose net delta was nonzero
    pub reactions: Vec<LoyaltyReaction>,
    /// Companions expelled by the floor edge during this reaction
    pub departed: Vec<String>,
    /// Companions removed by the follow-up sweep
    pub swept: Vec<String>,
}

/// Result of a manual loyalty adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyAdjustment {
    pub companion_name: String,
    pub loyalty: i32,
    pub status: LoyaltyStatus,
    /// True when this adjustment expelled the companion
    pub departed: bool,
}

/// Why a companion left the coterie on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureReason {
    Loyalty,
}

impl DepartureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartureReason::Loyalty => "loyalty",
        }
    }
}
