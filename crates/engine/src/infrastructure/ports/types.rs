//! Wire types that cross the persistence boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nightfall_domain::{Clan, Companion, CompanionId, FactionContext};

/// Bumped whenever the payload layout changes incompatibly.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Everything needed to restore a run, kept deliberately flat.
///
/// Values are stored raw and only checked when the payload is restored, so a
/// hand-edited file fails with a precise message instead of a serde error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub version: u32,
    pub run_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub character_name: String,
    pub clan: Clan,
    pub day: u32,
    pub phase_index: usize,
    pub actions_remaining: u32,
    pub actions_per_phase: u32,
    pub stats: SavedStats,
    pub companions: Vec<Companion>,
    /// Released or departed companions with the loyalty they left with
    #[serde(default)]
    pub former_companions: Vec<Companion>,
    #[serde(default)]
    pub departed: Vec<CompanionId>,
    pub faction_context: FactionContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStats {
    pub blood_pool: SavedStat,
    pub humanity: SavedStat,
    pub influence: SavedStat,
    pub resources: i64,
    pub contacts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStat {
    pub current: i32,
    pub max: i32,
}
