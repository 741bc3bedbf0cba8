//! Simulation settings value object
//!
//! The per-phase allowance, nightly probability and event table are tuning
//! knobs rather than fixed rules, so they live here instead of as constants.
//! Hosts either deserialize a `SimulationSettings` or read it from the
//! environment with [`SimulationSettings::from_env`].

use serde::{Deserialize, Serialize};

use super::nightly_event::NightlyEventTable;
use crate::aggregates::RehirePolicy;
use crate::error::DomainError;

/// All configurable simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSettings {
    // ============================================================================
    // Turn structure
    // ============================================================================
    /// Actions granted at the start of every phase
    pub actions_per_phase: u32,

    // ============================================================================
    // Nightly events
    // ============================================================================
    /// Chance in `[0, 1]` that a table entry fires on day rollover
    pub nightly_event_probability: f64,
    /// Blood lost to passive decay every new night
    pub nightly_blood_decay: i64,
    #[serde(default)]
    pub event_table: NightlyEventTable,

    // ============================================================================
    // Companions
    // ============================================================================
    /// Whether a companion who left over loyalty may be recruited again
    #[serde(default = "default_allow_rehire")]
    pub allow_rehire_after_departure: bool,
    /// Rehired companions return at their starting loyalty instead of 0
    #[serde(default)]
    pub rehire_at_starting_loyalty: bool,
}

fn default_allow_rehire() -> bool {
    true
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            actions_per_phase: 3,
            nightly_event_probability: 0.3,
            nightly_blood_decay: 1,
            event_table: NightlyEventTable::default(),
            allow_rehire_after_departure: default_allow_rehire(),
            rehire_at_starting_loyalty: false,
        }
    }
}

impl SimulationSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            actions_per_phase: env_or("NIGHTFALL_ACTIONS_PER_PHASE", defaults.actions_per_phase),
            nightly_event_probability: env_or(
                "NIGHTFALL_NIGHTLY_EVENT_PROBABILITY",
                defaults.nightly_event_probability,
            ),
            nightly_blood_decay: env_or("NIGHTFALL_NIGHTLY_BLOOD_DECAY", defaults.nightly_blood_decay),
            allow_rehire_after_departure: env_or(
                "NIGHTFALL_ALLOW_REHIRE",
                defaults.allow_rehire_after_departure,
            ),
            rehire_at_starting_loyalty: env_or(
                "NIGHTFALL_REHIRE_AT_STARTING_LOYALTY",
                defaults.rehire_at_starting_loyalty,
            ),
            // The event table is content, not an env knob
            event_table: defaults.event_table,
        }
    }

    pub fn with_actions_per_phase(mut self, actions: u32) -> Self {
        self.actions_per_phase = actions;
        self
    }

    pub fn with_nightly_event_probability(mut self, probability: f64) -> Self {
        self.nightly_event_probability = probability;
        self
    }

    pub fn with_event_table(mut self, table: NightlyEventTable) -> Self {
        self.event_table = table;
        self
    }

    pub fn with_allow_rehire(mut self, allow: bool) -> Self {
        self.allow_rehire_after_departure = allow;
        self
    }

    pub fn with_rehire_at_starting_loyalty(mut self, restore: bool) -> Self {
        self.rehire_at_starting_loyalty = restore;
        self
    }

    pub fn rehire_policy(&self) -> RehirePolicy {
        match (self.allow_rehire_after_departure, self.rehire_at_starting_loyalty) {
            (false, _) => RehirePolicy::Refuse,
            (true, false) => RehirePolicy::AsTheyLeft,
            (true, true) => RehirePolicy::StartingLoyalty,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.nightly_event_probability) {
            return Err(DomainError::validation(format!(
                "nightlyEventProbability must be within [0, 1], got {}",
                self.nightly_event_probability
            )));
        }
        if self.nightly_blood_decay < 0 {
            return Err(DomainError::validation(format!(
                "nightlyBloodDecay cannot be negative, got {}",
                self.nightly_blood_decay
            )));
        }
        if self.nightly_event_probability > 0.0 && self.event_table.is_empty() {
            return Err(DomainError::validation(
                "eventTable cannot be empty while nightly events are enabled",
            ));
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
