//! Domain Events
//!
//! Coarse-grained events representing significant state changes in a run.
//! Hosts receive them through registered subscribers and a pollable outbox.
//!
//! ## Mutation Outcomes
//!
//! The `companion_events` submodule contains return types from roster
//! mutations, communicating what happened when state was modified.

pub mod companion_events;

pub use companion_events::*;

use serde::{Deserialize, Serialize};

use crate::game_time::Phase;
use crate::ids::CompanionId;
use crate::value_objects::StatKind;

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DomainEvent {
    // Time
    PhaseAdvanced {
        day: u32,
        phase: Phase,
    },
    NightBegan {
        day: u32,
        blood_remaining: i64,
    },
    NightlyEventFired {
        day: u32,
        stat: StatKind,
        delta: i64,
        value: i64,
        message: String,
    },

    // Player actions
    PlayerActionResolved {
        action: String,
        summary: String,
        actions_remaining: u32,
    },

    // Coterie
    CompanionRecruited {
        companion_id: CompanionId,
        companion_name: String,
    },
    CompanionReleased {
        companion_name: String,
    },
    /// Emitted exactly once per auto-expulsion
    CompanionDeparted {
        companion_name: String,
        reason: DepartureReason,
    },

    // Persistence
    RunSaved {
        day: u32,
        phase: Phase,
    },
    RunLoaded {
        day: u32,
        phase: Phase,
    },
}

impl DomainEvent {
    /// Get the event type name for logging/debugging
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::PhaseAdvanced { .. } => "PhaseAdvanced",
            DomainEvent::NightBegan { .. } => "NightBegan",
            DomainEvent::NightlyEventFired { .. } => "NightlyEventFired",
            DomainEvent::PlayerActionResolved { .. } => "PlayerActionResolved",
            DomainEvent::CompanionRecruited { .. } => "CompanionRecruited",
            DomainEvent::CompanionReleased { .. } => "CompanionReleased",
            DomainEvent::CompanionDeparted { .. } => "CompanionDeparted",
            DomainEvent::RunSaved { .. } => "RunSaved",
            DomainEvent::RunLoaded { .. } => "RunLoaded",
        }
    }

    pub fn departure(companion_name: impl Into<String>) -> Self {
        DomainEvent::CompanionDeparted {
            companion_name: companion_name.into(),
            reason: DepartureReason::Loyalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_event_serializes_reason_as_loyalty() {
        let event = DomainEvent::departure("Crimson");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "companionDeparted");
        assert_eq!(json["companion_name"], "Crimson");
        assert_eq!(json["reason"], "loyalty");
        assert_eq!(event.event_type(), "CompanionDeparted");
    }
}
