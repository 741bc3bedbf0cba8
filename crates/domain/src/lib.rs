//! Nightfall domain: phase clock, player stats, coterie loyalty and factions.
//!
//! Pure types and invariants. No randomness, I/O or logging lives here; the
//! engine injects those through ports.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod game_time;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    default_companions, Chronicle, Companion, CompanionPool, CompanionRoster, NewRun, RehirePolicy,
};
pub use error::DomainError;
pub use events::{
    CoterieReaction, DepartureReason, DomainEvent, LoyaltyAdjustment, LoyaltyOutcome,
    LoyaltyReaction, RecruitOutcome,
};
pub use game_time::{Phase, PhaseAdvance, PhaseClock};
pub use ids::{CompanionId, RunId};
pub use value_objects::{
    ActionBudget, BoundedStat, Clan, Faction, FactionContext, Loyalty, LoyaltyShift,
    LoyaltyStatus, NightlyEvent, NightlyEventTable, ResourcePool, SimulationSettings, StatKind,
    UnboundedStat,
};
