//! Value objects - Immutable objects defined by their attributes

mod action_budget;
mod faction;
mod loyalty;
mod nightly_event;
mod settings;
mod stat;
mod stat_block;

pub use action_budget::ActionBudget;
pub use faction::{Clan, Faction, FactionContext};
pub use loyalty::{
    Loyalty, LoyaltyShift, LoyaltyStatus, DISLIKE_PENALTY, LIKE_BONUS, LOYALTY_MAX, LOYALTY_MIN,
};
pub use nightly_event::{NightlyEvent, NightlyEventTable};
pub use settings::SimulationSettings;
pub use stat::StatKind;
pub use stat_block::{BoundedStat, ResourcePool, UnboundedStat};
