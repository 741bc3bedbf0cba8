//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome types from mutations
//!
//! `Chronicle` is the single root a session mutates; `CompanionRoster` and
//! `Companion` live inside it. `CompanionPool` is read-only content.

pub mod chronicle;
pub mod companion;
pub mod companion_pool;
pub mod companion_roster;

pub use chronicle::{Chronicle, NewRun};
pub use companion::Companion;
pub use companion_pool::{default_companions, CompanionPool};
pub use companion_roster::{CompanionRoster, RehirePolicy};
