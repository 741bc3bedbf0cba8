//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Save storage (could swap JSON file -> browser storage)
//! - Event delivery to the host
//! - Clock/Random (for testing and seeded runs)

mod error;
mod events;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use events::EventSubscriber;
pub use repos::SaveStore;
pub use testing::{ClockPort, RandomPort};
pub use types::{SavePayload, SavedStat, SavedStats, SAVE_FORMAT_VERSION};

#[cfg(test)]
pub use repos::MockSaveStore;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
