//! Use cases - simulation commands orchestrated over the chronicle.
//!
//! Each module owns one area of play. Use cases hold their ports and take
//! the chronicle, settings and event bus per call, so a session can compose
//! them without shared mutable state.

pub mod coterie;
pub mod persistence;
pub mod player_action;
pub mod time;

pub use coterie::{LoyaltySummary, ManageCoterie};
pub use persistence::{LoadRun, SaveRun};
pub use player_action::{ActionOutcome, FeedingGround, PlayerAction, PlayerActions, StatChange};
pub use time::{AdvanceTurn, FiredEvent, NightlyEventEngine, NightlyReport, TurnReport};
