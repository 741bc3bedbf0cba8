//! Nightfall engine library.
//!
//! Runs the nightly simulation over the domain types.
//!
//! ## Structure
//!
//! - `use_cases/` - Phase advancement, player commands, coterie, persistence
//! - `infrastructure/` - Port traits and their adapters
//! - `app` - Session composition

pub mod app;
pub mod error;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests against a fully composed session.
#[cfg(test)]
mod e2e_tests;

pub use app::{GameSession, SessionPorts};
pub use error::SessionError;
