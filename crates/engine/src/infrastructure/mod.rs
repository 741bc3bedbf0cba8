//! Infrastructure implementations.
//!
//! Port traits plus the adapters the session is wired with.

pub mod clock;
pub mod content_sources;
pub mod event_bus;
pub mod persistence;
pub mod ports;
pub mod settings;
