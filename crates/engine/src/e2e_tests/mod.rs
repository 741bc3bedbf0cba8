//! Engine E2E tests.
//!
//! These tests drive a fully composed `GameSession`:
//! - Seeded or scripted dice in place of the thread RNG
//! - An in-memory save store that still round-trips through JSON
//! - A recording subscriber alongside the pollable outbox
//!
//! # Running E2E Tests
//!
//! ```bash
//! cargo test -p nightfall-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod stats_tests;
mod time_tests;

pub use e2e_helpers::*;
