//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of randomness for nightly events and action outcomes.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn gen_index(&self, len: usize) -> usize;

    /// True with probability `p`.
    fn chance(&self, p: f64) -> bool {
        self.next_f64() < p
    }
}
