//! Clock and random implementations.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn gen_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic random source; the same seed replays the same run.
pub struct SeededRandom {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl RandomPort for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }

    fn gen_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.with_rng(|rng| rng.gen_range(0..len))
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted random for testing.
///
/// Hands out the queued rolls and indices in order. Once a queue runs dry,
/// rolls return `0.999` (every chance check fails) and indices return `0`.
#[cfg(test)]
pub struct ScriptedRandom {
    rolls: Mutex<std::collections::VecDeque<f64>>,
    indices: Mutex<std::collections::VecDeque<usize>>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(rolls: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into()),
            indices: Mutex::new(indices.into()),
        }
    }

    /// Never fires any chance-based outcome.
    pub fn quiet() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn next_f64(&self) -> f64 {
        self.rolls.lock().unwrap().pop_front().unwrap_or(0.999)
    }

    fn gen_index(&self, len: usize) -> usize {
        let index = self.indices.lock().unwrap().pop_front().unwrap_or(0);
        index.min(len.saturating_sub(1))
    }
}
