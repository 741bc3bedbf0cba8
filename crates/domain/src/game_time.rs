use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// =============================================================================
// Phase
// =============================================================================

/// One quarter-slice of a game night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Dusk,
    Night,
    Midnight,
    Dawn,
}

impl Phase {
    pub const COUNT: usize = 4;

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Dusk => "Dusk",
            Phase::Night => "Night",
            Phase::Midnight => "Midnight",
            Phase::Dawn => "Dawn",
        }
    }

    /// Position in the cycle, always in `0..4`.
    pub fn index(&self) -> usize {
        match self {
            Phase::Dusk => 0,
            Phase::Night => 1,
            Phase::Midnight => 2,
            Phase::Dawn => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Phase, DomainError> {
        Self::all()
            .get(index)
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Phase index out of range: {}", index)))
    }

    /// Returns the next phase in sequence. Dawn wraps to Dusk.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Dusk => Phase::Night,
            Phase::Night => Phase::Midnight,
            Phase::Midnight => Phase::Dawn,
            Phase::Dawn => Phase::Dusk,
        }
    }

    /// Returns all phases in order.
    pub fn all() -> [Phase; 4] {
        [Phase::Dusk, Phase::Night, Phase::Midnight, Phase::Dawn]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dusk" => Ok(Phase::Dusk),
            "night" => Ok(Phase::Night),
            "midnight" => Ok(Phase::Midnight),
            "dawn" => Ok(Phase::Dawn),
            _ => Err(DomainError::parse(format!("Unknown phase: {}", s))),
        }
    }
}

// =============================================================================
// Phase Clock
// =============================================================================

/// What happened when the clock moved forward one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAdvance {
    pub from: Phase,
    pub to: Phase,
    pub day: u32,
    /// True when the cycle wrapped back to the first phase and the day counter moved.
    pub new_day: bool,
}

/// Cyclic four-phase schedule with a day counter.
///
/// Starts at day 1, Dusk. The day counter increments exactly once per wrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseClock {
    day: u32,
    phase: Phase,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseClock {
    pub fn new() -> Self {
        Self {
            day: 1,
            phase: Phase::Dusk,
        }
    }

    /// Reconstruct from a save payload.
    pub fn from_storage(day: u32, phase_index: usize) -> Result<Self, DomainError> {
        if day == 0 {
            return Err(DomainError::malformed_save("day counter starts at 1"));
        }
        let phase = Phase::from_index(phase_index)
            .map_err(|e| DomainError::malformed_save(e.to_string()))?;
        Ok(Self { day, phase })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn advance(&mut self) -> PhaseAdvance {
        let from = self.phase;
        self.phase = from.next();
        let new_day = self.phase.index() == 0;
        if new_day {
            self.day = self.day.saturating_add(1);
        }
        PhaseAdvance {
            from,
            to: self.phase,
            day: self.day,
            new_day,
        }
    }

    pub fn display(&self) -> String {
        format!("Night {}, {}", self.day, self.phase.display_name())
    }
}
