//! Time use cases.
//!
//! Handles the phase cycle:
//! - Advancing one phase and refilling the action budget
//! - Running the nightly event engine when the cycle wraps to Dusk

mod nightly;

pub use nightly::{FiredEvent, NightlyEventEngine, NightlyReport};

use nightfall_domain::{Chronicle, DomainEvent, PhaseAdvance, SimulationSettings};

use crate::infrastructure::event_bus::EventBus;

/// Result of one `advance_turn`.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub advance: PhaseAdvance,
    /// Present only when this advance started a new night
    pub nightly: Option<NightlyReport>,
}

/// Use case for advancing the phase clock.
///
/// The clock is the only driver of day rollover, so the nightly engine is
/// owned here and nowhere else.
pub struct AdvanceTurn {
    nightly: NightlyEventEngine,
}

impl AdvanceTurn {
    pub fn new(nightly: NightlyEventEngine) -> Self {
        Self { nightly }
    }

    /// Never fails.
    pub fn execute(
        &self,
        chronicle: &mut Chronicle,
        settings: &SimulationSettings,
        bus: &mut EventBus,
    ) -> TurnReport {
        let advance = chronicle.advance_phase();
        tracing::debug!(
            from = %advance.from,
            to = %advance.to,
            day = advance.day,
            "Phase advanced"
        );
        bus.publish(DomainEvent::PhaseAdvanced {
            day: advance.day,
            phase: advance.to,
        });

        let nightly = advance
            .new_day
            .then(|| self.nightly.on_day_rollover(chronicle, settings, bus));

        TurnReport { advance, nightly }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::clock::ScriptedRandom;
    use nightfall_domain::{Clan, Faction, NewRun, Phase};

    #[test]
    fn nightly_runs_only_on_wrap() {
        let use_case = AdvanceTurn::new(NightlyEventEngine::new(Arc::new(ScriptedRandom::quiet())));
        let settings = SimulationSettings::default();
        let mut chronicle =
            Chronicle::new(&NewRun::new("Julian", Clan::Tremere, Faction::Camarilla), 3).unwrap();
        let mut bus = EventBus::new();

        for _ in 0..3 {
            chronicle.consume_action().unwrap();
            let report = use_case.execute(&mut chronicle, &settings, &mut bus);
            assert!(report.nightly.is_none());
            assert_eq!(chronicle.budget().remaining(), 3);
        }

        let report = use_case.execute(&mut chronicle, &settings, &mut bus);
        assert_eq!(report.advance.to, Phase::Dusk);
        assert_eq!(report.nightly.map(|n| n.day), Some(2));
        assert_eq!(chronicle.day(), 2);
    }
}
