//! Nightly event engine.
//!
//! Runs once per day rollover: passive blood decay first, then a chance to
//! fire one uniformly chosen entry of the event table.

use std::sync::Arc;

use nightfall_domain::{Chronicle, DomainEvent, SimulationSettings, StatKind};

use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::ports::RandomPort;

/// A table entry that fired, with the value it left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredEvent {
    pub stat: StatKind,
    pub delta: i64,
    pub value: i64,
    pub message: String,
}

/// What happened at the start of a new night.
#[derive(Debug, Clone, PartialEq)]
pub struct NightlyReport {
    pub day: u32,
    pub blood_remaining: i64,
    pub event: Option<FiredEvent>,
}

pub struct NightlyEventEngine {
    random: Arc<dyn RandomPort>,
}

impl NightlyEventEngine {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Apply decay and maybe one random event. Call exactly once per day increment.
    pub fn on_day_rollover(
        &self,
        chronicle: &mut Chronicle,
        settings: &SimulationSettings,
        bus: &mut EventBus,
    ) -> NightlyReport {
        let day = chronicle.day();
        let blood_remaining =
            chronicle.apply_stat(StatKind::BloodPool, -settings.nightly_blood_decay);

        tracing::info!(day, blood_remaining, "New night begins");
        bus.publish(DomainEvent::NightBegan {
            day,
            blood_remaining,
        });

        let event = self.roll_event(chronicle, settings);
        if let Some(fired) = &event {
            bus.publish(DomainEvent::NightlyEventFired {
                day,
                stat: fired.stat,
                delta: fired.delta,
                value: fired.value,
                message: fired.message.clone(),
            });
        }

        NightlyReport {
            day,
            blood_remaining,
            event,
        }
    }

    fn roll_event(
        &self,
        chronicle: &mut Chronicle,
        settings: &SimulationSettings,
    ) -> Option<FiredEvent> {
        let table = &settings.event_table;
        if table.is_empty() || !self.random.chance(settings.nightly_event_probability) {
            return None;
        }
        let entry = table.get(self.random.gen_index(table.len()))?;
        let value = chronicle.apply_stat(entry.stat, entry.delta);
        tracing::debug!(stat = %entry.stat, delta = entry.delta, value, "Nightly event applied");
        Some(FiredEvent {
            stat: entry.stat,
            delta: entry.delta,
            value,
            message: entry.message.clone(),
        })
    }
}
