//! Coterie use cases.
//!
//! Recruitment, release and loyalty reactions for the player's companions.
//! The roster aggregate decides who leaves; this layer turns every
//! edge-triggered departure into exactly one `CompanionDeparted` event.

use std::sync::Arc;

use serde::Serialize;

use nightfall_domain::{
    Chronicle, Clan, CompanionId, CompanionPool, CoterieReaction, DomainError, DomainEvent,
    LoyaltyAdjustment, LoyaltyStatus, RecruitOutcome, SimulationSettings,
};

use crate::infrastructure::event_bus::EventBus;

/// One row of the coterie loyalty overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltySummary {
    pub name: String,
    pub clan: Clan,
    pub loyalty: i32,
    pub status: LoyaltyStatus,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
}

pub struct ManageCoterie {
    pool: Arc<CompanionPool>,
}

impl ManageCoterie {
    pub fn new(pool: Arc<CompanionPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &CompanionPool {
        &self.pool
    }

    /// Bring a companion into the coterie.
    ///
    /// First-time recruits are copied from the pool; anyone recruited before
    /// returns with the loyalty the run left them at.
    pub fn recruit(
        &self,
        chronicle: &mut Chronicle,
        settings: &SimulationSettings,
        id: &CompanionId,
        bus: &mut EventBus,
    ) -> Result<RecruitOutcome, DomainError> {
        let template = self
            .pool
            .get(id)
            .ok_or_else(|| DomainError::not_found("Companion", id.as_str()))?;

        let outcome = chronicle
            .roster_mut()
            .recruit(template, settings.rehire_policy())?;

        if outcome == RecruitOutcome::Recruited {
            tracing::info!(companion = %template.name(), "Companion joined the coterie");
            bus.publish(DomainEvent::CompanionRecruited {
                companion_id: id.clone(),
                companion_name: template.name().to_string(),
            });
        }
        Ok(outcome)
    }

    /// `false` when nobody by that name is active.
    pub fn release(&self, chronicle: &mut Chronicle, name: &str, bus: &mut EventBus) -> bool {
        match chronicle.roster_mut().release(name) {
            Some(companion) => {
                tracing::info!(companion = %companion.name(), "Companion released");
                bus.publish(DomainEvent::CompanionReleased {
                    companion_name: companion.name().to_string(),
                });
                true
            }
            None => false,
        }
    }

    pub fn react_to_action(
        &self,
        chronicle: &mut Chronicle,
        action: &str,
        bus: &mut EventBus,
    ) -> CoterieReaction {
        let reaction = chronicle.roster_mut().react_to_action(action);
        for entry in &reaction.reactions {
            tracing::debug!(
                companion = %entry.companion_name,
                delta = entry.delta,
                loyalty = entry.loyalty,
                "Companion reacted"
            );
        }
        self.announce_departures(&reaction.departed, bus);
        if !reaction.swept.is_empty() {
            tracing::info!(companions = ?reaction.swept, "Swept companions at the loyalty floor");
        }
        reaction
    }

    pub fn manual_adjust(
        &self,
        chronicle: &mut Chronicle,
        name: &str,
        delta: i32,
        bus: &mut EventBus,
    ) -> Result<LoyaltyAdjustment, DomainError> {
        let adjustment = chronicle.roster_mut().adjust(name, delta)?;
        if adjustment.departed {
            self.announce_departures(std::slice::from_ref(&adjustment.companion_name), bus);
        }
        Ok(adjustment)
    }

    pub fn sweep_departures(&self, chronicle: &mut Chronicle) -> Vec<String> {
        chronicle.roster_mut().sweep_departures()
    }

    /// Label for any companion the run knows about.
    ///
    /// Anyone recruited this run reports their live loyalty, companions who
    /// walked out report `Gone`, and everyone else reports the pool's
    /// starting state.
    pub fn status_label(&self, chronicle: &Chronicle, name: &str) -> Option<LoyaltyStatus> {
        let roster = chronicle.roster();
        if let Some(record) = roster.record(name) {
            if roster.has_departed(record.id()) {
                return Some(LoyaltyStatus::Gone);
            }
            return Some(record.status());
        }
        let template = self.pool.get_by_name(name)?;
        if roster.has_departed(template.id()) {
            return Some(LoyaltyStatus::Gone);
        }
        Some(template.status())
    }

    pub fn loyalty_summary(&self, chronicle: &Chronicle) -> Vec<LoyaltySummary> {
        chronicle
            .roster()
            .active()
            .iter()
            .map(|companion| LoyaltySummary {
                name: companion.name().to_string(),
                clan: companion.clan(),
                loyalty: companion.loyalty().current(),
                status: companion.status(),
                likes: companion.loyalty().likes().to_vec(),
                dislikes: companion.loyalty().dislikes().to_vec(),
            })
            .collect()
    }

    fn announce_departures(&self, names: &[String], bus: &mut EventBus) {
        for name in names {
            tracing::warn!(companion = %name, "Companion left over loyalty");
            bus.publish(DomainEvent::departure(name.clone()));
        }
    }
}
