//! Chronicle aggregate - the whole state of one run
//!
//! Owns the phase clock, action budget, stats and companion roster. Every
//! simulation command mutates exactly one `Chronicle`.

use serde::{Deserialize, Serialize};

use super::companion_roster::CompanionRoster;
use crate::error::DomainError;
use crate::game_time::{Phase, PhaseAdvance, PhaseClock};
use crate::ids::RunId;
use crate::value_objects::{
    ActionBudget, Clan, Faction, FactionContext, ResourcePool, StatKind, UnboundedStat,
};

/// Character creation input for a fresh run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRun {
    pub name: String,
    pub clan: Clan,
    pub faction: Faction,
}

impl NewRun {
    pub fn new(name: impl Into<String>, clan: Clan, faction: Faction) -> Self {
        Self {
            name: name.into(),
            clan,
            faction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chronicle {
    id: RunId,
    character_name: String,
    clan: Clan,
    faction_context: FactionContext,
    clock: PhaseClock,
    budget: ActionBudget,
    stats: ResourcePool,
    roster: CompanionRoster,
}

impl Chronicle {
    /// Seed a fresh run: day 1, Dusk, full budget.
    ///
    /// Resources are the clan's starting money plus the faction's; contacts
    /// come from the clan alone.
    pub fn new(run: &NewRun, actions_per_phase: u32) -> Result<Self, DomainError> {
        let character_name = run.name.trim().to_string();
        if character_name.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        let faction_context = FactionContext::for_faction(run.faction);
        let resources = run
            .clan
            .starting_resources()
            .saturating_add(faction_context.starting_resources());
        let stats = ResourcePool::default()
            .with_resources(UnboundedStat::new(resources)?)
            .with_contacts(UnboundedStat::new(run.clan.starting_contacts())?);

        Ok(Self {
            id: RunId::new(),
            character_name,
            clan: run.clan,
            faction_context,
            clock: PhaseClock::new(),
            budget: ActionBudget::new(actions_per_phase),
            stats,
            roster: CompanionRoster::new(),
        })
    }

    /// Reconstruct from already-validated parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: RunId,
        character_name: String,
        clan: Clan,
        faction_context: FactionContext,
        clock: PhaseClock,
        budget: ActionBudget,
        stats: ResourcePool,
        roster: CompanionRoster,
    ) -> Self {
        Self {
            id,
            character_name,
            clan,
            faction_context,
            clock,
            budget,
            stats,
            roster,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn clan(&self) -> Clan {
        self.clan
    }

    pub fn faction_context(&self) -> &FactionContext {
        &self.faction_context
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    pub fn day(&self) -> u32 {
        self.clock.day()
    }

    pub fn budget(&self) -> &ActionBudget {
        &self.budget
    }

    pub fn stats(&self) -> &ResourcePool {
        &self.stats
    }

    pub fn roster(&self) -> &CompanionRoster {
        &self.roster
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Step to the next phase and refill the action budget.
    pub fn advance_phase(&mut self) -> PhaseAdvance {
        let advance = self.clock.advance();
        self.budget.reset();
        advance
    }

    pub fn consume_action(&mut self) -> Result<u32, DomainError> {
        self.budget.try_consume()
    }

    pub fn ensure_action_available(&self) -> Result<(), DomainError> {
        self.budget.ensure_available()
    }

    pub fn apply_stat(&mut self, kind: StatKind, delta: i64) -> i64 {
        self.stats.apply_delta(kind, delta)
    }

    pub fn apply_named_stat(&mut self, name: &str, delta: i64) -> Result<i64, DomainError> {
        self.stats.apply_named(name, delta)
    }

    pub fn roster_mut(&mut self) -> &mut CompanionRoster {
        &mut self.roster
    }
}
