//! Companion roster aggregate
//!
//! The player's active coterie. Recruited companions are copied in from the
//! content pool, so loyalty changes here never leak back into the pool.
//! Anyone who leaves, released or departed, keeps a record here with the
//! loyalty they left with, and that record is what comes back on a recruit.
//!
//! # Departures
//!
//! A companion leaves on their own in two ways:
//!
//! - **edge**: a loyalty mutation takes them from a positive value to 0
//! - **sweep**: after a declared action, anyone already sitting at 0 is removed
//!
//! Only the edge counts as an auto-expulsion; callers raise the departure
//! event from `CoterieReaction::departed` / `LoyaltyAdjustment::departed`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::companion::Companion;
use crate::error::DomainError;
use crate::events::{CoterieReaction, LoyaltyAdjustment, LoyaltyReaction, RecruitOutcome};
use crate::ids::CompanionId;

/// What happens when a companion who left over loyalty is recruited again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RehirePolicy {
    /// They will not come back
    Refuse,
    /// They come back with the loyalty they left with, which is 0
    AsTheyLeft,
    /// They come back at the pool's starting loyalty
    StartingLoyalty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRoster {
    active: Vec<Companion>,
    /// Companions who left the coterie, as they were when they left
    #[serde(default)]
    former: Vec<Companion>,
    /// Ids of companions who left over loyalty
    #[serde(default)]
    departed: Vec<CompanionId>,
}

impl CompanionRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from storage, rejecting rosters that break roster invariants.
    pub fn from_storage(
        active: Vec<Companion>,
        former: Vec<Companion>,
        departed: Vec<CompanionId>,
    ) -> Result<Self, DomainError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for companion in active.iter().chain(&former) {
            companion
                .validate()
                .map_err(|e| DomainError::malformed_save(e.to_string()))?;
            if !companion.is_recruitable() {
                return Err(DomainError::malformed_save(format!(
                    "roster member '{}' is not recruitable",
                    companion.name()
                )));
            }
            if !ids.insert(companion.id().clone()) {
                return Err(DomainError::malformed_save(format!(
                    "duplicate roster id '{}'",
                    companion.id()
                )));
            }
            if !names.insert(companion.name().to_string()) {
                return Err(DomainError::malformed_save(format!(
                    "duplicate roster name '{}'",
                    companion.name()
                )));
            }
        }
        if let Some(id) = departed.iter().find(|id| active.iter().any(|c| c.id() == *id)) {
            return Err(DomainError::malformed_save(format!(
                "'{}' is both active and departed",
                id
            )));
        }
        Ok(Self {
            active,
            former,
            departed,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Active companions in recruitment order.
    pub fn active(&self) -> &[Companion] {
        &self.active
    }

    /// Companions who left, with the loyalty they left with.
    pub fn former(&self) -> &[Companion] {
        &self.former
    }

    pub fn departed(&self) -> &[CompanionId] {
        &self.departed
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Companion> {
        self.active.iter().find(|c| c.name() == name)
    }

    /// Live record for anyone this run has recruited, active or not.
    pub fn record(&self, name: &str) -> Option<&Companion> {
        self.get(name)
            .or_else(|| self.former.iter().find(|c| c.name() == name))
    }

    pub fn contains(&self, id: &CompanionId) -> bool {
        self.active.iter().any(|c| c.id() == id)
    }

    pub fn has_departed(&self, id: &CompanionId) -> bool {
        self.departed.contains(id)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Add a companion to the coterie from their pool template.
    ///
    /// Re-recruiting an active companion is a no-op. Anyone recruited before
    /// comes back from their own record, not the template; `rehire` decides
    /// how a companion who left over loyalty returns.
    pub fn recruit(
        &mut self,
        template: &Companion,
        rehire: RehirePolicy,
    ) -> Result<RecruitOutcome, DomainError> {
        if !template.is_recruitable() {
            return Err(DomainError::not_recruitable(template.name()));
        }
        if self.contains(template.id()) {
            return Ok(RecruitOutcome::AlreadyActive);
        }
        if self.get(template.name()).is_some() {
            return Err(DomainError::validation(format!(
                "Another companion named '{}' is already in the coterie",
                template.name()
            )));
        }

        let departed = self.has_departed(template.id());
        if departed && rehire == RehirePolicy::Refuse {
            return Err(DomainError::NotRecruitable(format!(
                "{} left the coterie and will not return",
                template.name()
            )));
        }
        let record = self.take_former(template.id());
        let companion = match record {
            Some(record) if !(departed && rehire == RehirePolicy::StartingLoyalty) => record,
            _ => template.clone(),
        };
        if departed {
            self.departed.retain(|id| id != template.id());
        }
        self.active.push(companion);
        Ok(RecruitOutcome::Recruited)
    }

    /// Remove by name, keeping their record. `None` when nobody by that name
    /// is active.
    pub fn release(&mut self, name: &str) -> Option<Companion> {
        let index = self.active.iter().position(|c| c.name() == name)?;
        let companion = self.active.remove(index);
        self.remember(companion.clone());
        Some(companion)
    }

    // =========================================================================
    // Loyalty
    // =========================================================================

    /// Run a declared action past every active companion, then sweep.
    pub fn react_to_action(&mut self, action: &str) -> CoterieReaction {
        let mut reaction = CoterieReaction::default();
        let mut exhausted = Vec::new();

        for companion in &mut self.active {
            let delta = companion.reaction_delta(action);
            if delta == 0 {
                continue;
            }
            let outcome = companion.adjust_loyalty(delta);
            if outcome.is_exhausted() {
                exhausted.push(companion.id().clone());
            }
            reaction.reactions.push(LoyaltyReaction {
                companion_name: companion.name().to_string(),
                delta,
                loyalty: companion.loyalty().current(),
                status: companion.status(),
            });
        }

        for id in exhausted {
            if let Some(name) = self.expel(&id) {
                reaction.departed.push(name);
            }
        }
        reaction.swept = self.sweep_departures();
        reaction
    }

    /// Adjust one active companion's loyalty by name.
    pub fn adjust(&mut self, name: &str, delta: i32) -> Result<LoyaltyAdjustment, DomainError> {
        let companion = self
            .active
            .iter_mut()
            .find(|c| c.name() == name && c.is_recruitable())
            .ok_or_else(|| DomainError::not_in_roster(name))?;

        let outcome = companion.adjust_loyalty(delta);
        let adjustment = LoyaltyAdjustment {
            companion_name: companion.name().to_string(),
            loyalty: companion.loyalty().current(),
            status: companion.status(),
            departed: outcome.is_exhausted(),
        };
        if adjustment.departed {
            let id = companion.id().clone();
            self.expel(&id);
        }
        Ok(adjustment)
    }

    /// Remove and return the names of every active companion at the floor.
    pub fn sweep_departures(&mut self) -> Vec<String> {
        let (gone, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|c| c.loyalty().is_at_floor());
        self.active = staying;
        gone.into_iter()
            .map(|companion| {
                let name = companion.name().to_string();
                self.mark_departed(companion.id().clone());
                self.remember(companion);
                name
            })
            .collect()
    }

    fn expel(&mut self, id: &CompanionId) -> Option<String> {
        let index = self.active.iter().position(|c| c.id() == id)?;
        let companion = self.active.remove(index);
        let name = companion.name().to_string();
        self.mark_departed(id.clone());
        self.remember(companion);
        Some(name)
    }

    fn remember(&mut self, companion: Companion) {
        self.former.retain(|c| c.id() != companion.id());
        self.former.push(companion);
    }

    fn take_former(&mut self, id: &CompanionId) -> Option<Companion> {
        let index = self.former.iter().position(|c| c.id() == id)?;
        Some(self.former.remove(index))
    }

    fn mark_departed(&mut self, id: CompanionId) {
        if !self.departed.contains(&id) {
            self.departed.push(id);
        }
    }
}
