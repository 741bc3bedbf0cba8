//! Companion aggregate
//!
//! A named NPC who may join the player's coterie. Only recruitable companions
//! take part in loyalty math; everyone else reports "Not recruitable".

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::LoyaltyOutcome;
use crate::ids::CompanionId;
use crate::value_objects::{Clan, Faction, Loyalty, LoyaltyStatus};

/// Companion aggregate
///
/// # Invariants
///
/// - `name` is non-empty
/// - `loyalty.current` stays within `[0, 100]`
/// - loyalty never changes for a companion whose `recruitable` flag is unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    id: CompanionId,
    name: String,
    clan: Clan,
    faction: Faction,
    #[serde(default)]
    generation: Option<u8>,
    #[serde(default)]
    recruitable: bool,
    #[serde(default)]
    loyalty: Loyalty,
}

impl Companion {
    /// A non-recruitable companion with neutral loyalty.
    pub fn new(
        id: CompanionId,
        name: impl Into<String>,
        clan: Clan,
        faction: Faction,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation(format!(
                "Companion '{}' has an empty name",
                id
            )));
        }
        Ok(Self {
            id,
            name,
            clan,
            faction,
            generation: None,
            recruitable: false,
            loyalty: Loyalty::default(),
        })
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_generation(mut self, generation: u8) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Mark recruitable, with the given starting loyalty and keywords.
    pub fn recruitable_with(mut self, loyalty: Loyalty) -> Self {
        self.recruitable = true;
        self.loyalty = loyalty;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &CompanionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clan(&self) -> Clan {
        self.clan
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn generation(&self) -> Option<u8> {
        self.generation
    }

    pub fn is_recruitable(&self) -> bool {
        self.recruitable
    }

    pub fn loyalty(&self) -> &Loyalty {
        &self.loyalty
    }

    /// Status label, or `NotRecruitable` when the flag is unset.
    pub fn status(&self) -> LoyaltyStatus {
        if !self.recruitable {
            return LoyaltyStatus::NotRecruitable;
        }
        self.loyalty.status()
    }

    /// Check invariants after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Companion '{}' has an empty name",
                self.id
            )));
        }
        self.loyalty.validate()
    }

    // =========================================================================
    // Loyalty
    // =========================================================================

    /// Net delta this companion would take from a declared action.
    pub fn reaction_delta(&self, action: &str) -> i32 {
        if !self.recruitable {
            return 0;
        }
        self.loyalty.reaction_delta(action)
    }

    /// Apply a clamped loyalty delta.
    ///
    /// Reports `Exhausted` only on the strictly-positive-to-zero edge, so a
    /// companion already sitting at 0 never re-triggers departure here.
    pub fn adjust_loyalty(&mut self, delta: i32) -> LoyaltyOutcome {
        if !self.recruitable {
            return LoyaltyOutcome::Untracked;
        }
        let shift = self.loyalty.apply(delta);
        if shift.hit_floor() {
            LoyaltyOutcome::Exhausted { from: shift.from }
        } else {
            LoyaltyOutcome::Adjusted {
                from: shift.from,
                to: shift.to,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sarah(loyalty: i32) -> Companion {
        Companion::new(
            CompanionId::new("camarilla_recruit").unwrap(),
            "Sarah Mitchell",
            Clan::Malkavian,
            Faction::Camarilla,
        )
        .unwrap()
        .with_generation(11)
        .recruitable_with(
            Loyalty::new(loyalty)
                .unwrap()
                .with_likes(["justice"])
                .with_dislikes(["lying"]),
        )
    }

    #[test]
    fn non_recruitable_companion_ignores_loyalty_changes() {
        let mut prince = Companion::new(
            CompanionId::new("prince_vannevar").unwrap(),
            "Vannevar Thomas",
            Clan::Ventrue,
            Faction::Camarilla,
        )
        .unwrap();
        assert_eq!(prince.adjust_loyalty(-100), LoyaltyOutcome::Untracked);
        assert_eq!(prince.loyalty().current(), 50);
        assert_eq!(prince.status(), LoyaltyStatus::NotRecruitable);
        assert_eq!(prince.reaction_delta("lying about justice"), 0);
    }

    #[test]
    fn reaching_zero_from_above_is_exhausted() {
        let mut companion = sarah(10);
        assert_eq!(
            companion.adjust_loyalty(-10),
            LoyaltyOutcome::Exhausted { from: 10 }
        );
        assert_eq!(companion.status(), LoyaltyStatus::Gone);
    }

    #[test]
    fn companion_created_at_zero_does_not_exhaust_again() {
        let mut companion = sarah(0);
        assert_eq!(
            companion.adjust_loyalty(-5),
            LoyaltyOutcome::Adjusted { from: 0, to: 0 }
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = Companion::new(
            CompanionId::new("nobody").unwrap(),
            "   ",
            Clan::Caitiff,
            Faction::Independent,
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
