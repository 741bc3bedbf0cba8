//! Companion content pool
//!
//! Typed `Faction -> Vec<Companion>` mapping of every NPC a run can meet,
//! validated when built. `CompanionPool::default()` is the built-in San
//! Francisco cast; hosts may supply their own through the engine's loader.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::companion::Companion;
use crate::error::DomainError;
use crate::ids::CompanionId;
use crate::value_objects::{Clan, Faction, Loyalty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Faction, Vec<Companion>>", into = "BTreeMap<Faction, Vec<Companion>>")]
pub struct CompanionPool {
    by_faction: BTreeMap<Faction, Vec<Companion>>,
}

impl CompanionPool {
    /// Build and validate a pool.
    ///
    /// Ids and names must be unique across the whole pool, each companion must
    /// sit under its own faction, and recruitable companions need at least
    /// one like or dislike keyword.
    pub fn new(by_faction: BTreeMap<Faction, Vec<Companion>>) -> Result<Self, DomainError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for (faction, companions) in &by_faction {
            for companion in companions {
                companion.validate()?;
                if companion.faction() != *faction {
                    return Err(DomainError::validation(format!(
                        "Companion '{}' is listed under {} but belongs to {}",
                        companion.id(),
                        faction.as_str(),
                        companion.faction().as_str()
                    )));
                }
                if !ids.insert(companion.id().clone()) {
                    return Err(DomainError::validation(format!(
                        "Duplicate companion id '{}'",
                        companion.id()
                    )));
                }
                if !names.insert(companion.name().to_string()) {
                    return Err(DomainError::validation(format!(
                        "Duplicate companion name '{}'",
                        companion.name()
                    )));
                }
                let loyalty = companion.loyalty();
                if companion.is_recruitable()
                    && loyalty.likes().is_empty()
                    && loyalty.dislikes().is_empty()
                {
                    return Err(DomainError::validation(format!(
                        "Recruitable companion '{}' has no like or dislike keywords",
                        companion.id()
                    )));
                }
            }
        }

        Ok(Self { by_faction })
    }

    pub fn get(&self, id: &CompanionId) -> Option<&Companion> {
        self.iter().find(|c| c.id() == id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Companion> {
        self.iter().find(|c| c.name() == name)
    }

    pub fn by_faction(&self, faction: Faction) -> &[Companion] {
        self.by_faction
            .get(&faction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn recruitable(&self) -> impl Iterator<Item = &Companion> {
        self.iter().filter(|c| c.is_recruitable())
    }

    pub fn recruitable_by_faction(&self, faction: Faction) -> impl Iterator<Item = &Companion> {
        self.by_faction(faction).iter().filter(|c| c.is_recruitable())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Companion> {
        self.by_faction.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_faction.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<BTreeMap<Faction, Vec<Companion>>> for CompanionPool {
    type Error = DomainError;

    fn try_from(value: BTreeMap<Faction, Vec<Companion>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanionPool> for BTreeMap<Faction, Vec<Companion>> {
    fn from(pool: CompanionPool) -> Self {
        pool.by_faction
    }
}

// =============================================================================
// Built-in cast
// =============================================================================

struct Seed {
    id: &'static str,
    name: &'static str,
    clan: Clan,
    generation: u8,
}

struct RecruitSeed {
    seed: Seed,
    loyalty: i32,
    likes: [&'static str; 5],
    dislikes: [&'static str; 5],
}

const fn npc(id: &'static str, name: &'static str, clan: Clan, generation: u8) -> Seed {
    Seed {
        id,
        name,
        clan,
        generation,
    }
}

fn build(faction: Faction, seed: &Seed) -> Result<Companion, DomainError> {
    Ok(Companion::new(CompanionId::new(seed.id)?, seed.name, seed.clan, faction)?
        .with_generation(seed.generation))
}

fn build_recruit(faction: Faction, recruit: &RecruitSeed) -> Result<Companion, DomainError> {
    let loyalty = Loyalty::new(recruit.loyalty)?
        .with_likes(recruit.likes)
        .with_dislikes(recruit.dislikes);
    Ok(build(faction, &recruit.seed)?.recruitable_with(loyalty))
}

fn faction_roster(
    faction: Faction,
    npcs: &[Seed],
    recruits: &[RecruitSeed],
) -> Result<Vec<Companion>, DomainError> {
    npcs.iter()
        .map(|seed| build(faction, seed))
        .chain(recruits.iter().map(|recruit| build_recruit(faction, recruit)))
        .collect()
}

/// The built-in San Francisco cast.
pub fn default_companions() -> Result<CompanionPool, DomainError> {
    let mut by_faction = BTreeMap::new();

    by_faction.insert(
        Faction::Camarilla,
        faction_roster(
            Faction::Camarilla,
            &[
                npc("prince_vannevar", "Vannevar Thomas", Clan::Ventrue, 7),
                npc("seneschal_helena", "Helena Markov", Clan::Toreador, 8),
                npc("sheriff_marcus", "Marcus Stone", Clan::Brujah, 9),
                npc("primogen_ventrue", "Elizabeth Carmichael", Clan::Ventrue, 8),
                npc("primogen_toreador", "Vincent Artois", Clan::Toreador, 9),
                npc("primogen_tremere", "Dr. Mikhail Volkov", Clan::Tremere, 9),
            ],
            &[RecruitSeed {
                seed: npc("camarilla_recruit", "Sarah Mitchell", Clan::Malkavian, 11),
                loyalty: 45,
                likes: [
                    "justice",
                    "helping mortals",
                    "honesty",
                    "protecting the innocent",
                    "legal solutions",
                ],
                dislikes: [
                    "corruption",
                    "needless violence",
                    "lying",
                    "breaking the masquerade",
                    "authoritarian behavior",
                ],
            }],
        )?,
    );

    by_faction.insert(
        Faction::Anarchs,
        faction_roster(
            Faction::Anarchs,
            &[
                npc("baron_garcia", "Miguel Garcia", Clan::Gangrel, 9),
                npc("lieutenant_kane", "Rebecca Kane", Clan::Brujah, 10),
                npc("tech_zero", "Zero", Clan::Nosferatu, 11),
                npc("street_leader_1", "Johnny Riot", Clan::Brujah, 12),
                npc("street_leader_2", "Luna Blackwood", Clan::Gangrel, 11),
            ],
            &[
                RecruitSeed {
                    seed: npc("anarch_recruit_1", "Alex Chen", Clan::Toreador, 12),
                    loyalty: 55,
                    likes: [
                        "artistic expression",
                        "freedom",
                        "creativity",
                        "rebellion",
                        "authentic experiences",
                    ],
                    dislikes: [
                        "censorship",
                        "conformity",
                        "pretentious art",
                        "corporate influence",
                        "traditional hierarchy",
                    ],
                },
                RecruitSeed {
                    seed: npc("anarch_recruit_2", "Maria Santos", Clan::Caitiff, 13),
                    loyalty: 40,
                    likes: [
                        "equality",
                        "survival",
                        "loyalty",
                        "street justice",
                        "proving worth",
                    ],
                    dislikes: [
                        "discrimination",
                        "abandonment",
                        "clan prejudice",
                        "being underestimated",
                        "betrayal",
                    ],
                },
            ],
        )?,
    );

    by_faction.insert(
        Faction::Sabbat,
        faction_roster(
            Faction::Sabbat,
            &[
                npc("pack_leader_varga", "Viktor Varga", Clan::Tzimisce, 8),
                npc("pack_priest", "Father Mendez", Clan::Lasombra, 9),
                npc("pack_warrior", "Bloodhawk", Clan::Brujah, 10),
            ],
            &[RecruitSeed {
                seed: npc("sabbat_recruit", "Crimson", Clan::Gangrel, 11),
                loyalty: 30,
                likes: [
                    "strength",
                    "survival",
                    "honest brutality",
                    "respect",
                    "pack loyalty",
                ],
                dislikes: [
                    "weakness",
                    "manipulation",
                    "false promises",
                    "abandonment",
                    "being caged",
                ],
            }],
        )?,
    );

    by_faction.insert(
        Faction::Independent,
        faction_roster(
            Faction::Independent,
            &[npc("ministry_agent", "Khalil Al-Rashid", Clan::Ministry, 10)],
            &[RecruitSeed {
                seed: npc("independent_recruit", "Dr. Emma Cross", Clan::Hecata, 12),
                loyalty: 60,
                likes: [
                    "knowledge",
                    "scientific method",
                    "helping victims",
                    "uncovering truth",
                    "learning",
                ],
                dislikes: [
                    "ignorance",
                    "wasted potential",
                    "covering up crimes",
                    "anti-intellectualism",
                    "destroying evidence",
                ],
            }],
        )?,
    );

    CompanionPool::new(by_faction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::LoyaltyStatus;

    #[test]
    fn default_pool_has_twenty_companions_and_five_recruits() {
        let pool = default_companions().unwrap();
        assert_eq!(pool.len(), 20);
        assert_eq!(pool.recruitable().count(), 5);
        assert_eq!(pool.recruitable_by_faction(Faction::Anarchs).count(), 2);
        assert_eq!(pool.by_faction(Faction::Sabbat).len(), 4);
    }

    #[test]
    fn default_pool_recruit_values() {
        let pool = default_companions().unwrap();
        let crimson = pool.get(&CompanionId::new("sabbat_recruit").unwrap()).unwrap();
        assert_eq!(crimson.name(), "Crimson");
        assert_eq!(crimson.loyalty().current(), 30);
        assert_eq!(crimson.status(), LoyaltyStatus::Suspicious);

        let prince = pool.get_by_name("Vannevar Thomas").unwrap();
        assert!(!prince.is_recruitable());
        assert_eq!(prince.generation(), Some(7));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = Companion::new(
            CompanionId::new("a").unwrap(),
            "Twin",
            Clan::Brujah,
            Faction::Anarchs,
        )
        .unwrap();
        let b = Companion::new(
            CompanionId::new("b").unwrap(),
            "Twin",
            Clan::Brujah,
            Faction::Anarchs,
        )
        .unwrap();
        let mut map = BTreeMap::new();
        map.insert(Faction::Anarchs, vec![a, b]);
        assert!(matches!(
            CompanionPool::new(map),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn recruit_without_keywords_is_rejected() {
        let silent = Companion::new(
            CompanionId::new("silent").unwrap(),
            "Silent One",
            Clan::Nosferatu,
            Faction::Independent,
        )
        .unwrap()
        .recruitable_with(Loyalty::default());
        let mut map = BTreeMap::new();
        map.insert(Faction::Independent, vec![silent]);
        assert!(CompanionPool::new(map).is_err());
    }

    #[test]
    fn misfiled_faction_is_rejected() {
        let stray = Companion::new(
            CompanionId::new("stray").unwrap(),
            "Stray",
            Clan::Caitiff,
            Faction::Sabbat,
        )
        .unwrap();
        let mut map = BTreeMap::new();
        map.insert(Faction::Camarilla, vec![stray]);
        assert!(CompanionPool::new(map).is_err());
    }
}
