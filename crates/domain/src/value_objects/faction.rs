//! Factions, clans and the faction-keyed starting context for a new run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Sect the player starts aligned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Camarilla,
    Anarchs,
    Sabbat,
    Independent,
}

impl Faction {
    pub fn all() -> [Faction; 4] {
        [
            Faction::Camarilla,
            Faction::Anarchs,
            Faction::Sabbat,
            Faction::Independent,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Camarilla => "camarilla",
            Faction::Anarchs => "anarchs",
            Faction::Sabbat => "sabbat",
            Faction::Independent => "independent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Faction::Camarilla => "Camarilla",
            Faction::Anarchs => "Anarch Movement",
            Faction::Sabbat => "Sabbat",
            Faction::Independent => "Independent",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Faction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "camarilla" => Ok(Faction::Camarilla),
            "anarchs" | "anarch" => Ok(Faction::Anarchs),
            "sabbat" => Ok(Faction::Sabbat),
            "independent" => Ok(Faction::Independent),
            _ => Err(DomainError::parse(format!("Unknown faction: {}", s))),
        }
    }
}

/// Vampire clan of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clan {
    Ventrue,
    Toreador,
    Tremere,
    Brujah,
    Gangrel,
    Malkavian,
    Nosferatu,
    Tzimisce,
    Lasombra,
    Ministry,
    Hecata,
    Caitiff,
}

impl Clan {
    pub fn display_name(&self) -> &'static str {
        match self {
            Clan::Ventrue => "Ventrue",
            Clan::Toreador => "Toreador",
            Clan::Tremere => "Tremere",
            Clan::Brujah => "Brujah",
            Clan::Gangrel => "Gangrel",
            Clan::Malkavian => "Malkavian",
            Clan::Nosferatu => "Nosferatu",
            Clan::Tzimisce => "Tzimisce",
            Clan::Lasombra => "Lasombra",
            Clan::Ministry => "Ministry",
            Clan::Hecata => "Hecata",
            Clan::Caitiff => "Caitiff",
        }
    }

    /// Starting money for a new character of this clan
    pub fn starting_resources(&self) -> i64 {
        match self {
            Clan::Ventrue => 35_000,
            Clan::Toreador => 28_000,
            Clan::Tremere => 20_000,
            Clan::Brujah => 22_000,
            Clan::Gangrel => 18_000,
            _ => 25_000,
        }
    }

    /// Starting contacts for a new character of this clan
    pub fn starting_contacts(&self) -> i64 {
        match self {
            Clan::Ventrue => 6,
            Clan::Toreador => 7,
            Clan::Tremere => 4,
            Clan::Brujah => 5,
            Clan::Gangrel => 3,
            _ => 5,
        }
    }

    /// Ventrue may only feed from mortals of good breeding
    pub fn has_blue_blood(&self) -> bool {
        matches!(self, Clan::Ventrue)
    }
}

impl fmt::Display for Clan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Clan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ventrue" => Ok(Clan::Ventrue),
            "toreador" => Ok(Clan::Toreador),
            "tremere" => Ok(Clan::Tremere),
            "brujah" => Ok(Clan::Brujah),
            "gangrel" => Ok(Clan::Gangrel),
            "malkavian" => Ok(Clan::Malkavian),
            "nosferatu" => Ok(Clan::Nosferatu),
            "tzimisce" => Ok(Clan::Tzimisce),
            "lasombra" => Ok(Clan::Lasombra),
            "ministry" => Ok(Clan::Ministry),
            "hecata" => Ok(Clan::Hecata),
            "caitiff" => Ok(Clan::Caitiff),
            _ => Err(DomainError::parse(format!("Unknown clan: {}", s))),
        }
    }
}

/// Immutable seed data for a run started under `faction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionContext {
    faction: Faction,
    allies: Vec<String>,
    enemies: Vec<String>,
    starting_location: String,
    initial_contacts: Vec<String>,
    starting_resources: i64,
    starting_status: u8,
}

impl FactionContext {
    /// The built-in context for each faction.
    pub fn for_faction(faction: Faction) -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        match faction {
            Faction::Camarilla => Self {
                faction,
                allies: strings(&["prince_vannevar", "seneschal_helena"]),
                enemies: strings(&["baron_garcia", "pack_leader_varga"]),
                starting_location: "downtown_sf".to_string(),
                initial_contacts: strings(&[
                    "Elizabeth Carmichael (Ventrue Primogen)",
                    "Helena Markov (Seneschal)",
                ]),
                starting_resources: 25_000,
                starting_status: 1,
            },
            Faction::Anarchs => Self {
                faction,
                allies: strings(&["baron_garcia", "tech_zero"]),
                enemies: strings(&["prince_vannevar", "sheriff_marcus"]),
                starting_location: "oakland".to_string(),
                initial_contacts: strings(&["Miguel Garcia (Baron)", "Zero (Tech Specialist)"]),
                starting_resources: 10_000,
                starting_status: 0,
            },
            Faction::Sabbat => Self {
                faction,
                allies: strings(&["pack_leader_varga", "pack_priest"]),
                enemies: strings(&["prince_vannevar", "baron_garcia"]),
                starting_location: "mission_district".to_string(),
                initial_contacts: strings(&[
                    "Viktor Varga (Pack Leader)",
                    "Father Mendez (Pack Priest)",
                ]),
                starting_resources: 5_000,
                starting_status: 0,
            },
            Faction::Independent => Self {
                faction,
                allies: Vec::new(),
                enemies: Vec::new(),
                starting_location: "random".to_string(),
                initial_contacts: strings(&["Khalil Al-Rashid (Ministry Agent)"]),
                starting_resources: 15_000,
                starting_status: 0,
            },
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn allies(&self) -> &[String] {
        &self.allies
    }

    pub fn enemies(&self) -> &[String] {
        &self.enemies
    }

    pub fn starting_location(&self) -> &str {
        &self.starting_location
    }

    pub fn initial_contacts(&self) -> &[String] {
        &self.initial_contacts
    }

    pub fn starting_resources(&self) -> i64 {
        self.starting_resources
    }

    pub fn starting_status(&self) -> u8 {
        self.starting_status
    }
}
