//! Stat value object - the named player stats the simulation mutates.
//!
//! Provides type safety for stat references instead of magic strings like "bloodPool".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Player stats tracked by the resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKind {
    /// Vitae available to the character (bounded)
    BloodPool,
    /// Distance from the Beast (bounded)
    Humanity,
    /// Political pull in the city (bounded)
    Influence,
    /// Money (unbounded, floor 0)
    Resources,
    /// Mortal and Kindred contacts (unbounded, floor 0)
    Contacts,
}

impl StatKind {
    /// Returns the canonical key used in save payloads and host calls.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodPool => "bloodPool",
            Self::Humanity => "humanity",
            Self::Influence => "influence",
            Self::Resources => "resources",
            Self::Contacts => "contacts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BloodPool => "Blood Pool",
            Self::Humanity => "Humanity",
            Self::Influence => "Influence",
            Self::Resources => "Resources",
            Self::Contacts => "Contacts",
        }
    }

    /// Bounded stats clamp into `[0, max]`; the rest only floor at 0.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::BloodPool | Self::Humanity | Self::Influence)
    }

    pub fn all() -> [StatKind; 5] {
        [
            Self::BloodPool,
            Self::Humanity,
            Self::Influence,
            Self::Resources,
            Self::Contacts,
        ]
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bloodpool" | "blood_pool" | "blood" => Ok(Self::BloodPool),
            "humanity" => Ok(Self::Humanity),
            "influence" => Ok(Self::Influence),
            "resources" => Ok(Self::Resources),
            "contacts" => Ok(Self::Contacts),
            _ => Err(DomainError::unknown_stat(s)),
        }
    }
}
