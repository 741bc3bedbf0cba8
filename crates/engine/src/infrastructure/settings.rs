//! Runner configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use nightfall_domain::{Clan, DomainError, Faction, NewRun};

/// Settings for the headless `nightfall` runner.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerSettings {
    pub seed: u64,
    pub character_name: String,
    pub faction: Faction,
    pub clan: Clan,
    pub turns: u32,
    pub save_path: PathBuf,
    /// Optional host-supplied companion pool (JSON)
    pub companions_path: Option<PathBuf>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            seed: 1,
            character_name: "Fledgling".to_string(),
            faction: Faction::Camarilla,
            clan: Clan::Toreador,
            turns: 12,
            save_path: PathBuf::from("saves/nightfall.json"),
            companions_path: None,
        }
    }
}

impl RunnerSettings {
    /// Read `NIGHTFALL_*` variables, falling back to defaults.
    ///
    /// Faction and clan names that fail to parse are errors rather than
    /// silently replaced.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();

        Ok(Self {
            seed: env_or("NIGHTFALL_SEED", defaults.seed),
            character_name: env_or("NIGHTFALL_CHARACTER", defaults.character_name),
            faction: env_parsed("NIGHTFALL_FACTION", defaults.faction)?,
            clan: env_parsed("NIGHTFALL_CLAN", defaults.clan)?,
            turns: env_or("NIGHTFALL_TURNS", defaults.turns),
            save_path: std::env::var("NIGHTFALL_SAVE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_path),
            companions_path: std::env::var("NIGHTFALL_COMPANIONS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn new_run(&self) -> NewRun {
        NewRun::new(self.character_name.clone(), self.clan, self.faction)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_parsed<T>(key: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().parse(),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_a_valid_run() {
        let settings = RunnerSettings::default();
        let run = settings.new_run();
        assert_eq!(run.faction, Faction::Camarilla);
        assert_eq!(run.clan, Clan::Toreador);
        assert!(settings.turns > 0);
    }

    #[test]
    fn env_or_ignores_unparseable_values() {
        assert_eq!(env_or("NIGHTFALL_TEST_UNSET_KEY_FOR_ENV_OR", 9u32), 9);
    }
}
