//! JSON companion pool loader.
//!
//! The expected shape is the pool's own serde form, an object keyed by
//! faction:
//!
//! ```json
//! {
//!   "anarchs": [
//!     { "id": "anarch_recruit_1", "name": "Alex Chen", "clan": "toreador",
//!       "faction": "anarchs", "generation": 12, "recruitable": true,
//!       "loyalty": { "current": 55, "likes": ["freedom"], "dislikes": ["conformity"] } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use nightfall_domain::CompanionPool;

/// Errors that can occur during import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),
}

/// Parse and validate a pool from JSON text.
///
/// Validation runs while deserializing, so a duplicate id or name, a loyalty
/// outside `[0, 100]` or a recruit without keywords fails the whole load.
pub fn companion_pool_from_json(json: &str) -> Result<CompanionPool, ImportError> {
    Ok(serde_json::from_str(json)?)
}

/// Importer for a companion pool file on disk.
pub struct CompanionPoolImporter {
    path: PathBuf,
}

impl CompanionPoolImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn import(&self) -> Result<CompanionPool, ImportError> {
        if !self.path.exists() {
            return Err(ImportError::DataFileNotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        let pool = companion_pool_from_json(&content)?;
        tracing::info!(path = ?self.path, companions = pool.len(), "Companion pool imported");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::{default_companions, Faction};

    const ONE_RECRUIT: &str = r#"{
        "anarchs": [
            {
                "id": "anarch_recruit_1",
                "name": "Alex Chen",
                "clan": "toreador",
                "faction": "anarchs",
                "generation": 12,
                "recruitable": true,
                "loyalty": { "current": 55, "likes": ["freedom"], "dislikes": ["conformity"] }
            },
            { "id": "baron_garcia", "name": "Miguel Garcia", "clan": "gangrel", "faction": "anarchs" }
        ]
    }"#;

    #[test]
    fn parses_a_valid_pool() {
        let pool = companion_pool_from_json(ONE_RECRUIT).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.recruitable_by_faction(Faction::Anarchs).count(), 1);
        let baron = pool.get_by_name("Miguel Garcia").unwrap();
        assert!(!baron.is_recruitable());
        assert_eq!(baron.loyalty().current(), 50);
    }

    #[test]
    fn rejects_out_of_range_loyalty() {
        let json = ONE_RECRUIT.replace("\"current\": 55", "\"current\": 140");
        let err = companion_pool_from_json(&json).unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = ONE_RECRUIT.replace("Miguel Garcia", "Alex Chen");
        assert!(companion_pool_from_json(&json).is_err());
    }

    #[test]
    fn default_pool_survives_a_json_round_trip() {
        let pool = default_companions().unwrap();
        let json = serde_json::to_string(&pool).unwrap();
        assert_eq!(companion_pool_from_json(&json).unwrap(), pool);
    }

    #[test]
    fn importer_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let importer = CompanionPoolImporter::new(dir.path().join("missing.json"));
        assert!(matches!(
            importer.import(),
            Err(ImportError::DataFileNotFound(_))
        ));
    }
}
