//! In-memory save store for tests and hosts that persist elsewhere.

use std::sync::Mutex;

use crate::infrastructure::ports::{RepoError, SaveStore, SavePayload};

#[derive(Debug, Default)]
pub struct InMemorySaveStore {
    slot: Mutex<Option<String>>,
}

impl InMemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON currently stored, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Replace the stored JSON verbatim, bypassing serialization.
    pub fn put_raw(&self, json: impl Into<String>) {
        *self.lock() = Some(json.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SaveStore for InMemorySaveStore {
    fn save(&self, payload: &SavePayload) -> Result<(), RepoError> {
        let json = serde_json::to_string(payload).map_err(RepoError::serialization)?;
        *self.lock() = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<SavePayload>, RepoError> {
        match self.lock().as_deref() {
            None => Ok(None),
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(RepoError::serialization),
        }
    }

    fn clear(&self) -> Result<(), RepoError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::ports::{SavedStat, SavedStats, SAVE_FORMAT_VERSION};
    use chrono::TimeZone;
    use nightfall_domain::{Clan, Faction, FactionContext};

    pub(crate) fn sample_payload() -> SavePayload {
        SavePayload {
            version: SAVE_FORMAT_VERSION,
            run_id: uuid::Uuid::nil(),
            saved_at: chrono::Utc.with_ymd_and_hms(2024, 10, 31, 23, 0, 0).unwrap(),
            character_name: "Julian".to_string(),
            clan: Clan::Toreador,
            day: 2,
            phase_index: 1,
            actions_remaining: 2,
            actions_per_phase: 3,
            stats: SavedStats {
                blood_pool: SavedStat { current: 8, max: 10 },
                humanity: SavedStat { current: 7, max: 10 },
                influence: SavedStat { current: 3, max: 10 },
                resources: 53_000,
                contacts: 7,
            },
            companions: Vec::new(),
            former_companions: Vec::new(),
            departed: Vec::new(),
            faction_context: FactionContext::for_faction(Faction::Camarilla),
        }
    }

    #[test]
    fn round_trips_through_json() {
        let store = InMemorySaveStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample_payload()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_payload()));
        store.clear().unwrap();
        assert!(store.raw().is_none());
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let store = InMemorySaveStore::new();
        store.put_raw("[1, 2, 3]");
        assert!(matches!(store.load(), Err(RepoError::Serialization(_))));
    }
}
