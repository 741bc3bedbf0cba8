//! Persistence use cases.
//!
//! Converts a `Chronicle` to and from the flat `SavePayload`. Restoring is
//! all-or-nothing: the caller only swaps in the restored chronicle once every
//! field has been validated, so a rejected load leaves the live run alone.

use std::sync::Arc;

use nightfall_domain::{
    ActionBudget, BoundedStat, Chronicle, CompanionRoster, DomainError, DomainEvent, PhaseClock,
    ResourcePool, RunId, UnboundedStat,
};

use crate::error::SessionError;
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::ports::{
    ClockPort, RepoError, SavePayload, SaveStore, SavedStat, SavedStats, SAVE_FORMAT_VERSION,
};

// =============================================================================
// Conversion
// =============================================================================

/// Capture every field of `chronicle`.
pub fn snapshot(chronicle: &Chronicle, saved_at: chrono::DateTime<chrono::Utc>) -> SavePayload {
    let stats = chronicle.stats();
    let saved = |stat: BoundedStat| SavedStat {
        current: stat.current(),
        max: stat.max(),
    };
    SavePayload {
        version: SAVE_FORMAT_VERSION,
        run_id: *chronicle.id().as_uuid(),
        saved_at,
        character_name: chronicle.character_name().to_string(),
        clan: chronicle.clan(),
        day: chronicle.day(),
        phase_index: chronicle.phase().index(),
        actions_remaining: chronicle.budget().remaining(),
        actions_per_phase: chronicle.budget().max(),
        stats: SavedStats {
            blood_pool: saved(stats.blood_pool()),
            humanity: saved(stats.humanity()),
            influence: saved(stats.influence()),
            resources: stats.resources().value(),
            contacts: stats.contacts().value(),
        },
        companions: chronicle.roster().active().to_vec(),
        former_companions: chronicle.roster().former().to_vec(),
        departed: chronicle.roster().departed().to_vec(),
        faction_context: chronicle.faction_context().clone(),
    }
}

/// Rebuild a chronicle, rejecting anything out of range as `MalformedSavePayload`.
pub fn restore(payload: SavePayload) -> Result<Chronicle, DomainError> {
    if payload.version != SAVE_FORMAT_VERSION {
        return Err(DomainError::malformed_save(format!(
            "unsupported save version {} (expected {})",
            payload.version, SAVE_FORMAT_VERSION
        )));
    }
    if payload.character_name.trim().is_empty() {
        return Err(DomainError::malformed_save("character name is empty"));
    }

    let clock = PhaseClock::from_storage(payload.day, payload.phase_index)?;
    let budget = ActionBudget::from_storage(payload.actions_remaining, payload.actions_per_phase)?;
    let stats = restore_stats(&payload.stats)?;
    let roster = CompanionRoster::from_storage(
        payload.companions,
        payload.former_companions,
        payload.departed,
    )?;

    Ok(Chronicle::from_storage(
        RunId::from_uuid(payload.run_id),
        payload.character_name,
        payload.clan,
        payload.faction_context,
        clock,
        budget,
        stats,
        roster,
    ))
}

fn restore_stats(saved: &SavedStats) -> Result<ResourcePool, DomainError> {
    let bounded = |name: &str, stat: SavedStat| {
        BoundedStat::new(stat.current, stat.max)
            .map_err(|e| DomainError::malformed_save(format!("{}: {}", name, e)))
    };
    let unbounded = |name: &str, value: i64| {
        UnboundedStat::new(value).map_err(|e| DomainError::malformed_save(format!("{}: {}", name, e)))
    };
    Ok(ResourcePool::new(
        bounded("bloodPool", saved.blood_pool)?,
        bounded("humanity", saved.humanity)?,
        bounded("influence", saved.influence)?,
        unbounded("resources", saved.resources)?,
        unbounded("contacts", saved.contacts)?,
    ))
}

// =============================================================================
// Use cases
// =============================================================================

/// Use case for writing the current run to the save store.
pub struct SaveRun {
    store: Arc<dyn SaveStore>,
    clock: Arc<dyn ClockPort>,
}

impl SaveRun {
    pub fn new(store: Arc<dyn SaveStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub fn execute(&self, chronicle: &Chronicle, bus: &mut EventBus) -> Result<(), SessionError> {
        let payload = snapshot(chronicle, self.clock.now());
        self.store.save(&payload)?;
        tracing::info!(day = payload.day, phase = %chronicle.phase(), "Run saved");
        bus.publish(DomainEvent::RunSaved {
            day: chronicle.day(),
            phase: chronicle.phase(),
        });
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        Ok(())
    }
}

/// Use case for reading a run back from the save store.
pub struct LoadRun {
    store: Arc<dyn SaveStore>,
}

impl LoadRun {
    pub fn new(store: Arc<dyn SaveStore>) -> Self {
        Self { store }
    }

    /// Read and validate the stored run without touching any live state.
    pub fn execute(&self) -> Result<Chronicle, SessionError> {
        let payload = match self.store.load() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Err(RepoError::not_found("SavePayload", "current").into()),
            Err(RepoError::Serialization(message)) => {
                tracing::warn!(error = %message, "Rejected unreadable save payload");
                return Err(DomainError::malformed_save(message).into());
            }
            Err(e) => return Err(e.into()),
        };

        restore(payload).map_err(|e| {
            tracing::warn!(error = %e, "Rejected malformed save payload");
            SessionError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::persistence::InMemorySaveStore;
    use crate::infrastructure::ports::MockSaveStore;
    use chrono::TimeZone;
    use nightfall_domain::{
        default_companions, Clan, CompanionId, Faction, NewRun, RehirePolicy, StatKind,
    };

    fn chronicle() -> Chronicle {
        let mut chronicle =
            Chronicle::new(&NewRun::new("Julian", Clan::Toreador, Faction::Camarilla), 3).unwrap();
        let pool = default_companions().unwrap();
        let sarah = pool
            .get(&CompanionId::new("camarilla_recruit").unwrap())
            .unwrap();
        chronicle
            .roster_mut()
            .recruit(sarah, RehirePolicy::AsTheyLeft)
            .unwrap();
        chronicle.advance_phase();
        chronicle.consume_action().unwrap();
        chronicle.apply_stat(StatKind::BloodPool, -4);
        chronicle
    }

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2024, 10, 31, 23, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn snapshot_then_restore_is_identity() {
        let original = chronicle();
        let restored = restore(snapshot(&original, chrono::Utc::now())).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn restore_rejects_out_of_range_stat() {
        let mut payload = snapshot(&chronicle(), chrono::Utc::now());
        payload.stats.humanity = SavedStat { current: 11, max: 10 };
        assert!(matches!(
            restore(payload),
            Err(DomainError::MalformedSavePayload(_))
        ));
    }

    #[test]
    fn restore_rejects_budget_overflow_and_bad_phase() {
        let mut payload = snapshot(&chronicle(), chrono::Utc::now());
        payload.actions_remaining = 9;
        assert!(restore(payload).is_err());

        let mut payload = snapshot(&chronicle(), chrono::Utc::now());
        payload.phase_index = 7;
        assert!(restore(payload).is_err());

        let mut payload = snapshot(&chronicle(), chrono::Utc::now());
        payload.version = 99;
        assert!(restore(payload).is_err());
    }

    #[test]
    fn save_then_load_through_store() {
        let store = Arc::new(InMemorySaveStore::new());
        let save = SaveRun::new(store.clone(), fixed_clock());
        let load = LoadRun::new(store.clone());
        let original = chronicle();
        let mut bus = EventBus::new();

        save.execute(&original, &mut bus).unwrap();
        assert_eq!(load.execute().unwrap(), original);
        assert_eq!(bus.drain().len(), 1);
    }

    #[test]
    fn load_without_save_is_not_found() {
        let load = LoadRun::new(Arc::new(InMemorySaveStore::new()));
        assert!(matches!(
            load.execute(),
            Err(SessionError::Repo(RepoError::NotFound { .. }))
        ));
    }

    #[test]
    fn unreadable_payload_is_malformed() {
        let mut store = MockSaveStore::new();
        store
            .expect_load()
            .returning(|| Err(RepoError::serialization("expected value at line 1")));
        let load = LoadRun::new(Arc::new(store));
        assert!(load.execute().unwrap_err().is_malformed_save());
    }

    #[test]
    fn failed_save_publishes_nothing() {
        let mut store = MockSaveStore::new();
        store
            .expect_save()
            .returning(|_| Err(RepoError::io("write_save", "disk full")));
        let save = SaveRun::new(Arc::new(store), fixed_clock());
        let mut bus = EventBus::new();
        assert!(save.execute(&chronicle(), &mut bus).is_err());
        assert_eq!(bus.pending(), 0);
    }
}
