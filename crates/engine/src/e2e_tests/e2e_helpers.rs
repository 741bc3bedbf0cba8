//! Shared setup for the end-to-end tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use nightfall_domain::{
    default_companions, Clan, Companion, CompanionId, CompanionPool, Faction, Loyalty, NewRun,
    SimulationSettings,
};

use crate::app::{GameSession, SessionPorts};
use crate::infrastructure::clock::{FixedClock, ScriptedRandom, SeededRandom};
use crate::infrastructure::event_bus::RecordingEventSubscriber;
use crate::infrastructure::persistence::InMemorySaveStore;
use crate::infrastructure::ports::RandomPort;

/// A composed session plus handles on its test doubles.
pub struct E2ETestContext {
    pub session: GameSession,
    pub store: Arc<InMemorySaveStore>,
    pub recorder: Arc<RecordingEventSubscriber>,
}

impl E2ETestContext {
    /// Camarilla Toreador with the built-in companion cast and seeded dice.
    pub fn setup(seed: u64) -> Self {
        Self::build(
            NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
            SimulationSettings::default(),
            default_companions().expect("built-in pool is valid"),
            Arc::new(SeededRandom::new(seed)),
        )
    }

    /// Dice that never fire nightly events or humanity losses.
    pub fn quiet() -> Self {
        Self::build(
            NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
            SimulationSettings::default(),
            default_companions().expect("built-in pool is valid"),
            Arc::new(ScriptedRandom::quiet()),
        )
    }

    /// Session over a custom companion pool.
    pub fn with_pool(pool: CompanionPool) -> Self {
        Self::build(
            NewRun::new("Julian Vance", Clan::Brujah, Faction::Anarchs),
            SimulationSettings::default(),
            pool,
            Arc::new(ScriptedRandom::quiet()),
        )
    }

    /// A second session over this context's save store, as a new process
    /// would start one.
    pub fn reopen(&self) -> GameSession {
        let ports = SessionPorts::new(
            Arc::new(ScriptedRandom::quiet()),
            Arc::new(FixedClock(chrono::Utc::now())),
            self.store.clone(),
        );
        GameSession::new(
            NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
            SimulationSettings::default(),
            Arc::new(default_companions().expect("built-in pool is valid")),
            ports,
        )
        .expect("session should build")
    }

    pub fn build(
        run: NewRun,
        settings: SimulationSettings,
        pool: CompanionPool,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let store = Arc::new(InMemorySaveStore::new());
        let ports = SessionPorts::new(random, Arc::new(FixedClock(chrono::Utc::now())), store.clone());
        let mut session =
            GameSession::new(run, settings, Arc::new(pool), ports).expect("session should build");
        let recorder = Arc::new(RecordingEventSubscriber::new());
        session.subscribe(recorder.clone());
        Self {
            session,
            store,
            recorder,
        }
    }
}

/// A single-companion anarch pool.
pub fn pool_with(
    slug: &str,
    name: &str,
    loyalty: i32,
    likes: &[&str],
    dislikes: &[&str],
) -> CompanionPool {
    let loyalty = Loyalty::new(loyalty)
        .expect("loyalty in range")
        .with_likes(likes.iter().copied())
        .with_dislikes(dislikes.iter().copied());
    let companion = Companion::new(
        CompanionId::new(slug).expect("valid slug"),
        name,
        Clan::Brujah,
        Faction::Anarchs,
    )
    .expect("valid companion")
    .recruitable_with(loyalty);

    let mut by_faction = BTreeMap::new();
    by_faction.insert(Faction::Anarchs, vec![companion]);
    CompanionPool::new(by_faction).expect("valid pool")
}
