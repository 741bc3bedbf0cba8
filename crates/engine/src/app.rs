//! Session composition.
//!
//! `GameSession` is the single entry point a host talks to. It owns the
//! chronicle, the settings, the event bus and every use case, wired to the
//! ports handed in at construction.

use std::sync::Arc;

use nightfall_domain::{
    Chronicle, CompanionId, CompanionPool, CoterieReaction, DomainEvent, FactionContext,
    LoyaltyAdjustment, LoyaltyStatus, NewRun, Phase, RecruitOutcome, SimulationSettings,
};

use crate::error::SessionError;
use crate::infrastructure::{
    clock::{SeededRandom, SystemClock, SystemRandom},
    event_bus::EventBus,
    persistence::InMemorySaveStore,
    ports::{ClockPort, EventSubscriber, RandomPort, SaveStore},
};
use crate::use_cases::{
    coterie::{LoyaltySummary, ManageCoterie},
    persistence::{LoadRun, SaveRun},
    player_action::{ActionOutcome, FeedingGround, PlayerActions},
    time::{AdvanceTurn, NightlyEventEngine, TurnReport},
};

/// Ports injected into a session.
#[derive(Clone)]
pub struct SessionPorts {
    pub random: Arc<dyn RandomPort>,
    pub clock: Arc<dyn ClockPort>,
    pub store: Arc<dyn SaveStore>,
}

impl SessionPorts {
    pub fn new(
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        store: Arc<dyn SaveStore>,
    ) -> Self {
        Self {
            random,
            clock,
            store,
        }
    }

    /// Thread RNG and wall clock.
    pub fn system(store: Arc<dyn SaveStore>) -> Self {
        Self::new(
            Arc::new(SystemRandom::new()),
            Arc::new(SystemClock::new()),
            store,
        )
    }

    /// Reproducible dice for a given seed.
    pub fn seeded(seed: u64, store: Arc<dyn SaveStore>) -> Self {
        Self::new(
            Arc::new(SeededRandom::new(seed)),
            Arc::new(SystemClock::new()),
            store,
        )
    }

    /// Seeded dice and a throwaway in-memory store.
    pub fn in_memory(seed: u64) -> Self {
        Self::seeded(seed, Arc::new(InMemorySaveStore::new()))
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub time: AdvanceTurn,
    pub actions: PlayerActions,
    pub coterie: ManageCoterie,
    pub save: SaveRun,
    pub load: LoadRun,
}

impl UseCases {
    fn new(pool: Arc<CompanionPool>, ports: &SessionPorts) -> Self {
        Self {
            time: AdvanceTurn::new(NightlyEventEngine::new(ports.random.clone())),
            actions: PlayerActions::new(ports.random.clone()),
            coterie: ManageCoterie::new(pool),
            save: SaveRun::new(ports.store.clone(), ports.clock.clone()),
            load: LoadRun::new(ports.store.clone()),
        }
    }
}

/// One running chronicle.
pub struct GameSession {
    run: NewRun,
    settings: SimulationSettings,
    chronicle: Chronicle,
    use_cases: UseCases,
    bus: EventBus,
}

impl GameSession {
    pub fn new(
        run: NewRun,
        settings: SimulationSettings,
        pool: Arc<CompanionPool>,
        ports: SessionPorts,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        let chronicle = Chronicle::new(&run, settings.actions_per_phase)?;
        tracing::info!(
            run_id = %chronicle.id(),
            character = %chronicle.character_name(),
            clan = %chronicle.clan(),
            faction = %chronicle.faction_context().faction(),
            "Chronicle started"
        );

        Ok(Self {
            run,
            settings,
            chronicle,
            use_cases: UseCases::new(pool, &ports),
            bus: EventBus::new(),
        })
    }

    // =========================================================================
    // Turn structure
    // =========================================================================

    pub fn advance_turn(&mut self) -> TurnReport {
        self.use_cases
            .time
            .execute(&mut self.chronicle, &self.settings, &mut self.bus)
    }

    /// Spend one action without any other effect.
    pub fn try_consume_action(&mut self) -> Result<u32, SessionError> {
        let remaining = self.chronicle.consume_action()?;
        tracing::debug!(actions_remaining = remaining, "Action consumed");
        Ok(remaining)
    }

    /// Apply a raw delta to a stat by name. Not action-gated.
    pub fn apply_stat(&mut self, name: &str, delta: i64) -> Result<i64, SessionError> {
        let value = self.chronicle.apply_named_stat(name, delta)?;
        tracing::debug!(stat = name, delta, value, "Stat changed");
        Ok(value)
    }

    // =========================================================================
    // Player commands
    // =========================================================================

    pub fn feed(&mut self) -> Result<ActionOutcome, SessionError> {
        Ok(self.use_cases.actions.feed(&mut self.chronicle, &mut self.bus)?)
    }

    pub fn feed_at(&mut self, ground: FeedingGround) -> Result<ActionOutcome, SessionError> {
        Ok(self
            .use_cases
            .actions
            .feed_at(&mut self.chronicle, ground, &mut self.bus)?)
    }

    pub fn gather_intel(&mut self) -> Result<ActionOutcome, SessionError> {
        Ok(self
            .use_cases
            .actions
            .gather_intel(&mut self.chronicle, &mut self.bus)?)
    }

    pub fn meet_contact(&mut self) -> Result<ActionOutcome, SessionError> {
        Ok(self
            .use_cases
            .actions
            .meet_contact(&mut self.chronicle, &mut self.bus)?)
    }

    pub fn use_influence(&mut self) -> Result<ActionOutcome, SessionError> {
        Ok(self
            .use_cases
            .actions
            .use_influence(&mut self.chronicle, &mut self.bus)?)
    }

    // =========================================================================
    // Coterie
    // =========================================================================

    pub fn recruit_companion(&mut self, id: &str) -> Result<RecruitOutcome, SessionError> {
        let id = CompanionId::new(id)?;
        Ok(self.use_cases.coterie.recruit(
            &mut self.chronicle,
            &self.settings,
            &id,
            &mut self.bus,
        )?)
    }

    /// `false` when nobody by that name is active.
    pub fn release_companion(&mut self, name: &str) -> bool {
        self.use_cases
            .coterie
            .release(&mut self.chronicle, name, &mut self.bus)
    }

    pub fn react_to_action(&mut self, text: &str) -> CoterieReaction {
        self.use_cases
            .coterie
            .react_to_action(&mut self.chronicle, text, &mut self.bus)
    }

    pub fn manual_adjust_loyalty(
        &mut self,
        name: &str,
        delta: i32,
    ) -> Result<LoyaltyAdjustment, SessionError> {
        Ok(self
            .use_cases
            .coterie
            .manual_adjust(&mut self.chronicle, name, delta, &mut self.bus)?)
    }

    /// Remove anyone already at zero loyalty. Publishes nothing.
    pub fn sweep_departures(&mut self) -> Vec<String> {
        self.use_cases.coterie.sweep_departures(&mut self.chronicle)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.chronicle.phase()
    }

    pub fn day(&self) -> u32 {
        self.chronicle.day()
    }

    pub fn actions_remaining(&self) -> u32 {
        self.chronicle.budget().remaining()
    }

    pub fn stat(&self, name: &str) -> Result<i64, SessionError> {
        Ok(self.chronicle.stats().get_named(name)?)
    }

    /// Names of active companions in recruitment order.
    pub fn active_companions(&self) -> Vec<String> {
        self.chronicle
            .roster()
            .active()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn companion_status_label(&self, name: &str) -> Option<LoyaltyStatus> {
        self.use_cases.coterie.status_label(&self.chronicle, name)
    }

    pub fn loyalty_summary(&self) -> Vec<LoyaltySummary> {
        self.use_cases.coterie.loyalty_summary(&self.chronicle)
    }

    pub fn faction_context(&self) -> &FactionContext {
        self.chronicle.faction_context()
    }

    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn companion_pool(&self) -> &CompanionPool {
        self.use_cases.coterie.pool()
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        self.bus.subscribe(subscriber);
        tracing::debug!(
            subscribers = self.bus.subscriber_count(),
            "Event subscriber registered"
        );
    }

    /// Take every event published since the last drain.
    pub fn drain_events(&mut self) -> Vec<DomainEvent> {
        self.bus.drain()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn save(&mut self) -> Result<(), SessionError> {
        self.use_cases.save.execute(&self.chronicle, &mut self.bus)
    }

    /// Replace the live chronicle with the stored one.
    ///
    /// On any error the current chronicle is kept as it was.
    pub fn load(&mut self) -> Result<(), SessionError> {
        let restored = self.use_cases.load.execute()?;
        self.chronicle = restored;
        tracing::info!(
            day = self.chronicle.day(),
            phase = %self.chronicle.phase(),
            "Run loaded"
        );
        self.bus.publish(DomainEvent::RunLoaded {
            day: self.chronicle.day(),
            phase: self.chronicle.phase(),
        });
        Ok(())
    }

    /// Wipe the save and start the same character over from day 1.
    ///
    /// Subscribers stay registered; undelivered outbox events are dropped.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let fresh = Chronicle::new(&self.run, self.settings.actions_per_phase)?;
        self.use_cases.save.clear()?;
        self.chronicle = fresh;
        self.bus.clear_outbox();
        tracing::info!(run_id = %self.chronicle.id(), "Chronicle reset");
        Ok(())
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("chronicle", &self.chronicle)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
