//! Player action use cases.
//!
//! Every command here is action-gated: the budget is checked first, then the
//! command's own precondition, and only when both hold is an action spent and
//! the stats touched. A rejected command changes nothing.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use nightfall_domain::{Chronicle, DomainError, DomainEvent, StatKind};

use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::ports::RandomPort;

// =============================================================================
// Tuning
// =============================================================================

const FEED_BLOOD_GAIN: i64 = 3;
const FEED_HUMANITY_RISK: f64 = 0.2;
const INTEL_COST: i64 = 1_000;
const CONTACT_RESOURCE_GAIN: i64 = 2_000;

/// Where a blue-blooded vampire may hunt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingGround {
    EliteClub,
    UpscaleVenue,
}

impl FeedingGround {
    pub fn blood_gain(&self) -> i64 {
        match self {
            FeedingGround::EliteClub => 4,
            FeedingGround::UpscaleVenue => 3,
        }
    }

    pub fn humanity_risk(&self) -> f64 {
        match self {
            FeedingGround::EliteClub => 0.1,
            FeedingGround::UpscaleVenue => 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ground")]
pub enum PlayerAction {
    Feed,
    FeedAt(FeedingGround),
    GatherIntel,
    MeetContact,
    UseInfluence,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Feed => "feed",
            PlayerAction::FeedAt(FeedingGround::EliteClub) => "feed_elite",
            PlayerAction::FeedAt(FeedingGround::UpscaleVenue) => "feed_upscale",
            PlayerAction::GatherIntel => "gather_intel",
            PlayerAction::MeetContact => "meet_contact",
            PlayerAction::UseInfluence => "use_influence",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stat mutation performed by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    pub stat: StatKind,
    /// Requested delta, before clamping
    pub delta: i64,
    /// Value after the clamped mutation
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub action: PlayerAction,
    pub changes: Vec<StatChange>,
    pub actions_remaining: u32,
    pub summary: String,
}

impl ActionOutcome {
    /// Net requested delta on `stat` across all changes.
    pub fn net(&self, stat: StatKind) -> i64 {
        self.changes
            .iter()
            .filter(|c| c.stat == stat)
            .map(|c| c.delta)
            .sum()
    }
}

/// Use case for the resource-affecting player commands.
pub struct PlayerActions {
    random: Arc<dyn RandomPort>,
}

impl PlayerActions {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Hunt for blood. Blue-blooded clans must pick a feeding ground instead.
    pub fn feed(
        &self,
        chronicle: &mut Chronicle,
        bus: &mut EventBus,
    ) -> Result<ActionOutcome, DomainError> {
        chronicle.ensure_action_available()?;
        if chronicle.clan().has_blue_blood() {
            return Err(DomainError::FeedingRestricted(format!(
                "{} may only feed from mortals of good breeding; choose a feeding ground",
                chronicle.clan()
            )));
        }
        let blood = chronicle.stats().blood_pool();
        if blood.is_full() {
            return Err(DomainError::precondition(
                "Your blood pool is full. You have no need to feed right now.",
            ));
        }

        let mut run = ActionRun::start(chronicle, PlayerAction::Feed)?;
        run.apply(StatKind::BloodPool, FEED_BLOOD_GAIN);
        if self.random.chance(FEED_HUMANITY_RISK) {
            run.apply(StatKind::Humanity, -1);
        }
        Ok(run.finish(bus, "You have fed, restoring your vitae. The Beast is sated... for now."))
    }

    /// Hunt at a chosen feeding ground.
    pub fn feed_at(
        &self,
        chronicle: &mut Chronicle,
        ground: FeedingGround,
        bus: &mut EventBus,
    ) -> Result<ActionOutcome, DomainError> {
        let mut run = ActionRun::start(chronicle, PlayerAction::FeedAt(ground))?;
        run.apply(StatKind::BloodPool, ground.blood_gain());
        if self.random.chance(ground.humanity_risk()) {
            run.apply(StatKind::Humanity, -1);
        }
        let summary = match ground {
            FeedingGround::EliteClub => "You feed from the social elite at an exclusive club.",
            FeedingGround::UpscaleVenue => {
                "You feed from well-bred mortals at an upscale establishment."
            }
        };
        Ok(run.finish(bus, summary))
    }

    /// Pay informants for a new contact.
    pub fn gather_intel(
        &self,
        chronicle: &mut Chronicle,
        bus: &mut EventBus,
    ) -> Result<ActionOutcome, DomainError> {
        chronicle.ensure_action_available()?;
        if chronicle.stats().get(StatKind::Resources) < INTEL_COST {
            return Err(DomainError::precondition(
                "You need at least $1,000 to gather intelligence.",
            ));
        }

        let mut run = ActionRun::start(chronicle, PlayerAction::GatherIntel)?;
        run.apply(StatKind::Resources, -INTEL_COST);
        run.apply(StatKind::Contacts, 1);
        Ok(run.finish(bus, "Your informants have provided valuable information. New contact acquired."))
    }

    /// Meet a contact for one of three uniformly chosen favours.
    pub fn meet_contact(
        &self,
        chronicle: &mut Chronicle,
        bus: &mut EventBus,
    ) -> Result<ActionOutcome, DomainError> {
        chronicle.ensure_action_available()?;
        if chronicle.stats().get(StatKind::Contacts) < 1 {
            return Err(DomainError::precondition(
                "You have no contacts available to meet with.",
            ));
        }

        const FAVOURS: [(StatKind, i64, &str); 3] = [
            (StatKind::Influence, 1, "Your contact provides valuable assistance."),
            (
                StatKind::Resources,
                CONTACT_RESOURCE_GAIN,
                "Your contact offers a lucrative opportunity.",
            ),
            (StatKind::Humanity, 1, "Your contact reminds you of your mortal past."),
        ];
        let index = self.random.gen_index(FAVOURS.len()).min(FAVOURS.len() - 1);
        let (stat, delta, summary) = FAVOURS[index];

        let mut run = ActionRun::start(chronicle, PlayerAction::MeetContact)?;
        run.apply(stat, delta);
        Ok(run.finish(bus, summary))
    }

    /// Spend a point of influence to extend control over a domain.
    ///
    /// The point is spent and immediately regained, so the stat ends where it
    /// started; both halves are recorded.
    pub fn use_influence(
        &self,
        chronicle: &mut Chronicle,
        bus: &mut EventBus,
    ) -> Result<ActionOutcome, DomainError> {
        chronicle.ensure_action_available()?;
        if chronicle.stats().get(StatKind::Influence) < 1 {
            return Err(DomainError::precondition(
                "You need more influence to take this action.",
            ));
        }

        let mut run = ActionRun::start(chronicle, PlayerAction::UseInfluence)?;
        run.apply(StatKind::Influence, -1);
        run.apply(StatKind::Influence, 1);
        Ok(run.finish(bus, "You've expanded your control over the city's operations."))
    }
}

/// An action that has already spent its budget slot.
struct ActionRun<'a> {
    chronicle: &'a mut Chronicle,
    action: PlayerAction,
    changes: Vec<StatChange>,
    actions_remaining: u32,
}

impl<'a> ActionRun<'a> {
    fn start(chronicle: &'a mut Chronicle, action: PlayerAction) -> Result<Self, DomainError> {
        let actions_remaining = chronicle.consume_action()?;
        tracing::debug!(action = %action, actions_remaining, "Action consumed");
        Ok(Self {
            chronicle,
            action,
            changes: Vec::new(),
            actions_remaining,
        })
    }

    fn apply(&mut self, stat: StatKind, delta: i64) {
        let value = self.chronicle.apply_stat(stat, delta);
        tracing::debug!(stat = %stat, delta, value, "Stat changed");
        self.changes.push(StatChange { stat, delta, value });
    }

    fn finish(self, bus: &mut EventBus, summary: &str) -> ActionOutcome {
        bus.publish(DomainEvent::PlayerActionResolved {
            action: self.action.as_str().to_string(),
            summary: summary.to_string(),
            actions_remaining: self.actions_remaining,
        });
        ActionOutcome {
            action: self.action,
            changes: self.changes,
            actions_remaining: self.actions_remaining,
            summary: summary.to_string(),
        }
    }
}
