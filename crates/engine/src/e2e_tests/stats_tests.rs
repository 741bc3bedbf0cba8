//! E2E tests for the resource pool and player commands.

use std::sync::Arc;

use nightfall_domain::{
    default_companions, Clan, DomainError, DomainEvent, Faction, NewRun, SimulationSettings,
    StatKind,
};

use super::E2ETestContext;
use crate::infrastructure::clock::ScriptedRandom;
use crate::use_cases::{FeedingGround, PlayerAction};
use crate::SessionError;

/// Blood (10,10) with -1 twenty times ends at (0,10).
#[test]
fn test_bounded_stat_clamps_at_zero() {
    let mut ctx = E2ETestContext::quiet();
    for _ in 0..20 {
        ctx.session.apply_stat("bloodPool", -1).expect("known stat");
    }
    let blood = ctx.session.chronicle().stats().blood_pool();
    assert_eq!((blood.current(), blood.max()), (0, 10));

    ctx.session.apply_stat("blood", 25).expect("known stat");
    assert_eq!(ctx.session.stat("bloodPool").expect("known stat"), 10);
}

/// Resources 500 with -1000 floors at 0.
#[test]
fn test_unbounded_stat_floors_at_zero() {
    let mut ctx = E2ETestContext::quiet();
    let start = ctx.session.stat("resources").expect("known stat");
    assert_eq!(start, 28_000 + 25_000);

    ctx.session
        .apply_stat("resources", 500 - start)
        .expect("known stat");
    assert_eq!(ctx.session.stat("resources").expect("known stat"), 500);

    let value = ctx.session.apply_stat("resources", -1000).expect("known stat");
    assert_eq!(value, 0);
}

/// Unknown stat names are rejected for both reads and writes.
#[test]
fn test_unknown_stat_name() {
    let mut ctx = E2ETestContext::quiet();
    assert!(matches!(
        ctx.session.stat("celerity"),
        Err(SessionError::Domain(DomainError::UnknownStat(_)))
    ));
    assert!(matches!(
        ctx.session.apply_stat("celerity", 1),
        Err(SessionError::Domain(DomainError::UnknownStat(_)))
    ));
}

/// A failed precondition spends nothing.
#[test]
fn test_feed_with_full_blood_keeps_budget() {
    let mut ctx = E2ETestContext::quiet();
    let result = ctx.session.feed();
    assert!(matches!(
        result,
        Err(SessionError::Domain(DomainError::PreconditionFailed(_)))
    ));
    assert_eq!(ctx.session.actions_remaining(), 3);
}

/// Feeding restores blood and the scripted roll costs humanity.
#[test]
fn test_feed_with_humanity_loss() {
    let mut ctx = E2ETestContext::build(
        NewRun::new("Julian Vance", Clan::Brujah, Faction::Anarchs),
        SimulationSettings::default(),
        default_companions().expect("built-in pool is valid"),
        Arc::new(ScriptedRandom::new(vec![0.05], Vec::new())),
    );
    ctx.session.apply_stat("bloodPool", -6).expect("known stat");

    let outcome = ctx.session.feed().expect("feed succeeds");

    assert_eq!(outcome.action, PlayerAction::Feed);
    assert_eq!(outcome.net(StatKind::BloodPool), 3);
    assert_eq!(outcome.net(StatKind::Humanity), -1);
    assert_eq!(ctx.session.stat("bloodPool").expect("known stat"), 7);
    assert_eq!(ctx.session.stat("humanity").expect("known stat"), 6);
    assert_eq!(ctx.session.actions_remaining(), 2);
}

/// Ventrue must choose a feeding ground.
#[test]
fn test_ventrue_feeding_restriction() {
    let mut ctx = E2ETestContext::build(
        NewRun::new("Lord Ashby", Clan::Ventrue, Faction::Camarilla),
        SimulationSettings::default(),
        default_companions().expect("built-in pool is valid"),
        Arc::new(ScriptedRandom::quiet()),
    );
    ctx.session.apply_stat("bloodPool", -8).expect("known stat");

    assert!(matches!(
        ctx.session.feed(),
        Err(SessionError::Domain(DomainError::FeedingRestricted(_)))
    ));
    assert_eq!(ctx.session.actions_remaining(), 3);

    let outcome = ctx
        .session
        .feed_at(FeedingGround::EliteClub)
        .expect("elite club feeding succeeds");
    assert_eq!(outcome.net(StatKind::BloodPool), 4);
    assert_eq!(ctx.session.stat("bloodPool").expect("known stat"), 6);
    assert_eq!(ctx.session.stat("resources").expect("known stat"), 60_000);
}

/// Intel trades money for a contact; influence nets to zero.
#[test]
fn test_intel_and_influence() {
    let mut ctx = E2ETestContext::quiet();
    let resources = ctx.session.stat("resources").expect("known stat");
    let contacts = ctx.session.stat("contacts").expect("known stat");

    ctx.session.gather_intel().expect("enough money");
    assert_eq!(
        ctx.session.stat("resources").expect("known stat"),
        resources - 1000
    );
    assert_eq!(
        ctx.session.stat("contacts").expect("known stat"),
        contacts + 1
    );

    let outcome = ctx.session.use_influence().expect("influence available");
    assert_eq!(outcome.changes.len(), 2);
    assert_eq!(outcome.net(StatKind::Influence), 0);
    assert_eq!(ctx.session.stat("influence").expect("known stat"), 3);
    assert_eq!(ctx.session.actions_remaining(), 1);
}

/// Meeting a contact picks the favour from the index roll.
#[test]
fn test_meet_contact_uses_index_roll() {
    let mut ctx = E2ETestContext::build(
        NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
        SimulationSettings::default(),
        default_companions().expect("built-in pool is valid"),
        Arc::new(ScriptedRandom::new(Vec::new(), vec![1])),
    );
    let before = ctx.session.stat("resources").expect("known stat");
    let outcome = ctx.session.meet_contact().expect("has contacts");

    assert_eq!(outcome.net(StatKind::Resources), 2000);
    assert_eq!(
        ctx.session.stat("resources").expect("known stat"),
        before + 2000
    );
    assert!(ctx.recorder.events().iter().any(|e| matches!(
        e,
        DomainEvent::PlayerActionResolved { actions_remaining: 2, .. }
    )));
}

/// Contacts at zero block the meeting.
#[test]
fn test_meet_contact_requires_contacts() {
    let mut ctx = E2ETestContext::quiet();
    let contacts = ctx.session.stat("contacts").expect("known stat");
    ctx.session.apply_stat("contacts", -contacts).expect("known stat");

    assert!(matches!(
        ctx.session.meet_contact(),
        Err(SessionError::Domain(DomainError::PreconditionFailed(_)))
    ));
    assert_eq!(ctx.session.actions_remaining(), 3);
}
