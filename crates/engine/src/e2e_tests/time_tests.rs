//! E2E tests for the phase clock, action budget and nightly events.

use std::sync::Arc;

use nightfall_domain::{
    default_companions, Clan, DomainError, DomainEvent, Faction, NewRun, Phase,
    SimulationSettings, StatKind,
};

use super::E2ETestContext;
use crate::infrastructure::clock::{ScriptedRandom, SeededRandom};
use crate::SessionError;

/// Phase after N advances is phases[N mod 4] and day is 1 + N / 4.
#[test]
fn test_phase_cycle_closure() {
    let mut ctx = E2ETestContext::setup(11);
    let phases = Phase::all();

    for n in 1..=41u32 {
        ctx.session.advance_turn();
        assert_eq!(ctx.session.phase(), phases[(n % 4) as usize], "after {n} advances");
        assert_eq!(ctx.session.day(), 1 + n / 4, "after {n} advances");
    }
}

/// Every advance refills the budget, even a partially spent one.
#[test]
fn test_budget_resets_after_any_advance() {
    let mut ctx = E2ETestContext::quiet();

    for spent in 0..=3 {
        for _ in 0..spent {
            ctx.session.try_consume_action().expect("budget available");
        }
        assert_eq!(ctx.session.actions_remaining(), 3 - spent);
        ctx.session.advance_turn();
        assert_eq!(ctx.session.actions_remaining(), 3);
    }
}

/// An exhausted budget rejects every gated command without touching state.
#[test]
fn test_exhausted_budget_is_a_no_op() {
    let mut ctx = E2ETestContext::quiet();
    ctx.session.apply_stat("bloodPool", -5).expect("known stat");
    for _ in 0..3 {
        ctx.session.try_consume_action().expect("budget available");
    }
    ctx.session.drain_events();
    let before = ctx.session.chronicle().clone();

    let attempts = [
        ctx.session.try_consume_action().map(|_| ()),
        ctx.session.feed().map(|_| ()),
        ctx.session.gather_intel().map(|_| ()),
        ctx.session.meet_contact().map(|_| ()),
        ctx.session.use_influence().map(|_| ()),
    ];

    for attempt in attempts {
        assert!(matches!(
            attempt,
            Err(SessionError::Domain(DomainError::NoActionsRemaining))
        ));
    }
    assert_eq!(ctx.session.chronicle(), &before);
    assert!(ctx.session.drain_events().is_empty());
}

/// Blood decays once at each new night and the event is announced.
#[test]
fn test_night_rollover_decays_blood() {
    let mut ctx = E2ETestContext::quiet();
    for _ in 0..4 {
        ctx.session.advance_turn();
    }

    assert_eq!(ctx.session.day(), 2);
    assert_eq!(ctx.session.stat("bloodPool").expect("known stat"), 9);
    let nights: Vec<_> = ctx
        .session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, DomainEvent::NightBegan { .. }))
        .collect();
    assert_eq!(
        nights,
        vec![DomainEvent::NightBegan {
            day: 2,
            blood_remaining: 9
        }]
    );
}

/// A scripted roll below the probability fires the chosen table entry.
#[test]
fn test_scripted_nightly_event_applies_delta() {
    let mut ctx = E2ETestContext::build(
        NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
        SimulationSettings::default(),
        default_companions().expect("built-in pool is valid"),
        Arc::new(ScriptedRandom::new(vec![0.1], vec![0])),
    );
    let event = SimulationSettings::default()
        .event_table
        .get(0)
        .cloned()
        .expect("default table has entries");
    let before = ctx.session.stat(event.stat.as_str()).expect("known stat");

    for _ in 0..4 {
        ctx.session.advance_turn();
    }

    let mut expected = before + event.delta;
    if event.stat == StatKind::BloodPool {
        expected -= 1;
    }
    let max = ctx.session.chronicle().stats().max(event.stat);
    let expected = match max {
        Some(max) => expected.clamp(0, max),
        None => expected.max(0),
    };
    assert_eq!(ctx.session.stat(event.stat.as_str()).expect("known stat"), expected);
    assert!(ctx
        .recorder
        .events()
        .iter()
        .any(|e| matches!(e, DomainEvent::NightlyEventFired { day: 2, .. })));
}

/// Two sessions with the same seed produce identical nights.
#[test]
fn test_seeded_nightly_determinism() {
    fn play(seed: u64) -> (Vec<DomainEvent>, Vec<i64>) {
        let mut ctx = E2ETestContext::build(
            NewRun::new("Julian Vance", Clan::Toreador, Faction::Camarilla),
            SimulationSettings::default().with_nightly_event_probability(0.9),
            default_companions().expect("built-in pool is valid"),
            Arc::new(SeededRandom::new(seed)),
        );
        for turn in 0..60 {
            if turn % 4 == 0 {
                let _ = ctx.session.meet_contact();
            }
            ctx.session.advance_turn();
        }
        let stats = StatKind::all()
            .iter()
            .map(|kind| ctx.session.chronicle().stats().get(*kind))
            .collect();
        (ctx.session.drain_events(), stats)
    }

    let (events_a, stats_a) = play(2024);
    let (events_b, stats_b) = play(2024);
    assert_eq!(events_a, events_b);
    assert_eq!(stats_a, stats_b);
    assert!(events_a
        .iter()
        .any(|e| matches!(e, DomainEvent::NightlyEventFired { .. })));
}
