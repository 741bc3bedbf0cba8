//! Nightfall - headless runner.
//!
//! Plays a seeded chronicle for a fixed number of turns, logs every event
//! and writes the final state to a save file.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nightfall_domain::{default_companions, Clan, DomainError, Phase, SimulationSettings};
use nightfall_engine::{
    infrastructure::{
        content_sources::CompanionPoolImporter, event_bus::TracingEventSubscriber,
        persistence::JsonFileSaveStore, settings::RunnerSettings,
    },
    use_cases::FeedingGround,
    GameSession, SessionError, SessionPorts,
};

/// What the character spends each night doing; companions react to it.
const NIGHTLY_DEEDS: [&str; 5] = [
    "seeking justice for the downtrodden while upholding tradition",
    "spreading chaos and rebellion through the old order's domain",
    "a night of art and beauty at the elysium, showing respect to the elders",
    "hunting with the pack and testing our strength",
    "lying to an ally and betraying a trust for power",
];

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nightfall_engine=info,nightfall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let runner = RunnerSettings::from_env()?;
    let settings = SimulationSettings::from_env();
    tracing::info!(
        seed = runner.seed,
        faction = %runner.faction,
        clan = %runner.clan,
        turns = runner.turns,
        "Starting Nightfall"
    );

    let pool = match &runner.companions_path {
        Some(path) => CompanionPoolImporter::new(path).import()?,
        None => default_companions()?,
    };

    let store = Arc::new(JsonFileSaveStore::new(&runner.save_path));
    let mut session = GameSession::new(
        runner.new_run(),
        settings,
        Arc::new(pool),
        SessionPorts::seeded(runner.seed, store),
    )?;
    session.subscribe(Arc::new(TracingEventSubscriber));

    recruit_faction(&mut session, &runner)?;

    for _ in 0..runner.turns {
        if session.phase() == Phase::Dusk {
            hunt(&mut session, runner.clan);
        }
        let report = session.advance_turn();
        if report.nightly.is_some() {
            let deed = NIGHTLY_DEEDS[session.day() as usize % NIGHTLY_DEEDS.len()];
            let reaction = session.react_to_action(deed);
            tracing::info!(
                day = session.day(),
                deed,
                reactions = reaction.reactions.len(),
                departed = reaction.departed.len(),
                "Coterie reacted to the night's deeds"
            );
        }
        session.drain_events();
    }

    for row in session.loyalty_summary() {
        tracing::info!(
            companion = %row.name,
            clan = %row.clan,
            loyalty = row.loyalty,
            status = %row.status,
            "Coterie standing"
        );
    }

    session.save()?;
    tracing::info!(
        day = session.day(),
        phase = %session.phase(),
        path = %runner.save_path.display(),
        "Chronicle saved"
    );
    Ok(())
}

fn recruit_faction(session: &mut GameSession, runner: &RunnerSettings) -> Result<(), SessionError> {
    let ids: Vec<String> = session
        .companion_pool()
        .recruitable_by_faction(runner.faction)
        .map(|c| c.id().as_str().to_string())
        .collect();
    for id in ids {
        session.recruit_companion(&id)?;
    }
    Ok(())
}

/// Feed if there is room for blood, otherwise work the contacts.
fn hunt(session: &mut GameSession, clan: Clan) {
    let result = if clan.has_blue_blood() {
        session.feed_at(FeedingGround::EliteClub)
    } else {
        session.feed()
    };
    let result = match result {
        Err(SessionError::Domain(DomainError::PreconditionFailed(_))) => session.gather_intel(),
        other => other,
    };
    match result {
        Ok(outcome) => tracing::debug!(action = %outcome.action, "{}", outcome.summary),
        Err(e) => tracing::debug!(error = %e, "Nothing to do at dusk"),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
