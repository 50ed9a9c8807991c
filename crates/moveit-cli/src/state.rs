//! View-layer state carried between CLI invocations.
//!
//! The countdown engine, the pending challenge, and the level-up banner are
//! CLI session state, persisted as JSON under the data directory. The
//! progression trio itself lives only in the cookie jar.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use moveit_core::storage::data_dir;
use moveit_core::{
    Catalog, ChallengeTemplate, Config, CountdownEngine, DesktopChime, DesktopNotifier, Event,
    FileCookieJar, Session,
};

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    countdown: CountdownEngine,
    active_challenge: Option<ChallengeTemplate>,
    #[serde(default)]
    level_up_open: bool,
    /// Wall-clock instant the countdown state was last advanced.
    last_tick: DateTime<Utc>,
}

pub struct LoadedSession {
    pub session: Session,
    /// Events produced while catching up elapsed wall-clock seconds.
    pub catchup_events: Vec<Event>,
}

pub fn file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("session.json"))
}

pub fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    match &config.catalog.path {
        Some(path) => Ok(Catalog::from_path(std::path::Path::new(path))?),
        None => Ok(Catalog::builtin()),
    }
}

/// Assemble a session from config, cookies, and the persisted view-layer
/// state, then replay the seconds that passed since the last invocation.
pub fn load(config: &Config) -> Result<LoadedSession, Box<dyn std::error::Error>> {
    let catalog = load_catalog(config)?;
    let cookies = FileCookieJar::open_default()?;
    let notifier = DesktopNotifier::from_config(&config.notifications);
    let chime = DesktopChime::from_config(&config.notifications);
    let mut session = Session::new(
        catalog,
        config.cycle.duration_secs,
        Box::new(cookies),
        Box::new(notifier),
        Box::new(chime),
    );

    let mut catchup_events = Vec::new();
    if let Ok(json) = std::fs::read_to_string(file_path()?) {
        if let Ok(saved) = serde_json::from_str::<SessionFile>(&json) {
            // A saved engine with a stale duration would resurrect the old
            // cycle length on every reset; drop it and keep the fresh one.
            let countdown = if saved.countdown.duration_secs() == config.cycle.duration_secs {
                saved.countdown
            } else {
                CountdownEngine::new(config.cycle.duration_secs)
            };
            session.restore(countdown, saved.active_challenge, saved.level_up_open);
            catchup_events = catch_up(&mut session, saved.last_tick);
        }
    }

    Ok(LoadedSession {
        session,
        catchup_events,
    })
}

/// Persist the view-layer state for the next invocation.
pub fn save(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let file = SessionFile {
        countdown: session.countdown().clone(),
        active_challenge: session.progression().active_challenge().cloned(),
        level_up_open: session.progression().level_up_open(),
        last_tick: Utc::now(),
    };
    std::fs::write(file_path()?, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

/// Apply one logical tick per whole elapsed second, capped at the remaining
/// count. Ticks outside the running state are no-ops, so an idle session
/// loses nothing.
fn catch_up(session: &mut Session, last_tick: DateTime<Utc>) -> Vec<Event> {
    let elapsed = (Utc::now() - last_tick).num_seconds().max(0) as u64;
    let ticks = elapsed.min(session.countdown().remaining_secs());
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(session.tick());
    }
    events
}
