use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::challenge::{ChallengeKind, ChallengeTemplate};
use crate::countdown::CountdownState;

/// Every state change in the system produces an Event.
/// Front-ends render these; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    /// The countdown hit zero; the session draws a new challenge in response.
    CountdownExpired {
        at: DateTime<Utc>,
    },
    ChallengeDrawn {
        kind: ChallengeKind,
        description: String,
        amount: u32,
        at: DateTime<Utc>,
    },
    ChallengeCompleted {
        awarded: u32,
        level: u32,
        current_experience: u32,
        challenges_completed: u32,
        leveled_up: bool,
        at: DateTime<Utc>,
    },
    /// The pending challenge was given up without credit.
    ChallengeFailed {
        at: DateTime<Utc>,
    },
    LeveledUp {
        level: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        countdown: CountdownState,
        remaining_secs: u64,
        duration_secs: u64,
        level: u32,
        current_experience: u32,
        experience_to_next_level: u32,
        challenges_completed: u32,
        active_challenge: Option<ChallengeTemplate>,
        level_up_open: bool,
        at: DateTime<Utc>,
    },
}
