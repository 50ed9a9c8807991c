//! Challenge progression state machine.
//!
//! Owns the XP/level economy and the single active-challenge slot. Every
//! operation is total over in-memory state; persistence and side channels
//! live behind the session's ports.

use rand::Rng;

use super::{Catalog, ChallengeTemplate};

/// Result of a successful challenge completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// XP awarded by the completed challenge.
    pub awarded: u32,
    /// Whether this completion crossed the level threshold.
    pub leveled_up: bool,
}

/// XP required to go from `level` to `level + 1`: `((level + 1) * 4)^2`.
pub fn experience_to_next_level(level: u32) -> u32 {
    let base = level.saturating_add(1).saturating_mul(4);
    base.saturating_mul(base)
}

#[derive(Debug, Clone)]
pub struct Progression {
    level: u32,
    current_experience: u32,
    challenges_completed: u32,
    active_challenge: Option<ChallengeTemplate>,
    level_up_open: bool,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Progression {
    /// Create a progression seeded from persisted values.
    ///
    /// A stored level of 0 is clamped to 1.
    pub fn new(level: u32, current_experience: u32, challenges_completed: u32) -> Self {
        Self {
            level: level.max(1),
            current_experience,
            challenges_completed,
            active_challenge: None,
            level_up_open: false,
        }
    }

    /// Re-attach view-layer state carried across front-end restarts.
    pub fn restore_pending(
        &mut self,
        active_challenge: Option<ChallengeTemplate>,
        level_up_open: bool,
    ) {
        self.active_challenge = active_challenge;
        self.level_up_open = level_up_open;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_experience(&self) -> u32 {
        self.current_experience
    }

    pub fn challenges_completed(&self) -> u32 {
        self.challenges_completed
    }

    pub fn active_challenge(&self) -> Option<&ChallengeTemplate> {
        self.active_challenge.as_ref()
    }

    /// Whether the level-up overlay is waiting for acknowledgment.
    pub fn level_up_open(&self) -> bool {
        self.level_up_open
    }

    /// XP threshold for reaching the next level.
    pub fn experience_to_next_level(&self) -> u32 {
        experience_to_next_level(self.level)
    }

    /// Rounded percentage of the way to the next level, for the XP bar.
    pub fn progress_pct(&self) -> u32 {
        let threshold = self.experience_to_next_level();
        (self.current_experience as f64 * 100.0 / threshold as f64).round() as u32
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Draw a uniformly random challenge from the catalog and make it the
    /// active one. A previously pending challenge is discarded without
    /// completion credit. Returns `None` only for an empty catalog.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Option<&ChallengeTemplate> {
        if catalog.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..catalog.len());
        self.active_challenge = catalog.get(index).cloned();
        self.active_challenge.as_ref()
    }

    /// Apply the active challenge's XP. No-op when nothing is pending.
    ///
    /// Crossing the threshold subtracts it exactly once and raises the level
    /// by one; surplus XP carries over as-is. Multi-level jumps in a single
    /// completion are not supported.
    pub fn complete(&mut self) -> Option<CompletionOutcome> {
        let challenge = self.active_challenge.take()?;
        let awarded = challenge.amount;

        let mut experience = self.current_experience.saturating_add(awarded);
        let threshold = self.experience_to_next_level();
        let leveled_up = experience >= threshold;
        if leveled_up {
            experience -= threshold;
            self.level_up();
        }

        self.current_experience = experience;
        self.challenges_completed += 1;
        Some(CompletionOutcome { awarded, leveled_up })
    }

    /// Discard the active challenge without awarding XP (failure path).
    pub fn abandon(&mut self) {
        self.active_challenge = None;
    }

    /// Close the level-up overlay.
    pub fn acknowledge_level_up(&mut self) {
        self.level_up_open = false;
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.level_up_open = true;
    }
}
