//! Session wiring.
//!
//! One `Session` per run owns the catalog, the progression store, the
//! countdown engine, the RNG, and the side-effect ports, and is handed by
//! reference to whichever front-end drives it. Expiry of the countdown is
//! the only thing that draws a new challenge.

use chrono::Utc;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::challenge::{Catalog, ChallengeTemplate, Progression};
use crate::countdown::CountdownEngine;
use crate::events::Event;
use crate::ports::{Chime, Notifier};
use crate::storage::{CookieJar, ProfileCookies};

pub struct Session {
    catalog: Catalog,
    progression: Progression,
    countdown: CountdownEngine,
    cookies: Box<dyn CookieJar>,
    notifier: Box<dyn Notifier>,
    chime: Box<dyn Chime>,
    rng: Pcg64,
}

impl Session {
    /// Build a session: seed the progression from the cookie trio and ask
    /// the notifier for permission once.
    pub fn new(
        catalog: Catalog,
        duration_secs: u64,
        cookies: Box<dyn CookieJar>,
        mut notifier: Box<dyn Notifier>,
        chime: Box<dyn Chime>,
    ) -> Self {
        let seed = ProfileCookies::read(cookies.as_ref());
        let progression = Progression::new(
            seed.level,
            seed.current_experience,
            seed.challenges_completed,
        );
        notifier.request_permission();
        Self {
            catalog,
            progression,
            countdown: CountdownEngine::new(duration_secs),
            cookies,
            notifier,
            chime,
            rng: Pcg64::from_entropy(),
        }
    }

    /// Replace the entropy-seeded RNG, for deterministic draws.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    /// Restore view-layer state persisted between front-end invocations.
    pub fn restore(
        &mut self,
        countdown: CountdownEngine,
        active_challenge: Option<ChallengeTemplate>,
        level_up_open: bool,
    ) {
        self.countdown = countdown;
        self.progression.restore_pending(active_challenge, level_up_open);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    /// Full-state snapshot for the view layer.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            countdown: self.countdown.state(),
            remaining_secs: self.countdown.remaining_secs(),
            duration_secs: self.countdown.duration_secs(),
            level: self.progression.level(),
            current_experience: self.progression.current_experience(),
            experience_to_next_level: self.progression.experience_to_next_level(),
            challenges_completed: self.progression.challenges_completed(),
            active_challenge: self.progression.active_challenge().cloned(),
            level_up_open: self.progression.level_up_open(),
            at: Utc::now(),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    pub fn start_cycle(&mut self) -> Option<Event> {
        self.countdown.start()
    }

    pub fn pause_cycle(&mut self) -> Option<Event> {
        self.countdown.pause()
    }

    /// Abandon the cycle: reset the countdown without drawing a challenge.
    pub fn abandon_cycle(&mut self) -> Event {
        self.countdown.reset()
    }

    /// Advance the countdown by one second. On expiry, draws a new challenge
    /// and fires the notification and audio cues.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(expired) = self.countdown.tick() {
            events.push(expired);
            if let Some(drawn) = self.draw_challenge() {
                events.push(drawn);
            }
        }
        events
    }

    fn draw_challenge(&mut self) -> Option<Event> {
        let challenge = self.progression.draw(&self.catalog, &mut self.rng)?.clone();
        // Fire-and-forget side channels; failures never touch the state.
        self.chime.play();
        self.notifier.challenge_drawn(&challenge);
        Some(Event::ChallengeDrawn {
            kind: challenge.kind,
            description: challenge.description,
            amount: challenge.amount,
            at: Utc::now(),
        })
    }

    /// Mark the pending challenge completed: award its XP, reset the
    /// countdown, and persist the cookie trio.
    pub fn succeed_challenge(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(outcome) = self.progression.complete() {
            events.push(Event::ChallengeCompleted {
                awarded: outcome.awarded,
                level: self.progression.level(),
                current_experience: self.progression.current_experience(),
                challenges_completed: self.progression.challenges_completed(),
                leveled_up: outcome.leveled_up,
                at: Utc::now(),
            });
            if outcome.leveled_up {
                events.push(Event::LeveledUp {
                    level: self.progression.level(),
                    at: Utc::now(),
                });
            }
            events.push(self.countdown.reset());
            self.persist();
        }
        events
    }

    /// Give up on the pending challenge: no XP, countdown resets.
    pub fn fail_challenge(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.progression.active_challenge().is_some() {
            self.progression.abandon();
            events.push(Event::ChallengeFailed { at: Utc::now() });
            events.push(self.countdown.reset());
        }
        events
    }

    pub fn acknowledge_level_up(&mut self) {
        self.progression.acknowledge_level_up();
    }

    /// Serialize the progression trio to the cookie jar. Best-effort: a
    /// failed write leaves the in-memory state authoritative.
    fn persist(&mut self) {
        let cookies = ProfileCookies {
            level: self.progression.level(),
            current_experience: self.progression.current_experience(),
            challenges_completed: self.progression.challenges_completed(),
        };
        let _ = cookies.write(self.cookies.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{NullChime, NullNotifier};
    use crate::storage::MemoryCookieJar;

    fn session(duration_secs: u64) -> Session {
        let catalog = Catalog::from_json(
            r#"[{"type": "body", "description": "Stretch.", "amount": 10}]"#,
        )
        .unwrap();
        Session::new(
            catalog,
            duration_secs,
            Box::new(MemoryCookieJar::default()),
            Box::new(NullNotifier),
            Box::new(NullChime),
        )
        .with_rng_seed(1)
    }

    #[test]
    fn tick_does_nothing_while_idle() {
        let mut s = session(6);
        assert!(s.tick().is_empty());
        assert!(s.progression().active_challenge().is_none());
    }

    #[test]
    fn expiry_draws_a_challenge() {
        let mut s = session(3);
        s.start_cycle();
        assert!(s.tick().is_empty());
        assert!(s.tick().is_empty());

        let events = s.tick();
        assert!(matches!(events[0], Event::CountdownExpired { .. }));
        assert!(matches!(events[1], Event::ChallengeDrawn { .. }));
        assert!(s.progression().active_challenge().is_some());
    }

    #[test]
    fn abandon_resets_without_a_draw() {
        let mut s = session(10);
        s.start_cycle();
        s.tick();
        s.abandon_cycle();

        assert_eq!(s.countdown().remaining_secs(), 10);
        assert!(!s.countdown().is_active());
        assert!(s.progression().active_challenge().is_none());
    }

    #[test]
    fn succeed_resets_the_countdown_and_awards_xp() {
        let mut s = session(1);
        s.start_cycle();
        s.tick();

        let events = s.succeed_challenge();
        assert!(matches!(events[0], Event::ChallengeCompleted { .. }));
        assert!(matches!(events.last(), Some(Event::CountdownReset { .. })));
        assert_eq!(s.progression().current_experience(), 10);
        assert_eq!(s.progression().challenges_completed(), 1);
        assert_eq!(s.countdown().remaining_secs(), 1);
        assert!(!s.countdown().has_finished());
    }

    #[test]
    fn succeed_without_a_pending_challenge_is_a_noop() {
        let mut s = session(5);
        assert!(s.succeed_challenge().is_empty());
        assert!(s.fail_challenge().is_empty());
    }

    #[test]
    fn fail_discards_the_challenge_without_credit() {
        let mut s = session(1);
        s.start_cycle();
        s.tick();

        let events = s.fail_challenge();
        assert!(matches!(events[0], Event::ChallengeFailed { .. }));
        assert_eq!(s.progression().current_experience(), 0);
        assert_eq!(s.progression().challenges_completed(), 0);
        assert!(s.progression().active_challenge().is_none());
    }
}
