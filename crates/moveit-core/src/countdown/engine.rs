//! Countdown engine implementation.
//!
//! A logical-clock state machine: the driving front-end calls `tick()` once
//! per elapsed second. The engine never schedules anything itself, so there
//! is exactly one pending tick at any time and a reset can never race a
//! stale timer callback.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Finished) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    /// The cycle expired. Entered exactly once per run, on the tick that
    /// reaches zero; nothing advances again until `reset()`.
    Finished,
}

/// Single decrementing cycle timer.
///
/// `Running` and `Finished` are distinct variants, so the timer can never be
/// active and finished at the same time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    /// Configured cycle duration in seconds.
    duration_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
}

impl CountdownEngine {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: CountdownState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn has_finished(&self) -> bool {
        self.state == CountdownState::Finished
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs - self.remaining_secs
    }

    /// Minutes part of the remaining time, for a mm:ss display.
    pub fn minutes(&self) -> u64 {
        self.remaining_secs / 60
    }

    /// Seconds part of the remaining time, for a mm:ss display.
    pub fn seconds(&self) -> u64 {
        self.remaining_secs % 60
    }

    /// 0.0 .. 1.0 progress through the cycle.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.elapsed_secs() as f64 / self.duration_secs as f64
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the cycle. No-op while already running; a finished
    /// cycle stays finished until `reset()`.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Idle | CountdownState::Paused => {
                self.state = CountdownState::Running;
                Some(Event::CountdownStarted {
                    duration_secs: self.duration_secs,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            CountdownState::Running | CountdownState::Finished => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                Some(Event::CountdownPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Restore the configured duration and clear the active/finished flags,
    /// regardless of prior state.
    pub fn reset(&mut self) -> Event {
        self.state = CountdownState::Idle;
        self.remaining_secs = self.duration_secs;
        Event::CountdownReset { at: Utc::now() }
    }

    /// Advance the countdown by one second. Returns the expiry event on the
    /// tick that reaches zero; every other tick returns `None`.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = CountdownState::Finished;
            return Some(Event::CountdownExpired { at: Utc::now() });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_ticks_finish_a_six_second_cycle() {
        let mut engine = CountdownEngine::new(6);
        engine.start();

        let mut expirations = 0;
        for _ in 0..6 {
            if let Some(Event::CountdownExpired { .. }) = engine.tick() {
                expirations += 1;
            }
        }

        assert_eq!(expirations, 1);
        assert!(engine.has_finished());
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn no_ticking_after_finish_until_reset() {
        let mut engine = CountdownEngine::new(2);
        engine.start();
        engine.tick();
        engine.tick();
        assert!(engine.has_finished());

        assert!(engine.tick().is_none());
        assert!(engine.start().is_none());
        assert_eq!(engine.remaining_secs(), 0);

        engine.reset();
        assert_eq!(engine.state(), CountdownState::Idle);
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn start_is_a_noop_while_running() {
        let mut engine = CountdownEngine::new(10);
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert!(engine.is_active());
    }

    #[test]
    fn pause_holds_the_remaining_time() {
        let mut engine = CountdownEngine::new(10);
        engine.start();
        engine.tick();
        engine.tick();

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), CountdownState::Paused);
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 8);

        engine.start();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 7);
    }

    #[test]
    fn pause_outside_running_is_a_noop() {
        let mut engine = CountdownEngine::new(5);
        assert!(engine.pause().is_none());
        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        assert!(engine.pause().is_none());
        assert!(engine.has_finished());
    }

    #[test]
    fn reset_restores_duration_from_every_state() {
        let mut engine = CountdownEngine::new(4);
        engine.reset();
        assert_eq!(engine.remaining_secs(), 4);

        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.state(), CountdownState::Idle);
        assert_eq!(engine.remaining_secs(), 4);

        engine.start();
        engine.pause();
        engine.reset();
        assert_eq!(engine.state(), CountdownState::Idle);

        engine.start();
        for _ in 0..4 {
            engine.tick();
        }
        assert!(engine.has_finished());
        engine.reset();
        assert_eq!(engine.state(), CountdownState::Idle);
        assert_eq!(engine.remaining_secs(), 4);
    }

    #[test]
    fn display_split_and_progress() {
        let mut engine = CountdownEngine::new(90);
        assert_eq!(engine.minutes(), 1);
        assert_eq!(engine.seconds(), 30);

        engine.start();
        for _ in 0..45 {
            engine.tick();
        }
        assert_eq!(engine.elapsed_secs(), 45);
        assert!((engine.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let mut engine = CountdownEngine::new(60);
        engine.start();
        engine.tick();

        let json = serde_json::to_string(&engine).unwrap();
        let restored: CountdownEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), CountdownState::Running);
        assert_eq!(restored.remaining_secs(), 59);
        assert_eq!(restored.duration_secs(), 60);
    }
}
