//! # move.it Core Library
//!
//! Core state machines for move.it, a gamified work-cycle tracker: the user
//! runs timed work cycles; an expired cycle draws a randomized challenge
//! worth experience points, and accumulated XP levels the profile up.
//!
//! The library is front-end agnostic. All environment I/O (the cookie jar,
//! desktop notifications, the audio cue) goes through injected ports, and the
//! countdown only advances when the driving front-end calls `tick()` -- there
//! is no internal thread or timer.
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: the cycle timer state machine
//! - [`Progression`]: XP/level economy and the single active-challenge slot
//! - [`Catalog`]: static challenge templates, loaded once at startup
//! - [`Session`]: wires the above to the ports and the front-end

pub mod challenge;
pub mod countdown;
pub mod error;
pub mod events;
pub mod ports;
pub mod session;
pub mod storage;

pub use challenge::{Catalog, ChallengeKind, ChallengeTemplate, CompletionOutcome, Progression};
pub use countdown::{CountdownEngine, CountdownState};
pub use error::{CatalogError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use ports::{Chime, DesktopChime, DesktopNotifier, Notifier, NullChime, NullNotifier};
pub use session::Session;
pub use storage::{Config, CookieJar, FileCookieJar, MemoryCookieJar, ProfileCookies};
