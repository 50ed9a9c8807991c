mod catalog;
mod progression;

pub use catalog::{Catalog, ChallengeKind, ChallengeTemplate};
pub use progression::{experience_to_next_level, CompletionOutcome, Progression};
