mod engine;

pub use engine::{CountdownEngine, CountdownState};
