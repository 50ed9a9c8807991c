use clap::Subcommand;
use moveit_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Start the current cycle
    Start,
    /// Pause the running cycle
    Pause,
    /// Resume a paused cycle
    Resume,
    /// Abandon the cycle without drawing a challenge
    Abandon,
    /// Print the countdown state as JSON, catching up elapsed seconds
    Status,
}

pub fn run(action: CountdownAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut loaded = state::load(&config)?;

    match action {
        CountdownAction::Start | CountdownAction::Resume => {
            match loaded.session.start_cycle() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&loaded.session.snapshot())?),
            }
        }
        CountdownAction::Pause => match loaded.session.pause_cycle() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&loaded.session.snapshot())?),
        },
        CountdownAction::Abandon => {
            let event = loaded.session.abandon_cycle();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        CountdownAction::Status => {
            for event in &loaded.catchup_events {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
            println!("{}", serde_json::to_string_pretty(&loaded.session.snapshot())?);
        }
    }

    state::save(&loaded.session)?;
    Ok(())
}
