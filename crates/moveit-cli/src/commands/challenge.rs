use clap::Subcommand;
use moveit_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Show the pending challenge
    Show,
    /// Mark the pending challenge completed and collect its XP
    Complete,
    /// Give up on the pending challenge
    Fail,
}

pub fn run(action: ChallengeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut loaded = state::load(&config)?;

    match action {
        ChallengeAction::Show => match loaded.session.progression().active_challenge() {
            Some(challenge) => println!("{}", serde_json::to_string_pretty(challenge)?),
            None => println!("Finish a cycle to receive a challenge"),
        },
        ChallengeAction::Complete => {
            let events = loaded.session.succeed_challenge();
            if events.is_empty() {
                println!("no pending challenge");
            }
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        ChallengeAction::Fail => {
            let events = loaded.session.fail_challenge();
            if events.is_empty() {
                println!("no pending challenge");
            }
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    state::save(&loaded.session)?;
    Ok(())
}
