use clap::Subcommand;
use moveit_core::{Config, FileCookieJar, ProfileCookies};

use crate::state;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show level, XP bar, and completed-challenge count
    Show,
    /// Acknowledge the level-up banner
    Ack,
    /// Reset the persisted profile to defaults
    Reset,
}

fn xp_bar(pct: u32) -> String {
    let filled = (pct.min(100) / 5) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Show => {
            let config = Config::load_or_default();
            let loaded = state::load(&config)?;
            let p = loaded.session.progression();

            if p.level_up_open() {
                println!("LEVEL UP! You reached level {}", p.level());
                println!("(acknowledge with `moveit profile ack`)");
                println!();
            }
            println!("Level {}", p.level());
            println!(
                "{} {} / {} xp ({}%)",
                xp_bar(p.progress_pct()),
                p.current_experience(),
                p.experience_to_next_level(),
                p.progress_pct()
            );
            println!("{} challenges completed", p.challenges_completed());
            state::save(&loaded.session)?;
        }
        ProfileAction::Ack => {
            let config = Config::load_or_default();
            let mut loaded = state::load(&config)?;
            loaded.session.acknowledge_level_up();
            state::save(&loaded.session)?;
            println!("ok");
        }
        ProfileAction::Reset => {
            let mut jar = FileCookieJar::open_default()?;
            ProfileCookies::default().write(&mut jar)?;
            // The pending challenge and countdown belong to the old profile.
            let _ = std::fs::remove_file(state::file_path()?);
            println!("profile reset to defaults");
        }
    }
    Ok(())
}
