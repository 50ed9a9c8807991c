//! Interactive cycle loop.
//!
//! Owns the single recurring tick: a 1-second tokio interval drives the
//! session, so exactly one tick is ever pending and every tick observes the
//! engine's latest state.

use std::io::{self, Write};
use std::time::Duration;

use moveit_core::{Config, Session};

use crate::state;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut loaded = state::load(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(drive(&mut loaded.session));
    state::save(&loaded.session)?;
    result
}

/// Read one trimmed line from stdin. `None` on EOF.
fn prompt(text: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

async fn drive(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if session.progression().level_up_open() {
            println!();
            println!("LEVEL UP! You reached level {}", session.progression().level());
            if prompt("press enter to continue ")?.is_none() {
                return Ok(());
            }
            session.acknowledge_level_up();
        }

        if let Some(challenge) = session.progression().active_challenge().cloned() {
            println!();
            println!(
                "New challenge [{}] worth {} xp",
                challenge.kind.label(),
                challenge.amount
            );
            println!("  {}", challenge.description);
            match prompt("complete it? [y/n/q] ")? {
                None => return Ok(()),
                Some(answer) => match answer.as_str() {
                    "y" | "Y" => {
                        session.succeed_challenge();
                        let p = session.progression();
                        println!(
                            "{} / {} xp, {} challenges completed",
                            p.current_experience(),
                            p.experience_to_next_level(),
                            p.challenges_completed()
                        );
                    }
                    "q" | "Q" => return Ok(()),
                    _ => {
                        session.fail_challenge();
                        println!("challenge skipped");
                    }
                },
            }
            continue;
        }

        if session.countdown().has_finished() {
            // Expiry already drew its challenge; a fresh cycle needs a reset.
            session.abandon_cycle();
        }

        if !session.countdown().is_active() {
            let secs = session.countdown().duration_secs();
            match prompt(&format!("start a {secs}s cycle? [enter/q] "))? {
                None => return Ok(()),
                Some(answer) if answer == "q" || answer == "Q" => return Ok(()),
                Some(_) => {
                    session.start_cycle();
                }
            }
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first interval tick completes immediately; consume it so each
        // engine tick maps to one elapsed second.
        ticker.tick().await;
        while session.countdown().is_active() {
            ticker.tick().await;
            session.tick();
            print!(
                "\r  {:02}:{:02} ",
                session.countdown().minutes(),
                session.countdown().seconds()
            );
            io::stdout().flush()?;
        }
        println!();
        if session.countdown().has_finished() {
            println!("cycle complete!");
        }
    }
}
