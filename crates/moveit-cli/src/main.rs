use clap::{Parser, Subcommand};

mod commands;
mod state;

#[derive(Parser)]
#[command(name = "moveit", version, about = "move.it -- gamified work cycles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Countdown control
    Countdown {
        #[command(subcommand)]
        action: commands::countdown::CountdownAction,
    },
    /// Pending challenge resolution
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// Profile and level-up display
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Challenge catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Interactive cycle loop
    Run,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Countdown { action } => commands::countdown::run(action),
        Commands::Challenge { action } => commands::challenge::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Run => commands::run::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
