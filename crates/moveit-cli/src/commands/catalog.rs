use clap::Subcommand;
use moveit_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List the loaded challenge catalog
    List,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let catalog = state::load_catalog(&config)?;

    match action {
        CatalogAction::List => {
            for (index, challenge) in catalog.iter().enumerate() {
                println!(
                    "{index:>3}  {:>4} xp  [{}]  {}",
                    challenge.amount,
                    challenge.kind.label(),
                    challenge.description
                );
            }
        }
    }
    Ok(())
}
