mod contacts;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "spritevisu";
    pub const BIN_NAME: &str = "spritevisu";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Prepare SPRITE proximity-clustering data for interactive heatmap visualization.")
        .subcommand_required(true)
        .subcommand(contacts::cli::create_contacts_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // CLUSTER-TO-CONTACT CONVERSION
        //
        Some((contacts::cli::CONTACTS_CMD, matches)) => {
            contacts::handlers::run_contacts(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
