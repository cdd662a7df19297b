mod cli;
mod fetch;
mod logging;
mod plot;
mod reading;
mod report;
mod scrape;
mod store;
mod sync;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let database = match &cli.database {
        Some(path) => path.clone(),
        None => command::home_file("ecclimate.sqlite")?,
    };

    match &cli.command {
        Commands::Full {} => match command::full(&database).await {
            Ok(outcome) => println!(
                "Stored {} new days from {} month pages",
                outcome.days_added, outcome.months_scanned
            ),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Update {} => match command::update(&database).await {
            Ok(outcome) => println!(
                "Stored {} new days from {} month pages",
                outcome.days_added, outcome.months_scanned
            ),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Boxplot(args) => match command::boxplot(&database, args) {
            Ok(filename) => println!("Chart saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Lineplot(args) => match command::lineplot(&database, args) {
            Ok(filename) => println!("Chart saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
