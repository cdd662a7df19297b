//! Command line interface.

pub mod command;

use std::path::PathBuf;
use std::time::Duration;

use clap::{command, ArgAction, Args, Parser, Subcommand};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Database file (defaults to `ecclimate.sqlite` in the home directory)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the full daily temperature history into a fresh store
    Full {},
    /// Scrape only what is newer than the latest stored day
    Update {},
    /// Plot monthly mean-temperature distributions over a range of years
    Boxplot(BoxplotArgs),
    /// Plot daily mean temperatures for one month
    Lineplot(LineplotArgs),
}

#[derive(Args)]
pub struct BoxplotArgs {
    /// First year of the range (inclusive)
    pub from_year: i32,
    /// Last year of the range (inclusive)
    pub to_year: i32,
    /// Output file (defaults to an SVG in the home directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct LineplotArgs {
    /// Year to plot
    pub year: i32,
    /// Month to plot (1-12)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
    /// Output file (defaults to an SVG in the home directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
