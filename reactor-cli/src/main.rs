//! REACTOR CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game against the bot
//! - simulate: Batch games with a scripted opponent

use clap::{Parser, Subcommand};

mod play;
mod simulate;

#[derive(Parser)]
#[command(name = "reactor")]
#[command(about = "REACTOR territory game: place reactors, flip neighbors, control the board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the bot
    Play(play::PlayArgs),
    /// Run scripted games against the bot and report results
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Simulate(args) => simulate::run(args),
    }
}
