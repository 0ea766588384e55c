use clap::{Parser, Subcommand};

use self::{check::CheckArg, context::ContextArg, features::FeaturesArg, search::SearchArg};

mod check;
mod context;
mod features;
mod search;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for games matching desired features with a genetic algorithm
    Search(#[clap(flatten)] SearchArg),
    /// Compute the features of a game
    Features(#[clap(flatten)] FeaturesArg),
    /// Build a historical context from a draw archive
    Context(#[clap(flatten)] ContextArg),
    /// Count matching numbers between searched games and an actual draw
    Check(#[clap(flatten)] CheckArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Search(arg) => search::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
        Mode::Context(arg) => context::run(&arg)?,
        Mode::Check(arg) => check::run(&arg)?,
    }
    Ok(())
}
