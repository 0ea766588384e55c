use std::path::PathBuf;

use senafit_analysis::hits::HitReport;
use senafit_engine::Game;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckArg {
    /// Search report written by `senafit search`
    #[arg(long)]
    report: PathBuf,
    /// Actual draw, e.g. "4,8,15,16,23,42"
    #[arg(long)]
    draw: Game,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let CheckArg {
        report,
        draw,
        output,
    } = arg;
    let saved = util::read_report_file(report)?;
    log::info!(
        "Checking {} games of {:?} (seed {}) against {draw}",
        saved.ranked.len(),
        saved.name,
        saved.seed
    );

    let hits = HitReport::new(*draw, saved.ranked.iter().map(|ranked| &ranked.game));
    for (entry, game) in saved.ranked.iter().zip(&hits.games) {
        eprintln!("  {:2}: {} => {} hits", entry.rank, game.game, game.hits);
    }
    if let Some(best) = hits.best() {
        eprintln!("Best: {best} hits");
    }
    Output::save_json(&hits, output.clone())?;
    Ok(())
}
