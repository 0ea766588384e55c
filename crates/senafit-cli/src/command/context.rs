use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::Rng;
use senafit_analysis::{
    history::{DEFAULT_WINDOW, DrawHistory},
    synthetic,
};
use senafit_engine::{HistoricalContext, SearchSeed};

use crate::{
    model::report::ContextSource,
    util::{self, Output},
};

/// Where to take the historical context from.
///
/// Without `--context` or `--history`, a synthetic context is generated.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ContextSourceArg {
    /// Historical context JSON file (`frequency`, `previous_draw`, `position`)
    #[arg(long, conflicts_with = "history")]
    context: Option<PathBuf>,
    /// Draw archive JSON file: array of draws, oldest first
    #[arg(long)]
    history: Option<PathBuf>,
    /// Number of most recent draws summarized from the archive
    #[arg(long, default_value_t = DEFAULT_WINDOW, requires = "history")]
    window: usize,
}

impl ContextSourceArg {
    pub(crate) fn load<R>(&self, rng: &mut R) -> anyhow::Result<(HistoricalContext, ContextSource)>
    where
        R: Rng + ?Sized,
    {
        if let Some(path) = &self.context {
            let context = util::read_context_file(path)?;
            log::info!("Loaded historical context from {}", path.display());
            let source = ContextSource::File {
                path: path.display().to_string(),
            };
            return Ok((context, source));
        }
        if let Some(path) = &self.history {
            let context = load_history(path, self.window)?;
            let source = ContextSource::History {
                path: path.display().to_string(),
                window: self.window,
            };
            return Ok((context, source));
        }
        log::info!("No historical data given; using a synthetic context");
        let context = synthetic::random_context(rng)?;
        Ok((context, ContextSource::Synthetic))
    }
}

fn load_history(path: &Path, window: usize) -> anyhow::Result<HistoricalContext> {
    let history: DrawHistory = util::read_json_file("draw history", path)?;
    let context = history
        .context(Some(window))
        .with_context(|| format!("Failed to summarize draw history: {}", path.display()))?;
    log::info!(
        "Summarized {} of {} draws from {}",
        history.recent(Some(window)).len(),
        history.len(),
        path.display()
    );
    Ok(context)
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ContextArg {
    #[clap(flatten)]
    source: ContextSourceArg,
    /// Seed for the synthetic context (32 hex digits)
    #[arg(long)]
    seed: Option<SearchSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ContextArg) -> anyhow::Result<()> {
    let ContextArg {
        source,
        seed,
        output,
    } = arg;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let (context, _) = source.load(&mut seed.rng())?;
    Output::save_json(&context, output.clone())?;
    Ok(())
}
