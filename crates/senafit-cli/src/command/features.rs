use std::path::PathBuf;

use rand::Rng;
use senafit_engine::{Game, SearchSeed};
use senafit_evaluator::{DesiredFeatures, FeatureSet, fitness::evaluate};
use serde::Serialize;

use crate::{
    command::context::ContextSourceArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Game numbers, e.g. "1,7,13,30,42,60"
    game: Game,
    #[clap(flatten)]
    context: ContextSourceArg,
    /// Desired features JSON file to compute the error against
    #[arg(long)]
    target: Option<PathBuf>,
    /// Seed for the synthetic context (32 hex digits)
    #[arg(long)]
    seed: Option<SearchSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GameFeatures {
    game: Game,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<f64>,
    features: FeatureSet,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg {
        game,
        context,
        target,
        seed,
        output,
    } = arg;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let (context, _) = context.load(&mut seed.rng())?;

    let result = match target {
        Some(path) => {
            let desired: DesiredFeatures = util::read_json_file("target", path)?;
            let evaluation = evaluate(game, &desired, &context);
            GameFeatures {
                game: *game,
                error: Some(evaluation.error),
                features: evaluation.features,
            }
        }
        None => GameFeatures {
            game: *game,
            error: None,
            features: FeatureSet::compute(game, &context),
        },
    };

    eprintln!("Features of {game}:");
    for (feature, value) in result.features.iter() {
        eprintln!("  {:<24} {value}", feature.name());
    }
    if let Some(error) = result.error {
        eprintln!("Error: {error:.3}");
    }
    Output::save_json(&result, output.clone())?;
    Ok(())
}
