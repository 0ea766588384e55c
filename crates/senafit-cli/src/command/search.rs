use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::Utc;
use rand::Rng;
use senafit_analysis::synthetic;
use senafit_engine::SearchSeed;
use senafit_evaluator::{DesiredFeatures, FeatureValue, TargetEvaluator, UnknownFeaturePolicy};
use senafit_training::{
    genetic::{DEFAULT_POPULATION_SIZE, Population, PopulationEvolver, elite_count},
    operators::DEFAULT_MUTATION_RATE,
    ranking::{self, DEFAULT_TOP},
};

use crate::{
    command::context::ContextSourceArg,
    model::report::{SearchParams, SearchReport},
    util::{self, Output},
};

const DEFAULT_GENERATIONS: usize = 200;

/// Generations between progress messages.
const PROGRESS_INTERVAL: usize = 20;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Desired features JSON file; without it, the features of a random game are used
    #[arg(long)]
    target: Option<PathBuf>,
    /// Reject unknown feature ids in the target file instead of ignoring them
    #[arg(long)]
    strict: bool,
    #[clap(flatten)]
    context: ContextSourceArg,
    /// Number of games per generation
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Probability of mutating each child
    #[arg(long, default_value_t = DEFAULT_MUTATION_RATE)]
    mutation_rate: f64,
    /// Seed for the whole run (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<SearchSeed>,
    /// Number of best games to report
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,
    /// Report each distinct game once
    #[arg(long)]
    unique: bool,
    /// Name stored in the report
    #[arg(long, default_value = "search")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SearchArg) -> anyhow::Result<()> {
    let SearchArg {
        target,
        strict,
        context,
        population,
        generations,
        mutation_rate,
        seed,
        top,
        unique,
        name,
        output,
    } = arg;

    let evolver = PopulationEvolver::new(*mutation_rate)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Seed: {seed}");
    let mut rng = seed.rng();

    let (context, context_source) = context.load(&mut rng)?;
    let (desired, planted) = match target {
        Some(path) => {
            let policy = if *strict {
                UnknownFeaturePolicy::Reject
            } else {
                UnknownFeaturePolicy::Ignore
            };
            (load_target(path, policy)?, None)
        }
        None => {
            let (game, desired) = synthetic::planted_target(&context, &mut rng)?;
            log::info!("No target given; searching for the features of {game}");
            (desired, Some(game))
        }
    };
    if desired.is_empty() {
        log::warn!("No desired features; every game has zero error");
    }

    let evaluator = TargetEvaluator::new(&desired, &context);
    let initial = Population::random(*population, &mut rng)?;
    let evolved = evolver.evolve_with(initial, &evaluator, *generations, &mut rng, |stats| {
        if (stats.generation + 1) % PROGRESS_INTERVAL == 0 {
            log::info!(
                "Generation #{}: best {:.3}, mean {:.3}",
                stats.generation,
                stats.best_error,
                stats.errors.mean
            );
        }
    })?;

    let ranked = ranking::rank(&evolved, &evaluator, *top, *unique);
    eprintln!("Best games:");
    for game in &ranked {
        eprintln!("  {:2}: {} => {:.3}", game.rank, game.game, game.error);
    }

    let report = SearchReport {
        name: name.clone(),
        timestamp: Utc::now(),
        seed,
        params: SearchParams {
            population: *population,
            generations: *generations,
            elite_count: elite_count(*population),
            mutation_rate: *mutation_rate,
            top: *top,
            unique: *unique,
            context: context_source,
        },
        target: desired,
        planted,
        ranked,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

fn load_target(path: &Path, policy: UnknownFeaturePolicy) -> anyhow::Result<DesiredFeatures> {
    let raw: BTreeMap<String, FeatureValue> = util::read_json_file("target", path)?;
    let desired = DesiredFeatures::from_raw(raw, policy)
        .with_context(|| format!("Invalid desired features in {}", path.display()))?;
    log::info!(
        "Loaded {} desired features from {}",
        desired.len(),
        path.display()
    );
    Ok(desired)
}
