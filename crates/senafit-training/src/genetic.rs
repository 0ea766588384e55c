//! Genetic algorithm driving the search.
//!
//! Each generation follows the same cycle:
//!
//! 1. **Evaluate Fitness** - Compute the error of every game ([`score_population`])
//! 2. **Elite Selection** - The `population / 5` lowest-error games ([`select_elites`])
//!    are copied unchanged into the next generation
//! 3. **Reproduction** - Two distinct elites are drawn uniformly at random, combined
//!    with [`operators::crossover`] and passed through [`operators::mutate`], until the
//!    next generation has the same size as the current one
//! 4. **Replacement** - The new population replaces the old one entirely
//!
//! The loop runs for exactly the requested number of generations. Because elites are
//! carried forward unchanged, the best error of the population never increases from one
//! generation to the next.
//!
//! # Key Components
//!
//! - [`Population`] - The games of one generation
//! - [`ScoredGame`] - A game with its error
//! - [`PopulationEvolver`] - Evolution parameters and the generation loop
//! - [`GenerationStats`] - Per-generation error statistics, logged and reported to
//!   observers of [`PopulationEvolver::evolve_with`]
//!
//! # Parallelization
//!
//! Fitness evaluation is split over scoped threads, one chunk of the population per
//! available core. Evaluation is deterministic and uses no random numbers, so results do
//! not depend on the thread count.

use std::{num::NonZeroUsize, panic, thread};

use rand::{Rng, seq::index};
use senafit_engine::{Game, GameError, HistoricalContext};
use senafit_evaluator::{DesiredFeatures, FitnessEvaluator, TargetEvaluator};
use senafit_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{
    ConfigurationError, EvolutionError,
    operators::{self, DEFAULT_MUTATION_RATE},
};

/// Default number of games per generation.
pub const DEFAULT_POPULATION_SIZE: usize = 200;

/// The elite is `population / ELITE_DIVISOR` games.
pub const ELITE_DIVISOR: usize = 5;

/// Crossover draws two distinct elites, so at least this many are needed.
pub const MIN_ELITE_COUNT: usize = 2;

/// Number of elites kept from a population of `population_size` games.
#[must_use]
pub const fn elite_count(population_size: usize) -> usize {
    population_size / ELITE_DIVISOR
}

/// Checks that a population of `size` games yields enough elites for crossover.
pub fn check_population_size(size: usize) -> Result<(), ConfigurationError> {
    let elite_count = elite_count(size);
    if elite_count < MIN_ELITE_COUNT {
        return Err(ConfigurationError::PopulationTooSmall { size, elite_count });
    }
    Ok(())
}

/// The games of one generation.
///
/// Duplicate games are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Population {
    games: Vec<Game>,
}

impl Population {
    #[must_use]
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// Creates a population of `size` independently sampled random games.
    pub fn random<R>(size: usize, rng: &mut R) -> Result<Self, GameError>
    where
        R: Rng + ?Sized,
    {
        let games = (0..size)
            .map(|_| operators::random_game(rng))
            .collect::<Result<_, _>>()?;
        Ok(Self { games })
    }

    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// A game together with its error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredGame {
    pub game: Game,
    pub error: f64,
}

/// Evaluates every game and returns them sorted by ascending error.
///
/// The sort is stable: games with equal error keep their population order.
#[must_use]
pub fn score_population<E>(population: &Population, evaluator: &E) -> Vec<ScoredGame>
where
    E: FitnessEvaluator + ?Sized,
{
    let errors = evaluate_errors(population.games(), evaluator);
    let mut scored = population
        .games()
        .iter()
        .zip(errors)
        .map(|(game, error)| ScoredGame { game: *game, error })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| a.error.total_cmp(&b.error));
    scored
}

/// Returns the `elite_size` lowest-error games in ascending error order.
///
/// Returns the whole population (sorted) if it has fewer than `elite_size` games.
#[must_use]
pub fn select_elites<E>(population: &Population, evaluator: &E, elite_size: usize) -> Vec<Game>
where
    E: FitnessEvaluator + ?Sized,
{
    score_population(population, evaluator)
        .into_iter()
        .take(elite_size)
        .map(|scored| scored.game)
        .collect()
}

fn evaluate_errors<E>(games: &[Game], evaluator: &E) -> Vec<f64>
where
    E: FitnessEvaluator + ?Sized,
{
    let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_size = games.len().div_ceil(threads).max(1);
    thread::scope(|s| {
        let handles = games
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|game| evaluator.error(game))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect()
    })
}

/// Error statistics of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Error of the best game (equal to `errors.min`).
    pub best_error: f64,
    /// Error distribution over the whole generation.
    pub errors: DescriptiveStats,
}

impl GenerationStats {
    fn from_scored(generation: usize, scored: &[ScoredGame]) -> Option<Self> {
        let errors = DescriptiveStats::from_sorted(
            &scored.iter().map(|s| s.error).collect::<Vec<_>>(),
        )?;
        Some(Self {
            generation,
            best_error: errors.min,
            errors,
        })
    }
}

/// Controls how populations evolve from one generation to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEvolver {
    mutation_rate: f64,
}

impl Default for PopulationEvolver {
    fn default() -> Self {
        Self {
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

impl PopulationEvolver {
    /// Creates an evolver mutating each child with probability `mutation_rate`.
    pub fn new(mutation_rate: f64) -> Result<Self, ConfigurationError> {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(ConfigurationError::MutationRate {
                rate: mutation_rate,
            });
        }
        Ok(Self { mutation_rate })
    }

    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Builds the next generation from `population`.
    ///
    /// 1. Keeps the `population / 5` best games unchanged
    /// 2. Fills the remaining slots with mutated crossovers of two distinct elites
    ///
    /// The new population has the same size as the input.
    pub fn next_generation<E, R>(
        &self,
        population: &Population,
        evaluator: &E,
        rng: &mut R,
    ) -> Result<Population, EvolutionError>
    where
        E: FitnessEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        check_population_size(population.len())?;
        let scored = score_population(population, evaluator);
        self.breed(population.len(), &scored, rng)
    }

    fn breed<R>(
        &self,
        size: usize,
        scored: &[ScoredGame],
        rng: &mut R,
    ) -> Result<Population, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let elites = scored[..elite_count(size)]
            .iter()
            .map(|s| s.game)
            .collect::<Vec<_>>();

        let mut games = Vec::with_capacity(size);
        games.extend_from_slice(&elites);
        while games.len() < size {
            let pair = index::sample(rng, elites.len(), 2);
            let child = operators::crossover(&elites[pair.index(0)], &elites[pair.index(1)], rng)?;
            games.push(operators::mutate(&child, self.mutation_rate, rng)?);
        }
        Ok(Population { games })
    }

    /// Evolves `population` for exactly `generations` generations.
    ///
    /// The population size is checked before the first generation, even when
    /// `generations` is zero. With zero generations the input is returned unchanged.
    pub fn evolve<E, R>(
        &self,
        population: Population,
        evaluator: &E,
        generations: usize,
        rng: &mut R,
    ) -> Result<Population, EvolutionError>
    where
        E: FitnessEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        self.evolve_with(population, evaluator, generations, rng, |_| {})
    }

    /// Like [`Self::evolve`], calling `on_generation` after each generation is evaluated.
    pub fn evolve_with<E, R, F>(
        &self,
        mut population: Population,
        evaluator: &E,
        generations: usize,
        rng: &mut R,
        mut on_generation: F,
    ) -> Result<Population, EvolutionError>
    where
        E: FitnessEvaluator + ?Sized,
        R: Rng + ?Sized,
        F: FnMut(&GenerationStats),
    {
        let size = population.len();
        check_population_size(size)?;
        log::info!(
            "Evolving {size} games for {generations} generations (elite {}, mutation rate {})",
            elite_count(size),
            self.mutation_rate
        );

        for generation in 0..generations {
            let scored = score_population(&population, evaluator);
            if let Some(stats) = GenerationStats::from_scored(generation, &scored) {
                log::debug!(
                    "Generation #{generation}: best {:.3}, mean {:.3}, median {:.3}",
                    stats.best_error,
                    stats.errors.mean,
                    stats.errors.median
                );
                on_generation(&stats);
            }
            population = self.breed(size, &scored, rng)?;
        }
        Ok(population)
    }
}

/// Evolves `population` toward `desired` with the default mutation rate.
///
/// Shorthand for [`PopulationEvolver::evolve`] with a [`TargetEvaluator`].
pub fn evolve<R>(
    population: Population,
    desired: &DesiredFeatures,
    context: &HistoricalContext,
    generations: usize,
    rng: &mut R,
) -> Result<Population, EvolutionError>
where
    R: Rng + ?Sized,
{
    let evaluator = TargetEvaluator::new(desired, context);
    PopulationEvolver::default().evolve(population, &evaluator, generations, rng)
}
