//! Genetic search for games matching desired features.
//!
//! This crate evolves a population of [`Game`]s toward a fitness objective
//! (see [`senafit_evaluator::FitnessEvaluator`]), using elitism, union-based crossover
//! and single-number mutation.
//!
//! # How the Search Works
//!
//! 1. **Population** - Start from random games ([`genetic::Population::random`])
//! 2. **Evaluation** - Compute the error of every game against the desired features
//! 3. **Elite Selection** - Keep the best fifth of the population unchanged
//! 4. **Reproduction** - Fill the rest with mutated crossovers of two distinct elites
//! 5. **Repeat** - For a fixed number of generations, with no early stopping
//! 6. **Ranking** - Report the best games of the final population ([`ranking`])
//!
//! # Architecture
//!
//! ```text
//! Evolution Loop (genetic)
//!     ↓ uses
//! Genetic Operators (operators: random game, crossover, mutation)
//!     ↓ produce
//! Games (senafit-engine)
//!     ↓ scored by
//! Fitness Evaluator (senafit-evaluator)
//! ```
//!
//! # Reproducibility
//!
//! Every randomized operation takes the random source as an explicit `&mut R` argument.
//! Using a [`senafit_engine::SearchRng`] built from a fixed
//! [`senafit_engine::SearchSeed`] makes a run fully reproducible. Fitness evaluation
//! uses no randomness, so evaluating games on several threads does not affect results.
//!
//! # Example
//!
//! ```
//! use senafit_engine::{HistoricalContext, SearchSeed};
//! use senafit_evaluator::{DesiredFeatures, Feature, FeatureValue, TargetEvaluator};
//! use senafit_training::genetic::{Population, PopulationEvolver};
//!
//! let context = HistoricalContext::new(vec![10; 60], &[1, 2, 3, 4, 5, 6], vec![3.5; 60])?;
//! let desired = DesiredFeatures::new().with(Feature::Sum, FeatureValue::Scalar(123.0))?;
//! let evaluator = TargetEvaluator::new(&desired, &context);
//!
//! let mut rng = SearchSeed::from_u64(7).rng();
//! let population = Population::random(50, &mut rng)?;
//! let population = PopulationEvolver::default().evolve(population, &evaluator, 20, &mut rng)?;
//! assert_eq!(population.len(), 50);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Current Limitations
//!
//! - **Fixed iteration count**: no convergence detection or early exit; the search is a
//!   heuristic and may stop far from the optimum
//! - **Fixed elite fraction**: the elite is always `population / 5` games, so populations
//!   smaller than 10 are rejected
//! - **No diversity maintenance**: duplicate games are allowed and may take over the
//!   population once the elite converges

use senafit_engine::GameError;

#[cfg(doc)]
use senafit_engine::Game;

pub mod genetic;
pub mod operators;
pub mod ranking;

/// Invalid search parameters, detected before evolution starts.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display(
        "population of {size} games is too small: elite size {elite_count} must be at least 2"
    )]
    PopulationTooSmall { size: usize, elite_count: usize },
    #[display("mutation rate {rate} is outside [0, 1]")]
    MutationRate { rate: f64 },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolutionError {
    #[display("invalid search configuration")]
    Configuration(ConfigurationError),
    /// A genetic operator broke the game invariant. This is a defect, never an input
    /// problem.
    #[display("genetic operator produced an invalid game")]
    Invariant(GameError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_wrapped_error_is_reported_as_source() {
        let err = EvolutionError::from(ConfigurationError::PopulationTooSmall {
            size: 9,
            elite_count: 1,
        });
        assert_eq!(err.to_string(), "invalid search configuration");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("population of 9 games is too small: elite size 1 must be at least 2")
        );
    }
}
