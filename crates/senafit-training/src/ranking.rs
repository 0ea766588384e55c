//! Ranking of the final population.

use std::collections::HashSet;

use senafit_engine::Game;
use senafit_evaluator::{FeatureSet, FitnessEvaluator};
use serde::Serialize;

use crate::genetic::{Population, score_population};

/// Default number of games reported after a search.
pub const DEFAULT_TOP: usize = 10;

/// A game of the final population with its rank, error and features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGame {
    /// One-based rank (1 is the best game).
    pub rank: usize,
    pub game: Game,
    pub error: f64,
    pub features: FeatureSet,
}

/// Returns the `top` lowest-error games of `population`, best first.
///
/// When `unique` is set, repeated games are reported once, at their best rank. Games
/// with equal error keep their population order.
#[must_use]
pub fn rank<E>(population: &Population, evaluator: &E, top: usize, unique: bool) -> Vec<RankedGame>
where
    E: FitnessEvaluator + ?Sized,
{
    let mut seen = HashSet::new();
    score_population(population, evaluator)
        .into_iter()
        .filter(|scored| !unique || seen.insert(scored.game))
        .take(top)
        .enumerate()
        .map(|(i, scored)| {
            let evaluation = evaluator.evaluate(&scored.game);
            RankedGame {
                rank: i + 1,
                game: scored.game,
                error: evaluation.error,
                features: evaluation.features,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use senafit_engine::HistoricalContext;
    use senafit_evaluator::{DesiredFeatures, Feature, FeatureValue, TargetEvaluator};

    use super::*;

    fn game(numbers: [u8; 6]) -> Game {
        Game::new(numbers).unwrap()
    }

    fn context() -> HistoricalContext {
        HistoricalContext::new(vec![1; 60], &[1, 2, 3, 4, 5, 6], vec![3.5; 60]).unwrap()
    }

    #[test]
    fn test_rank_orders_by_error() {
        let context = context();
        let desired = DesiredFeatures::new()
            .with(Feature::Sum, FeatureValue::Scalar(100.0))
            .unwrap();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let population = Population::new(vec![
            game([1, 2, 3, 4, 5, 6]),       // 21
            game([10, 15, 16, 17, 20, 22]), // 100
            game([5, 10, 15, 20, 25, 30]),  // 105
        ]);

        let ranked = rank(&population, &evaluator, 2, false);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].game, game([10, 15, 16, 17, 20, 22]));
        assert_eq!(ranked[0].error, 0.0);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].error, 25.0);
        assert_eq!(
            ranked[1].features.get(Feature::Sum),
            &FeatureValue::Scalar(105.0)
        );
    }

    #[test]
    fn test_rank_unique_drops_repeats() {
        let context = context();
        let desired = DesiredFeatures::new();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let a = game([1, 2, 3, 4, 5, 6]);
        let b = game([7, 8, 9, 10, 11, 12]);
        let population = Population::new(vec![a, a, b, a]);

        let all = rank(&population, &evaluator, 10, false);
        assert_eq!(all.len(), 4);

        let unique = rank(&population, &evaluator, 10, true);
        let games = unique.iter().map(|r| r.game).collect::<Vec<_>>();
        assert_eq!(games, [a, b]);
        assert_eq!(unique[1].rank, 2);
    }
}
