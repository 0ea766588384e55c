//! Random contexts and planted targets for runs without real data.

use rand::Rng;
use senafit_engine::{ContextError, Game, GameError, HistoricalContext, NUMBER_COUNT};
use senafit_evaluator::{DesiredFeatures, FeatureSet};
use senafit_training::operators;

use crate::HistoryError;

/// Builds a random historical context.
///
/// - frequencies uniform in `1..=99`
/// - a random previous draw
/// - positions uniform in `[1, 6)`
pub fn random_context<R>(rng: &mut R) -> Result<HistoricalContext, HistoryError>
where
    R: Rng + ?Sized,
{
    let frequency = (0..NUMBER_COUNT)
        .map(|_| rng.random_range(1..=99))
        .collect();
    let previous_draw = operators::random_game(rng).map_err(ContextError::InvalidPreviousDraw)?;
    let position = (0..NUMBER_COUNT)
        .map(|_| rng.random_range(1.0..6.0))
        .collect();
    Ok(HistoricalContext::new(
        frequency,
        previous_draw.numbers(),
        position,
    )?)
}

/// Picks a random game and returns it together with its full feature set as target.
///
/// The planted game has zero error against the returned target, so a search toward it
/// has a known optimum.
pub fn planted_target<R>(
    context: &HistoricalContext,
    rng: &mut R,
) -> Result<(Game, DesiredFeatures), GameError>
where
    R: Rng + ?Sized,
{
    let game = operators::random_game(rng)?;
    let desired = DesiredFeatures::from(FeatureSet::compute(&game, context));
    Ok((game, desired))
}

#[cfg(test)]
mod tests {
    use senafit_engine::SearchSeed;
    use senafit_evaluator::{Feature, FitnessEvaluator, TargetEvaluator};

    use super::*;

    #[test]
    fn test_random_context_ranges() {
        let mut rng = SearchSeed::from_u64(3).rng();
        let context = random_context(&mut rng).unwrap();
        assert!(context.frequency().iter().all(|f| (1..=99).contains(f)));
        assert!(context.position().iter().all(|p| (1.0..6.0).contains(p)));
    }

    #[test]
    fn test_planted_target_has_zero_error() {
        let mut rng = SearchSeed::from_u64(4).rng();
        let context = random_context(&mut rng).unwrap();
        let (game, desired) = planted_target(&context, &mut rng).unwrap();
        assert_eq!(desired.len(), Feature::COUNT);

        let evaluator = TargetEvaluator::new(&desired, &context);
        assert_eq!(evaluator.error(&game), 0.0);
    }

    #[test]
    fn test_same_seed_same_context() {
        let a = random_context(&mut SearchSeed::from_u64(5).rng()).unwrap();
        let b = random_context(&mut SearchSeed::from_u64(5).rng()).unwrap();
        assert_eq!(a, b);
    }
}
