use proptest::prelude::*;
use rand::Rng;
use senafit_engine::{GAME_SIZE, Game, HistoricalContext, MAX_NUMBER, MIN_NUMBER, SearchSeed};
use senafit_evaluator::{
    DesiredFeatures, Feature, FeatureSet, FeatureValue, FitnessEvaluator, TargetEvaluator,
};
use senafit_training::{
    genetic::{Population, PopulationEvolver, elite_count, select_elites},
    operators::{crossover, mutate, random_game},
};

fn assert_valid(game: &Game) {
    let numbers = game.numbers();
    assert_eq!(numbers.len(), GAME_SIZE);
    assert!(numbers.is_sorted_by(|a, b| a < b), "{game} is not strictly sorted");
    assert!(numbers.iter().all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n)));
}

fn seeded_context(seed: u64) -> HistoricalContext {
    let mut rng = SearchSeed::from_u64(seed).rng();
    let frequency = (0..60).map(|_| rng.random_range(1..100)).collect();
    let previous = random_game(&mut rng).unwrap();
    let position = (0..60).map(|_| rng.random_range(1.0..6.0)).collect();
    HistoricalContext::new(frequency, previous.numbers(), position).unwrap()
}

proptest! {
    #[test]
    fn random_games_are_valid(seed in any::<u64>()) {
        let mut rng = SearchSeed::from_u64(seed).rng();
        for _ in 0..20 {
            assert_valid(&random_game(&mut rng).unwrap());
        }
    }

    #[test]
    fn crossover_draws_from_parents(seed in any::<u64>()) {
        let mut rng = SearchSeed::from_u64(seed).rng();
        let a = random_game(&mut rng).unwrap();
        let b = random_game(&mut rng).unwrap();
        let child = crossover(&a, &b, &mut rng).unwrap();
        assert_valid(&child);
        let union_size = GAME_SIZE * 2 - a.count_common(&b);
        if union_size >= GAME_SIZE {
            prop_assert!(child.iter().all(|n| a.contains(n) || b.contains(n)));
        }
    }

    #[test]
    fn mutation_changes_at_most_one_number(seed in any::<u64>(), rate in 0.0..=1.0f64) {
        let mut rng = SearchSeed::from_u64(seed).rng();
        let game = random_game(&mut rng).unwrap();
        let mutated = mutate(&game, rate, &mut rng).unwrap();
        assert_valid(&mutated);
        prop_assert!(mutated.count_common(&game) >= GAME_SIZE - 1);
    }

    #[test]
    fn mutation_rate_bounds(seed in any::<u64>()) {
        let mut rng = SearchSeed::from_u64(seed).rng();
        let game = random_game(&mut rng).unwrap();
        prop_assert_eq!(mutate(&game, 0.0, &mut rng).unwrap(), game);
        prop_assert_eq!(mutate(&game, 1.0, &mut rng).unwrap().count_common(&game), GAME_SIZE - 1);
    }

    #[test]
    fn range_and_sum_bounds(seed in any::<u64>()) {
        let context = seeded_context(seed);
        let mut rng = SearchSeed::from_u64(seed).rng();
        let game = random_game(&mut rng).unwrap();
        let features = FeatureSet::compute(&game, &context);

        let range = features.get(Feature::Range).as_scalar().unwrap();
        prop_assert_eq!(range, f64::from(game.highest() - game.lowest()));
        let sum = features.get(Feature::Sum).as_scalar().unwrap();
        prop_assert!((21.0..=345.0).contains(&sum));
    }

    #[test]
    fn own_features_give_zero_error(seed in any::<u64>()) {
        let context = seeded_context(seed);
        let mut rng = SearchSeed::from_u64(seed ^ 1).rng();
        let game = random_game(&mut rng).unwrap();
        let desired = DesiredFeatures::from(FeatureSet::compute(&game, &context));
        let evaluator = TargetEvaluator::new(&desired, &context);
        prop_assert_eq!(evaluator.error(&game), 0.0);
        prop_assert_eq!(evaluator.evaluate(&game).error, 0.0);
    }

    #[test]
    fn elites_are_the_best_games(seed in any::<u64>(), size in 10..80usize) {
        let context = seeded_context(seed);
        let desired = DesiredFeatures::new()
            .with(Feature::Mean, FeatureValue::Scalar(30.0))
            .unwrap();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let mut rng = SearchSeed::from_u64(seed).rng();
        let population = Population::random(size, &mut rng).unwrap();

        let elites = select_elites(&population, &evaluator, elite_count(size));
        prop_assert_eq!(elites.len(), size / 5);
        let worst_elite = evaluator.error(elites.last().unwrap());
        let better_outside = population
            .games()
            .iter()
            .filter(|g| !elites.contains(g))
            .any(|g| evaluator.error(g) < worst_elite);
        prop_assert!(!better_outside);
    }

    #[test]
    fn zero_generations_is_identity(seed in any::<u64>()) {
        let context = seeded_context(seed);
        let desired = DesiredFeatures::new()
            .with(Feature::Sum, FeatureValue::Scalar(150.0))
            .unwrap();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let mut rng = SearchSeed::from_u64(seed).rng();
        let population = Population::random(20, &mut rng).unwrap();
        let evolved = PopulationEvolver::default()
            .evolve(population.clone(), &evaluator, 0, &mut rng)
            .unwrap();
        prop_assert_eq!(evolved, population);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn evolution_does_not_lose_the_best_game(seed in any::<u64>()) {
        let context = seeded_context(seed);
        let desired = DesiredFeatures::new()
            .with(Feature::Sum, FeatureValue::Scalar(123.0))
            .unwrap();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let mut rng = SearchSeed::from_u64(seed).rng();
        let population = Population::random(50, &mut rng).unwrap();
        let initial_best = evaluator.error(&select_elites(&population, &evaluator, 1)[0]);

        let evolved = PopulationEvolver::default()
            .evolve(population, &evaluator, 50, &mut rng)
            .unwrap();
        prop_assert_eq!(evolved.len(), 50);
        for game in evolved.games() {
            assert_valid(game);
        }
        let final_best = evaluator.error(&select_elites(&evolved, &evaluator, 1)[0]);
        prop_assert!(final_best <= initial_best);
    }
}
