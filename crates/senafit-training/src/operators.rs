//! Genetic operators over games.
//!
//! These are the primitives used by [`PopulationEvolver`](crate::genetic::PopulationEvolver)
//! to build each generation:
//!
//! - **Initialization**: [`random_game`] samples a uniformly random game
//! - **Crossover**: [`crossover`] mixes the numbers of two parents
//! - **Mutation**: [`mutate`] replaces one number with probability `rate`
//!
//! Every operator builds its result through [`Game`]'s validating constructor. An
//! `Err` therefore means the operator itself is broken; the evolution loop reports it
//! as [`EvolutionError::Invariant`](crate::EvolutionError::Invariant) and aborts.
//!
//! # Design Decisions
//!
//! ## Union Crossover
//!
//! Games are sets, so position-based crossover (e.g. "first 3 numbers of one parent,
//! last 3 of the other") can produce duplicates and favors low numbers from one parent
//! and high numbers from the other. Instead, the child draws 6 numbers uniformly from
//! the union of both parents:
//!
//! - numbers shared by both parents are no more likely to survive than any other
//! - identical parents always produce the same game
//! - the union of two 6-number games always has 6 to 12 numbers; the random fill after
//!   sampling only guards the game size and never runs for valid parents
//!
//! ## Single-Number Mutation
//!
//! A mutation replaces exactly one number by a number not already in the game, so a
//! mutated game stays valid and differs from its source by one number.

use arrayvec::ArrayVec;
use rand::{
    Rng,
    seq::{IndexedRandom as _, index},
};
use senafit_engine::{GAME_SIZE, Game, GameError, MAX_NUMBER, MIN_NUMBER, NUMBER_COUNT};

/// Default probability that [`mutate`] changes a game.
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;

/// Samples 6 distinct numbers uniformly without replacement.
pub fn random_game<R>(rng: &mut R) -> Result<Game, GameError>
where
    R: Rng + ?Sized,
{
    let numbers = index::sample(rng, NUMBER_COUNT, GAME_SIZE)
        .into_iter()
        .map(|index| u8::try_from(index + 1).unwrap_or(0))
        .collect::<ArrayVec<u8, GAME_SIZE>>();
    Game::try_from(numbers.as_slice())
}

/// Combines two parents into a child.
///
/// The child is 6 numbers sampled uniformly without replacement from the union of the
/// parents' numbers, padded with fresh random numbers if the union is smaller than 6.
///
/// # Examples
///
/// ```
/// use senafit_engine::{Game, SearchSeed};
/// use senafit_training::operators;
///
/// let mut rng = SearchSeed::from_u64(1).rng();
/// let a = Game::new([1, 2, 3, 4, 5, 6])?;
/// let b = Game::new([7, 8, 9, 10, 11, 12])?;
///
/// let child = operators::crossover(&a, &b, &mut rng)?;
/// assert!(child.iter().all(|n| a.contains(n) || b.contains(n)));
///
/// // identical parents reproduce themselves
/// assert_eq!(operators::crossover(&a, &a, &mut rng)?, a);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn crossover<R>(a: &Game, b: &Game, rng: &mut R) -> Result<Game, GameError>
where
    R: Rng + ?Sized,
{
    let mut pool = a.iter().collect::<ArrayVec<u8, { 2 * GAME_SIZE }>>();
    pool.extend(b.iter().filter(|n| !a.contains(*n)));

    let mut child = if pool.len() > GAME_SIZE {
        pool.choose_multiple(rng, GAME_SIZE)
            .copied()
            .collect::<ArrayVec<u8, GAME_SIZE>>()
    } else {
        pool.into_iter().collect()
    };
    while !child.is_full() {
        let number = random_number(rng);
        if !child.contains(&number) {
            child.push(number);
        }
    }
    Game::try_from(child.as_slice())
}

/// With probability `rate`, replaces one uniformly chosen number of `game` by a random
/// number not already present. Otherwise returns `game` unchanged.
///
/// # Panics
///
/// Panics if `rate` is not in \[0, 1\].
/// [`PopulationEvolver::new`](crate::genetic::PopulationEvolver::new) validates the rate
/// up front.
pub fn mutate<R>(game: &Game, rate: f64, rng: &mut R) -> Result<Game, GameError>
where
    R: Rng + ?Sized,
{
    if !rng.random_bool(rate) {
        return Ok(*game);
    }
    let mut numbers = *game.numbers();
    let index = rng.random_range(0..GAME_SIZE);
    numbers[index] = loop {
        let number = random_number(rng);
        if !game.contains(number) {
            break number;
        }
    };
    Game::new(numbers)
}

fn random_number<R>(rng: &mut R) -> u8
where
    R: Rng + ?Sized,
{
    rng.random_range(MIN_NUMBER..=MAX_NUMBER)
}
