use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{GAME_SIZE, GameError, MAX_NUMBER, MIN_NUMBER};

/// A candidate combination: 6 pairwise distinct numbers in \[1, 60\] in ascending order.
///
/// A `Game` can only be built through validating constructors, so every value upholds
/// the invariant. Games are immutable; genetic operators always produce new values.
///
/// # Example
///
/// ```
/// use senafit_engine::Game;
///
/// let game = Game::new([42, 7, 13, 1, 60, 30]).unwrap();
/// assert_eq!(game.numbers(), &[1, 7, 13, 30, 42, 60]);
/// assert_eq!(game.to_string(), "01 07 13 30 42 60");
///
/// let parsed: Game = "1,7,13,30,42,60".parse().unwrap();
/// assert_eq!(parsed, game);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Game([u8; GAME_SIZE]);

impl Game {
    /// Builds a game from 6 numbers in any order.
    pub fn new(mut numbers: [u8; GAME_SIZE]) -> Result<Self, GameError> {
        numbers.sort_unstable();
        if let Some(&number) = numbers
            .iter()
            .find(|n| !(MIN_NUMBER..=MAX_NUMBER).contains(*n))
        {
            return Err(GameError::OutOfRange { number });
        }
        if let Some(pair) = numbers.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GameError::Duplicate { number: pair[0] });
        }
        Ok(Self(numbers))
    }

    #[must_use]
    pub fn numbers(&self) -> &[u8; GAME_SIZE] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }

    #[must_use]
    pub fn lowest(&self) -> u8 {
        self.0[0]
    }

    #[must_use]
    pub fn highest(&self) -> u8 {
        self.0[GAME_SIZE - 1]
    }

    /// Returns the 5 differences between consecutive numbers.
    #[must_use]
    pub fn gaps(&self) -> [u8; GAME_SIZE - 1] {
        let mut gaps = [0; GAME_SIZE - 1];
        for (gap, pair) in gaps.iter_mut().zip(self.0.windows(2)) {
            *gap = pair[1] - pair[0];
        }
        gaps
    }

    /// Counts how many numbers this game shares with `other`.
    #[must_use]
    pub fn count_common(&self, other: &Game) -> usize {
        self.iter().filter(|n| other.contains(*n)).count()
    }
}

impl TryFrom<&[u8]> for Game {
    type Error = GameError;

    fn try_from(numbers: &[u8]) -> Result<Self, Self::Error> {
        let numbers = <[u8; GAME_SIZE]>::try_from(numbers).map_err(|_| GameError::WrongLength {
            actual: numbers.len(),
        })?;
        Self::new(numbers)
    }
}

impl TryFrom<Vec<u8>> for Game {
    type Error = GameError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(numbers.as_slice())
    }
}

impl From<Game> for Vec<u8> {
    fn from(game: Game) -> Self {
        game.0.to_vec()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{n:02}")?;
        }
        Ok(())
    }
}

/// Parses numbers separated by commas and/or whitespace.
impl FromStr for Game {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u8>().map_err(|_| GameError::Parse {
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_numbers() {
        let game = Game::new([60, 1, 30, 2, 45, 15]).unwrap();
        assert_eq!(game.numbers(), &[1, 2, 15, 30, 45, 60]);
        assert_eq!(game.lowest(), 1);
        assert_eq!(game.highest(), 60);
    }

    #[test]
    fn test_new_rejects_invalid_numbers() {
        assert_eq!(
            Game::new([0, 1, 2, 3, 4, 5]),
            Err(GameError::OutOfRange { number: 0 })
        );
        assert_eq!(
            Game::new([1, 2, 3, 4, 5, 61]),
            Err(GameError::OutOfRange { number: 61 })
        );
        assert_eq!(
            Game::new([1, 2, 3, 3, 5, 6]),
            Err(GameError::Duplicate { number: 3 })
        );
    }

    #[test]
    fn test_try_from_slice_checks_length() {
        assert_eq!(
            Game::try_from(&[1, 2, 3, 4, 5][..]),
            Err(GameError::WrongLength { actual: 5 })
        );
        assert!(Game::try_from(&[1, 2, 3, 4, 5, 6][..]).is_ok());
    }

    #[test]
    fn test_gaps_and_common() {
        let game = Game::new([1, 2, 10, 20, 21, 60]).unwrap();
        assert_eq!(game.gaps(), [1, 8, 10, 1, 39]);

        let other = Game::new([2, 3, 20, 40, 50, 60]).unwrap();
        assert_eq!(game.count_common(&other), 3);
        assert_eq!(game.count_common(&game), GAME_SIZE);
    }

    #[test]
    fn test_parse_and_display() {
        let game: Game = "5, 10 15,20 25 30".parse().unwrap();
        assert_eq!(game.numbers(), &[5, 10, 15, 20, 25, 30]);
        assert_eq!(game.to_string(), "05 10 15 20 25 30");
        assert_eq!(game.to_string().parse::<Game>().unwrap(), game);

        assert!(matches!(
            "1,2,x,4,5,6".parse::<Game>(),
            Err(GameError::Parse { .. })
        ));
    }

    #[test]
    fn test_serde_validates() {
        let game: Game = serde_json::from_str("[6, 5, 4, 3, 2, 1]").unwrap();
        assert_eq!(serde_json::to_string(&game).unwrap(), "[1,2,3,4,5,6]");

        assert!(serde_json::from_str::<Game>("[1, 1, 2, 3, 4, 5]").is_err());
        assert!(serde_json::from_str::<Game>("[1, 2, 3]").is_err());
    }
}
