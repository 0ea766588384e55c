//! Comparison of generated games with an actual draw.

use senafit_engine::{GAME_SIZE, Game};
use senafit_stats::counts::bin_counts;
use serde::Serialize;

/// Number of matching numbers between one game and the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameHits {
    pub game: Game,
    pub hits: usize,
}

/// Hits of every game against one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitReport {
    pub draw: Game,
    pub games: Vec<GameHits>,
    /// `distribution[k]` is the number of games with exactly `k` hits.
    pub distribution: Vec<u32>,
}

impl HitReport {
    #[must_use]
    pub fn new<'a, I>(draw: Game, games: I) -> Self
    where
        I: IntoIterator<Item = &'a Game>,
    {
        let games = games
            .into_iter()
            .map(|game| GameHits {
                game: *game,
                hits: game.count_common(&draw),
            })
            .collect::<Vec<_>>();
        let distribution = bin_counts(games.iter().map(|g| g.hits), GAME_SIZE + 1, |hits| hits);
        Self {
            draw,
            games,
            distribution,
        }
    }

    /// Largest number of hits of any game.
    #[must_use]
    pub fn best(&self) -> Option<usize> {
        self.games.iter().map(|g| g.hits).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(numbers: [u8; 6]) -> Game {
        Game::new(numbers).unwrap()
    }

    #[test]
    fn test_hit_report() {
        let draw = game([4, 8, 15, 16, 23, 42]);
        let games = [
            game([4, 8, 15, 16, 23, 42]),
            game([1, 2, 3, 4, 5, 6]),
            game([8, 15, 50, 51, 52, 53]),
            game([1, 2, 3, 5, 6, 7]),
        ];
        let report = HitReport::new(draw, &games);
        let hits = report.games.iter().map(|g| g.hits).collect::<Vec<_>>();
        assert_eq!(hits, [6, 1, 2, 0]);
        assert_eq!(report.distribution, [1, 1, 1, 0, 0, 0, 1]);
        assert_eq!(report.best(), Some(6));
    }

    #[test]
    fn test_empty_report() {
        let report = HitReport::new(game([1, 2, 3, 4, 5, 6]), &Vec::new());
        assert!(report.games.is_empty());
        assert_eq!(report.distribution, [0; 7]);
        assert_eq!(report.best(), None);
    }
}
