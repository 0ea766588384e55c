//! Draw archives and their summary as a historical context.
//!
//! A draw history is a JSON array of draws, oldest first:
//!
//! ```json
//! [[4, 8, 15, 16, 23, 42], [1, 7, 13, 30, 42, 60]]
//! ```
//!
//! Only the most recent draws (the analysis window) are summarized:
//!
//! - **frequency**: number of draws in the window containing each number
//! - **position**: average 1-based position of each number within its sorted draw;
//!   numbers never drawn get [`NEUTRAL_POSITION`]
//! - **previous draw**: the most recent draw

use senafit_engine::{Game, HistoricalContext, NUMBER_COUNT};
use serde::{Deserialize, Serialize};

use crate::HistoryError;

/// Default number of most recent draws summarized into a context.
pub const DEFAULT_WINDOW: usize = 200;

/// Position assigned to numbers that never appear in the window (middle of 1..=6).
pub const NEUTRAL_POSITION: f64 = 3.5;

/// Past draws in chronological order (oldest first).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawHistory {
    draws: Vec<Game>,
}

impl DrawHistory {
    #[must_use]
    pub fn new(draws: Vec<Game>) -> Self {
        Self { draws }
    }

    #[must_use]
    pub fn draws(&self) -> &[Game] {
        &self.draws
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Most recent draw.
    #[must_use]
    pub fn latest(&self) -> Option<&Game> {
        self.draws.last()
    }

    /// The `window` most recent draws, or all of them if `window` is `None` or larger
    /// than the history.
    #[must_use]
    pub fn recent(&self, window: Option<usize>) -> &[Game] {
        let keep = window.map_or(self.draws.len(), |w| w.min(self.draws.len()));
        &self.draws[self.draws.len() - keep..]
    }

    /// Summarizes the `window` most recent draws into a historical context.
    pub fn context(&self, window: Option<usize>) -> Result<HistoricalContext, HistoryError> {
        if window == Some(0) {
            return Err(HistoryError::EmptyWindow);
        }
        from_draws(self.recent(window))
    }
}

/// Summarizes `draws` (oldest first) into a historical context.
pub fn from_draws(draws: &[Game]) -> Result<HistoricalContext, HistoryError> {
    let previous_draw = draws.last().ok_or(HistoryError::Empty)?;

    let mut frequency = vec![0_u32; NUMBER_COUNT];
    let mut position_sum = vec![0_u32; NUMBER_COUNT];
    for draw in draws {
        for (position, number) in (1..).zip(draw.iter()) {
            let index = usize::from(number - 1);
            frequency[index] += 1;
            position_sum[index] += position;
        }
    }
    let position = frequency
        .iter()
        .zip(&position_sum)
        .map(|(&count, &sum)| {
            if count == 0 {
                NEUTRAL_POSITION
            } else {
                f64::from(sum) / f64::from(count)
            }
        })
        .collect();

    log::debug!(
        "Summarized {} draws; {} numbers never drawn",
        draws.len(),
        frequency.iter().filter(|&&c| c == 0).count()
    );
    Ok(HistoricalContext::new(
        frequency,
        previous_draw.numbers(),
        position,
    )?)
}
