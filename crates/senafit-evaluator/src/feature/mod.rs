//! The 20 statistical features of a game.
//!
//! Features form a closed, ordered registry ([`Feature::ALL`]). Each entry has a fixed
//! identifier, a display name, an [`Arity`] and a compute function. Most features
//! depend only on the game; three also read the [`HistoricalContext`]:
//!
//! | # | id | arity | measures |
//! |---|----|-------|----------|
//! | 1 | `sum` | scalar | sum of the numbers |
//! | 2 | `mean` | scalar | arithmetic mean |
//! | 3 | `median` | scalar | mean of the 3rd and 4th numbers |
//! | 4 | `mode_hist` | scalar | highest historical frequency among the numbers |
//! | 5 | `range` | scalar | max - min |
//! | 6 | `std` | scalar | population standard deviation |
//! | 7 | `perc_even` | scalar | percentage of even numbers |
//! | 8 | `perc_odd` | scalar | percentage of odd numbers |
//! | 9 | `prime_freq` | scalar | percentage of primes |
//! | 10 | `quadrant_counts` | 4 | numbers in 1-15, 16-30, 31-45, 46-60 |
//! | 11 | `sequences` | scalar | consecutive pairs (gap of exactly 1) |
//! | 12 | `avg_distance` | scalar | mean gap between consecutive numbers |
//! | 13 | `min_distance` | scalar | smallest gap |
//! | 14 | `max_distance` | scalar | largest gap |
//! | 15 | `repeat_prev` | scalar | numbers shared with the previous draw |
//! | 16 | `avg_hist_freq` | scalar | mean historical frequency |
//! | 17 | `sum_digits` | scalar | sum of decimal digits |
//! | 18 | `last_digit_counts` | 10 | numbers per last digit 0-9 |
//! | 19 | `avg_hist_position` | scalar | mean historical position |
//! | 20 | `tens_group_counts` | 6 | numbers in 1-10, 11-20, ..., 51-60 |

use std::{fmt, str::FromStr};

use senafit_engine::{Game, HistoricalContext};
use senafit_stats::{
    counts::{bin_counts, count_where},
    descriptive::DescriptiveStats,
};
use serde::{Deserialize, Serialize};

use crate::fitness::TargetError;

pub use self::value::{FeatureSet, FeatureValue};

mod value;

const GAME_LEN: f64 = 6.0;

const PRIMES: [u8; 17] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59];

/// Shape of a feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Scalar,
    Vector(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Scalar => f.write_str("a single number"),
            Arity::Vector(len) => write!(f, "a list of {len} numbers"),
        }
    }
}

/// One of the 20 statistical features of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Sum,
    Mean,
    Median,
    ModeHist,
    Range,
    Std,
    PercEven,
    PercOdd,
    PrimeFreq,
    QuadrantCounts,
    Sequences,
    AvgDistance,
    MinDistance,
    MaxDistance,
    RepeatPrev,
    AvgHistFreq,
    SumDigits,
    LastDigitCounts,
    AvgHistPosition,
    TensGroupCounts,
}

impl Feature {
    pub const COUNT: usize = 20;

    /// All features in registry order.
    pub const ALL: [Feature; Self::COUNT] = [
        Feature::Sum,
        Feature::Mean,
        Feature::Median,
        Feature::ModeHist,
        Feature::Range,
        Feature::Std,
        Feature::PercEven,
        Feature::PercOdd,
        Feature::PrimeFreq,
        Feature::QuadrantCounts,
        Feature::Sequences,
        Feature::AvgDistance,
        Feature::MinDistance,
        Feature::MaxDistance,
        Feature::RepeatPrev,
        Feature::AvgHistFreq,
        Feature::SumDigits,
        Feature::LastDigitCounts,
        Feature::AvgHistPosition,
        Feature::TensGroupCounts,
    ];

    /// Position of this feature in [`Feature::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Feature::Sum => "sum",
            Feature::Mean => "mean",
            Feature::Median => "median",
            Feature::ModeHist => "mode_hist",
            Feature::Range => "range",
            Feature::Std => "std",
            Feature::PercEven => "perc_even",
            Feature::PercOdd => "perc_odd",
            Feature::PrimeFreq => "prime_freq",
            Feature::QuadrantCounts => "quadrant_counts",
            Feature::Sequences => "sequences",
            Feature::AvgDistance => "avg_distance",
            Feature::MinDistance => "min_distance",
            Feature::MaxDistance => "max_distance",
            Feature::RepeatPrev => "repeat_prev",
            Feature::AvgHistFreq => "avg_hist_freq",
            Feature::SumDigits => "sum_digits",
            Feature::LastDigitCounts => "last_digit_counts",
            Feature::AvgHistPosition => "avg_hist_position",
            Feature::TensGroupCounts => "tens_group_counts",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Sum => "Sum",
            Feature::Mean => "Mean",
            Feature::Median => "Median",
            Feature::ModeHist => "Historical Mode",
            Feature::Range => "Range",
            Feature::Std => "Standard Deviation",
            Feature::PercEven => "Even Percentage",
            Feature::PercOdd => "Odd Percentage",
            Feature::PrimeFreq => "Prime Percentage",
            Feature::QuadrantCounts => "Quadrant Counts",
            Feature::Sequences => "Sequences",
            Feature::AvgDistance => "Average Distance",
            Feature::MinDistance => "Minimum Distance",
            Feature::MaxDistance => "Maximum Distance",
            Feature::RepeatPrev => "Repeated From Previous Draw",
            Feature::AvgHistFreq => "Average Historical Frequency",
            Feature::SumDigits => "Sum of Digits",
            Feature::LastDigitCounts => "Last Digit Counts",
            Feature::AvgHistPosition => "Average Historical Position",
            Feature::TensGroupCounts => "Tens Group Counts",
        }
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Feature::QuadrantCounts => Arity::Vector(4),
            Feature::LastDigitCounts => Arity::Vector(10),
            Feature::TensGroupCounts => Arity::Vector(6),
            _ => Arity::Scalar,
        }
    }

    /// Returns `true` if the feature reads the historical context.
    #[must_use]
    pub const fn uses_history(self) -> bool {
        matches!(
            self,
            Feature::ModeHist | Feature::AvgHistFreq | Feature::AvgHistPosition
        )
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Computes this feature for `game`.
    #[must_use]
    pub fn compute(self, game: &Game, context: &HistoricalContext) -> FeatureValue {
        match self {
            Feature::Sum => scalar(game.iter().map(u32::from).sum::<u32>()),
            Feature::Mean => FeatureValue::Scalar(number_stats(game).mean),
            Feature::Median => FeatureValue::Scalar(number_stats(game).median),
            Feature::ModeHist => scalar(
                game.iter()
                    .map(|n| context.frequency_of(n))
                    .max()
                    .unwrap_or_default(),
            ),
            Feature::Range => scalar(game.highest() - game.lowest()),
            Feature::Std => FeatureValue::Scalar(number_stats(game).std_dev),
            Feature::PercEven => percent(count_where(game.iter(), |n| n % 2 == 0)),
            Feature::PercOdd => percent(count_where(game.iter(), |n| n % 2 == 1)),
            Feature::PrimeFreq => percent(count_where(game.iter(), |n| PRIMES.contains(n))),
            Feature::QuadrantCounts => histogram(game, 4, |n| usize::from((n - 1) / 15)),
            Feature::Sequences => scalar(count_where(game.gaps(), |gap| *gap == 1)),
            Feature::AvgDistance => {
                let gaps = game.gaps();
                FeatureValue::Scalar(gaps.iter().copied().map(f64::from).sum::<f64>() / 5.0)
            }
            Feature::MinDistance => scalar(game.gaps().into_iter().min().unwrap_or_default()),
            Feature::MaxDistance => scalar(game.gaps().into_iter().max().unwrap_or_default()),
            Feature::RepeatPrev => scalar(count_where(game.iter(), |n| {
                context.previous_draw().contains(*n)
            })),
            Feature::AvgHistFreq => FeatureValue::Scalar(
                game.iter()
                    .map(|n| f64::from(context.frequency_of(n)))
                    .sum::<f64>()
                    / GAME_LEN,
            ),
            Feature::SumDigits => scalar(game.iter().map(digit_sum).sum::<u32>()),
            Feature::LastDigitCounts => histogram(game, 10, |n| usize::from(n % 10)),
            Feature::AvgHistPosition => FeatureValue::Scalar(
                game.iter().map(|n| context.position_of(n)).sum::<f64>() / GAME_LEN,
            ),
            Feature::TensGroupCounts => histogram(game, 6, |n| usize::from((n - 1) / 10)),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Feature {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| TargetError::UnknownFeature { id: s.to_owned() })
    }
}

fn scalar<T>(value: T) -> FeatureValue
where
    f64: From<T>,
{
    FeatureValue::Scalar(f64::from(value))
}

fn percent(count: u32) -> FeatureValue {
    FeatureValue::Scalar(100.0 * f64::from(count) / GAME_LEN)
}

fn histogram<F>(game: &Game, bins: usize, bin_of: F) -> FeatureValue
where
    F: FnMut(u8) -> usize,
{
    FeatureValue::Vector(
        bin_counts(game.iter(), bins, bin_of)
            .into_iter()
            .map(f64::from)
            .collect(),
    )
}

fn number_stats(game: &Game) -> DescriptiveStats {
    let sorted = game.iter().map(f64::from).collect::<Vec<_>>();
    DescriptiveStats::from_sorted(&sorted).expect("a game is never empty")
}

fn digit_sum(number: u8) -> u32 {
    u32::from(number / 10 + number % 10)
}
