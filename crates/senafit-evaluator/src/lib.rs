//! Feature extraction and fitness evaluation for candidate games.
//!
//! This crate implements the objective of the search in two layers:
//!
//! 1. **Features** ([`feature`]) - 20 statistical measurements of a [`Game`], some of
//!    which also read the [`HistoricalContext`]. Values are either scalars or
//!    fixed-length histograms ([`FeatureValue`]).
//!
//! 2. **Fitness** ([`fitness`]) - compares a game's features with the caller's
//!    [`DesiredFeatures`] and produces a scalar error (lower is better).
//!
//! # Architecture
//!
//! ```text
//! Fitness Evaluation (error against desired features)
//!     ↓ uses
//! Feature Set (all 20 features of one game)
//!     ↓ uses
//! Feature Registry (one compute function per feature)
//! ```
//!
//! # Example
//!
//! ```
//! use senafit_engine::{Game, HistoricalContext};
//! use senafit_evaluator::{DesiredFeatures, Feature, FeatureValue, fitness};
//!
//! let context = HistoricalContext::new(vec![10; 60], &[1, 2, 3, 4, 5, 6], vec![3.5; 60])?;
//! let desired = DesiredFeatures::new().with(Feature::Sum, FeatureValue::Scalar(100.0))?;
//!
//! let game = Game::new([5, 10, 15, 20, 25, 30])?;
//! let evaluation = fitness::evaluate(&game, &desired, &context);
//! assert_eq!(evaluation.error, 25.0); // (105 - 100)²
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Current Limitations
//!
//! - **No normalization or weighting**: squared errors of all requested features are
//!   summed as-is, so features with large scales (e.g. `sum`, `avg_hist_freq`) dominate
//!   the error and bias the search toward matching them first.

pub use self::{
    feature::{Arity, Feature, FeatureSet, FeatureValue},
    fitness::{
        DesiredFeatures, Evaluation, FitnessEvaluator, TargetError, TargetEvaluator,
        UnknownFeaturePolicy,
    },
};

#[cfg(doc)]
use senafit_engine::{Game, HistoricalContext};

pub mod feature;
pub mod fitness;
