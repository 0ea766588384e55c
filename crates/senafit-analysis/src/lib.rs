//! Historical data preparation and result checking for the search.
//!
//! The search itself only needs a [`HistoricalContext`] and a set of desired features.
//! This crate builds both from the data a user actually has:
//!
//! - **Draw archives** ([`history::DrawHistory`]): past official draws, oldest first,
//!   summarized into per-number frequency, average position and the previous draw
//! - **Synthetic data** ([`synthetic`]): random contexts and planted targets for
//!   demonstrations and experiments without real data
//! - **Hit checking** ([`hits`]): how many numbers of each generated game appeared in
//!   an actual draw
//!
//! # Example
//!
//! ```
//! use senafit_analysis::history::DrawHistory;
//! use senafit_engine::Game;
//!
//! let history = DrawHistory::new(vec![
//!     Game::new([1, 2, 3, 4, 5, 6])?,
//!     Game::new([4, 8, 15, 16, 23, 42])?,
//! ]);
//! let context = history.context(None)?;
//! assert_eq!(context.frequency_of(4), 2);
//! assert_eq!(context.previous_draw(), &Game::new([4, 8, 15, 16, 23, 42])?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use senafit_engine::ContextError;

#[cfg(doc)]
use senafit_engine::HistoricalContext;

pub mod history;
pub mod hits;
pub mod synthetic;

/// Errors building a historical context from data.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum HistoryError {
    #[display("draw history is empty: at least one draw is needed for the previous draw")]
    Empty,
    #[display("history window must keep at least one draw")]
    EmptyWindow,
    #[display("invalid historical context")]
    Context(ContextError),
}
