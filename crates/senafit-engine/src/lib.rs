//! Core data types for the senafit search.
//!
//! This crate defines the values every other senafit crate passes around:
//!
//! - [`Game`] - a candidate combination of 6 distinct numbers in \[1, 60\], kept sorted
//! - [`HistoricalContext`] - read-only historical draw statistics consumed by some features
//! - [`SearchSeed`] / [`SearchRng`] - the explicit, reproducible random source threaded
//!   through every randomized operation
//!
//! All constructors validate their invariants, so a value of one of these types is
//! always well formed. Invalid input is reported through [`GameError`] or
//! [`ContextError`].

pub use self::{context::*, game::*, seed::*};

mod context;
mod game;
mod seed;

/// Smallest number that can appear in a game.
pub const MIN_NUMBER: u8 = 1;
/// Largest number that can appear in a game.
pub const MAX_NUMBER: u8 = 60;
/// Count of distinct numbers a game can be drawn from.
pub const NUMBER_COUNT: usize = MAX_NUMBER as usize;
/// Count of numbers in a game.
pub const GAME_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("game must have 6 numbers, got {actual}")]
    WrongLength { actual: usize },
    #[display("number {number} is outside [1, 60]")]
    OutOfRange { number: u8 },
    #[display("number {number} appears more than once")]
    Duplicate { number: u8 },
    #[display("invalid number {token:?}")]
    Parse { token: String },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ContextError {
    #[display("historical context field `{field}` must have {expected} entries, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display("historical context has an invalid previous draw")]
    InvalidPreviousDraw(GameError),
    #[display("historical position of number {number} is not finite")]
    NonFinitePosition { number: u8 },
}
