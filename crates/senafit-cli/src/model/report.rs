use chrono::{DateTime, Utc};
use senafit_engine::{Game, SearchSeed};
use senafit_evaluator::DesiredFeatures;
use senafit_training::ranking::RankedGame;
use serde::{Deserialize, Serialize};

/// Parameters of a search run; together with the seed they reproduce the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub population: usize,
    pub generations: usize,
    pub elite_count: usize,
    pub mutation_rate: f64,
    pub top: usize,
    pub unique: bool,
    pub context: ContextSource,
}

/// Where the historical context of a run came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ContextSource {
    File { path: String },
    History { path: String, window: usize },
    Synthetic,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub seed: SearchSeed,
    pub params: SearchParams,
    pub target: DesiredFeatures,
    /// Game the target was computed from, when no target file was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planted: Option<Game>,
    pub ranked: Vec<RankedGame>,
}

/// The parts of a saved [`SearchReport`] needed to check it against a draw.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedReport {
    pub name: String,
    pub seed: SearchSeed,
    pub ranked: Vec<SavedGame>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SavedGame {
    pub rank: usize,
    pub game: Game,
}
