use serde::{Deserialize, Serialize};

use crate::{ContextError, GAME_SIZE, Game, NUMBER_COUNT};

/// Historical draw statistics consumed by the history-dependent features.
///
/// - `frequency[i]` - how many times number `i + 1` was drawn
/// - `previous_draw` - the most recent draw
/// - `position[i]` - average position (1 to 6, in sorted order) at which number `i + 1`
///   appeared
///
/// The context is validated on construction (including deserialization) and is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistoricalContext")]
pub struct HistoricalContext {
    frequency: Vec<u32>,
    previous_draw: Game,
    position: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RawHistoricalContext {
    frequency: Vec<u32>,
    previous_draw: Vec<u8>,
    position: Vec<f64>,
}

impl TryFrom<RawHistoricalContext> for HistoricalContext {
    type Error = ContextError;

    fn try_from(raw: RawHistoricalContext) -> Result<Self, Self::Error> {
        Self::new(raw.frequency, &raw.previous_draw, raw.position)
    }
}

impl HistoricalContext {
    /// Builds a context, checking that `frequency` and `position` have one entry per
    /// number and that `previous_draw` is a valid game.
    pub fn new(
        frequency: Vec<u32>,
        previous_draw: &[u8],
        position: Vec<f64>,
    ) -> Result<Self, ContextError> {
        check_length("frequency", NUMBER_COUNT, frequency.len())?;
        check_length("previous_draw", GAME_SIZE, previous_draw.len())?;
        check_length("position", NUMBER_COUNT, position.len())?;
        let previous_draw =
            Game::try_from(previous_draw).map_err(ContextError::InvalidPreviousDraw)?;
        if let Some(index) = position.iter().position(|p| !p.is_finite()) {
            return Err(ContextError::NonFinitePosition {
                number: number_at(index),
            });
        }
        Ok(Self {
            frequency,
            previous_draw,
            position,
        })
    }

    #[must_use]
    pub fn frequency(&self) -> &[u32] {
        &self.frequency
    }

    #[must_use]
    pub fn previous_draw(&self) -> &Game {
        &self.previous_draw
    }

    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Historical draw count of `number`.
    #[must_use]
    pub fn frequency_of(&self, number: u8) -> u32 {
        self.frequency[usize::from(number) - 1]
    }

    /// Average historical position of `number`.
    #[must_use]
    pub fn position_of(&self, number: u8) -> f64 {
        self.position[usize::from(number) - 1]
    }
}

fn check_length(field: &'static str, expected: usize, actual: usize) -> Result<(), ContextError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ContextError::WrongLength {
            field,
            expected,
            actual,
        })
    }
}

fn number_at(index: usize) -> u8 {
    u8::try_from(index + 1).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_position() -> Vec<f64> {
        vec![3.5; NUMBER_COUNT]
    }

    #[test]
    fn test_valid_context() {
        let frequency = (1..=60).collect::<Vec<u32>>();
        let context =
            HistoricalContext::new(frequency, &[10, 20, 30, 40, 50, 60], uniform_position())
                .unwrap();
        assert_eq!(context.frequency_of(1), 1);
        assert_eq!(context.frequency_of(60), 60);
        assert!((context.position_of(17) - 3.5).abs() < f64::EPSILON);
        assert_eq!(context.previous_draw().numbers(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_short_frequency_is_rejected() {
        let err = HistoricalContext::new(vec![1; 59], &[1, 2, 3, 4, 5, 6], uniform_position())
            .unwrap_err();
        assert_eq!(
            err,
            ContextError::WrongLength {
                field: "frequency",
                expected: 60,
                actual: 59,
            }
        );
        assert_eq!(
            err.to_string(),
            "historical context field `frequency` must have 60 entries, got 59"
        );
    }

    #[test]
    fn test_invalid_previous_draw_reports_cause_once() {
        let err = HistoricalContext::new(vec![0; 60], &[1, 1, 2, 3, 4, 5], uniform_position())
            .unwrap_err();
        assert_eq!(err.to_string(), "historical context has an invalid previous draw");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "number 1 appears more than once");
    }

    #[test]
    fn test_position_and_previous_draw_are_checked() {
        assert!(matches!(
            HistoricalContext::new(vec![0; 60], &[1, 2, 3, 4, 5, 6], vec![1.0; 61]),
            Err(ContextError::WrongLength {
                field: "position",
                ..
            })
        ));
        assert!(matches!(
            HistoricalContext::new(vec![0; 60], &[1, 2, 3, 4, 5], uniform_position()),
            Err(ContextError::WrongLength {
                field: "previous_draw",
                ..
            })
        ));
        assert!(matches!(
            HistoricalContext::new(vec![0; 60], &[1, 2, 3, 4, 5, 5], uniform_position()),
            Err(ContextError::InvalidPreviousDraw(_))
        ));

        let mut position = uniform_position();
        position[9] = f64::NAN;
        assert_eq!(
            HistoricalContext::new(vec![0; 60], &[1, 2, 3, 4, 5, 6], position),
            Err(ContextError::NonFinitePosition { number: 10 })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::json!({
            "frequency": vec![1; 60],
            "previous_draw": [6, 5, 4, 3, 2, 1],
            "position": vec![2.0; 60],
        });
        let context: HistoricalContext = serde_json::from_value(json).unwrap();
        assert_eq!(context.previous_draw().numbers(), &[1, 2, 3, 4, 5, 6]);

        let json = serde_json::json!({
            "frequency": vec![1; 59],
            "previous_draw": [1, 2, 3, 4, 5, 6],
            "position": vec![2.0; 60],
        });
        assert!(serde_json::from_value::<HistoricalContext>(json).is_err());
    }
}
