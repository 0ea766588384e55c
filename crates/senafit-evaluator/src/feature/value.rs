use std::fmt;

use senafit_engine::{Game, HistoricalContext};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};

use super::{Arity, Feature};

/// Value of a feature: a single number or a fixed-length histogram.
///
/// In JSON a value is either a number or an array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl FeatureValue {
    #[must_use]
    pub fn arity(&self) -> Arity {
        match self {
            FeatureValue::Scalar(_) => Arity::Scalar,
            FeatureValue::Vector(values) => Arity::Vector(values.len()),
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureValue::Scalar(value) => Some(*value),
            FeatureValue::Vector(_) => None,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            FeatureValue::Scalar(value) => value.is_finite(),
            FeatureValue::Vector(values) => values.iter().all(|v| v.is_finite()),
        }
    }

    /// Sum of squared differences between `self` and `target`.
    ///
    /// Returns `None` when the two values have different shapes.
    #[must_use]
    pub fn squared_error(&self, target: &FeatureValue) -> Option<f64> {
        match (self, target) {
            (FeatureValue::Scalar(value), FeatureValue::Scalar(target)) => {
                Some((value - target).powi(2))
            }
            (FeatureValue::Vector(values), FeatureValue::Vector(targets))
                if values.len() == targets.len() =>
            {
                Some(
                    values
                        .iter()
                        .zip(targets)
                        .map(|(v, t)| (v - t).powi(2))
                        .sum(),
                )
            }
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Scalar(value) => write_number(f, *value),
            FeatureValue::Vector(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_number(f, *value)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{value}")
    } else {
        write!(f, "{value:.3}")
    }
}

/// All 20 feature values of one game, indexed by [`Feature`].
///
/// Serialized as a JSON object keyed by feature id, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    values: [FeatureValue; Feature::COUNT],
}

impl FeatureSet {
    /// Computes every feature of `game`.
    ///
    /// # Example
    ///
    /// ```
    /// use senafit_engine::{Game, HistoricalContext};
    /// use senafit_evaluator::{Feature, FeatureSet, FeatureValue};
    ///
    /// let context = HistoricalContext::new(vec![0; 60], &[1, 2, 3, 4, 5, 6], vec![1.0; 60])?;
    /// let game = Game::new([1, 2, 3, 4, 5, 6])?;
    /// let features = FeatureSet::compute(&game, &context);
    /// assert_eq!(features.get(Feature::Sum), &FeatureValue::Scalar(21.0));
    /// assert_eq!(features.get(Feature::RepeatPrev), &FeatureValue::Scalar(6.0));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn compute(game: &Game, context: &HistoricalContext) -> Self {
        Self {
            values: Feature::ALL.map(|feature| feature.compute(game, context)),
        }
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> &FeatureValue {
        &self.values[feature.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureValue)> + '_ {
        Feature::ALL.into_iter().zip(&self.values)
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Feature::COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.id(), value)?;
        }
        map.end()
    }
}
