//! Fitness evaluation: how far a game is from the desired features.
//!
//! The error of a game is the sum, over every feature present in the
//! [`DesiredFeatures`], of the squared difference between the computed value and the
//! target (summed elementwise for histogram features):
//!
//! ```text
//! error = Σ (computed_f - target_f)²    for f in desired
//! ```
//!
//! Lower is better and zero means every requested feature matches exactly. Features
//! that are not requested do not contribute.
//!
//! # Design: No Weighting
//!
//! Errors are summed without normalization or per-feature weights. Features with large
//! numeric ranges (e.g. `sum`, `avg_hist_freq`) therefore dominate the error of
//! features with small ranges (e.g. `sequences`). Callers that want balanced targets
//! should request features with comparable scales.
//!
//! # Validation
//!
//! Targets are validated when they are added to [`DesiredFeatures`]: a target whose
//! shape disagrees with the feature's [`Arity`] is rejected with
//! [`TargetError::ShapeMismatch`]. Evaluation itself therefore cannot fail.

use std::{collections::BTreeMap, fmt};

use senafit_engine::{Game, HistoricalContext};
use serde::{Deserialize, Serialize, Serializer};

use crate::feature::{Arity, Feature, FeatureSet, FeatureValue};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TargetError {
    #[display("unknown feature {id:?}")]
    UnknownFeature { id: String },
    #[display("target for `{feature}` must be {expected}, got {actual}")]
    ShapeMismatch {
        feature: Feature,
        expected: Arity,
        actual: Arity,
    },
    #[display("target for `{feature}` contains a non-finite number")]
    NonFinite { feature: Feature },
}

/// How [`DesiredFeatures::from_raw`] treats keys that are not feature ids.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFeaturePolicy {
    /// Skip unknown keys, logging a warning.
    #[default]
    Ignore,
    /// Fail with [`TargetError::UnknownFeature`].
    Reject,
}

/// Validated target values for a subset of the features.
///
/// Serialized as a JSON object keyed by feature id. Deserializing uses
/// [`UnknownFeaturePolicy::Ignore`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, FeatureValue>")]
pub struct DesiredFeatures {
    targets: BTreeMap<Feature, FeatureValue>,
}

impl DesiredFeatures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, feature: Feature, target: FeatureValue) -> Result<Self, TargetError> {
        self.insert(feature, target)?;
        Ok(self)
    }

    /// Sets the target for `feature`, returning the previous one.
    pub fn insert(
        &mut self,
        feature: Feature,
        target: FeatureValue,
    ) -> Result<Option<FeatureValue>, TargetError> {
        let expected = feature.arity();
        let actual = target.arity();
        if expected != actual {
            return Err(TargetError::ShapeMismatch {
                feature,
                expected,
                actual,
            });
        }
        if !target.is_finite() {
            return Err(TargetError::NonFinite { feature });
        }
        Ok(self.targets.insert(feature, target))
    }

    /// Builds targets from a map keyed by feature id, as read from a target file.
    pub fn from_raw(
        raw: BTreeMap<String, FeatureValue>,
        policy: UnknownFeaturePolicy,
    ) -> Result<Self, TargetError> {
        let mut desired = Self::new();
        for (id, target) in raw {
            match (Feature::from_id(&id), policy) {
                (Some(feature), _) => {
                    desired.insert(feature, target)?;
                }
                (None, UnknownFeaturePolicy::Ignore) => {
                    log::warn!("Ignoring unknown feature {id:?} in desired features");
                }
                (None, UnknownFeaturePolicy::Reject) => {
                    return Err(TargetError::UnknownFeature { id });
                }
            }
        }
        Ok(desired)
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> Option<&FeatureValue> {
        self.targets.get(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureValue)> + '_ {
        self.targets.iter().map(|(feature, target)| (*feature, target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Error of a fully computed feature set against these targets.
    ///
    /// Per-feature squared errors are summed without weighting or normalization, so
    /// large-magnitude features such as `sum` dominate the total.
    #[must_use]
    pub fn error(&self, features: &FeatureSet) -> f64 {
        self.iter()
            .map(|(feature, target)| feature_error(feature, features.get(feature), target))
            .sum()
    }
}

impl Serialize for DesiredFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter().map(|(feature, target)| (feature.id(), target)))
    }
}

impl TryFrom<BTreeMap<String, FeatureValue>> for DesiredFeatures {
    type Error = TargetError;

    fn try_from(raw: BTreeMap<String, FeatureValue>) -> Result<Self, Self::Error> {
        Self::from_raw(raw, UnknownFeaturePolicy::Ignore)
    }
}

/// Targets every feature at the values of `features`.
impl From<FeatureSet> for DesiredFeatures {
    fn from(features: FeatureSet) -> Self {
        Self {
            targets: features
                .iter()
                .map(|(feature, value)| (feature, value.clone()))
                .collect(),
        }
    }
}

fn feature_error(feature: Feature, value: &FeatureValue, target: &FeatureValue) -> f64 {
    value
        .squared_error(target)
        .unwrap_or_else(|| unreachable!("target shape of `{feature}` is validated on insert"))
}

/// Result of evaluating one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Sum of squared errors over the desired features (lower is better).
    pub error: f64,
    /// All computed features of the game.
    pub features: FeatureSet,
}

/// Scores games for the genetic search.
///
/// Implementations must be deterministic and free of side effects: the search may
/// evaluate games in any order and from several threads.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Computes the error and full feature set of `game`.
    fn evaluate(&self, game: &Game) -> Evaluation;

    /// Computes only the error of `game`.
    ///
    /// Must agree with `self.evaluate(game).error`.
    fn error(&self, game: &Game) -> f64 {
        self.evaluate(game).error
    }
}

/// Evaluates games against desired features within one historical context.
#[derive(Debug, Clone, Copy)]
pub struct TargetEvaluator<'a> {
    desired: &'a DesiredFeatures,
    context: &'a HistoricalContext,
}

impl<'a> TargetEvaluator<'a> {
    #[must_use]
    pub fn new(desired: &'a DesiredFeatures, context: &'a HistoricalContext) -> Self {
        Self { desired, context }
    }
}

impl FitnessEvaluator for TargetEvaluator<'_> {
    fn evaluate(&self, game: &Game) -> Evaluation {
        evaluate(game, self.desired, self.context)
    }

    // only the requested features are computed
    fn error(&self, game: &Game) -> f64 {
        self.desired
            .iter()
            .map(|(feature, target)| {
                feature_error(feature, &feature.compute(game, self.context), target)
            })
            .sum()
    }
}

/// Computes the full feature set of `game` and its error against `desired`.
#[must_use]
pub fn evaluate(game: &Game, desired: &DesiredFeatures, context: &HistoricalContext) -> Evaluation {
    let features = FeatureSet::compute(game, context);
    let error = desired.error(&features);
    Evaluation { error, features }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> HistoricalContext {
        let frequency = (0..60).map(|i| i % 7 + 3).collect::<Vec<u32>>();
        let position = (0..60).map(|i| 1.0 + f64::from(i % 50) / 10.0).collect();
        HistoricalContext::new(frequency, &[5, 12, 18, 33, 47, 51], position).unwrap()
    }

    fn game(numbers: [u8; 6]) -> Game {
        Game::new(numbers).unwrap()
    }

    #[test]
    fn test_empty_target_has_zero_error() {
        let evaluation = evaluate(&game([1, 2, 3, 4, 5, 6]), &DesiredFeatures::new(), &context());
        assert_eq!(evaluation.error, 0.0);
    }

    #[test]
    fn test_scalar_and_vector_errors_add_up() {
        let desired = DesiredFeatures::new()
            .with(Feature::Sum, FeatureValue::Scalar(100.0))
            .unwrap()
            .with(Feature::QuadrantCounts, FeatureValue::Vector(vec![2.0, 2.0, 1.0, 1.0]))
            .unwrap();
        // sum 99, quadrants [3, 1, 1, 1]
        let evaluation = evaluate(&game([1, 2, 3, 16, 31, 46]), &desired, &context());
        assert_eq!(evaluation.error, 1.0 + 2.0);
    }

    #[test]
    fn test_self_target_has_zero_error() {
        let context = context();
        for numbers in [[1, 2, 3, 4, 5, 6], [7, 19, 23, 38, 44, 60], [2, 11, 29, 30, 31, 59]] {
            let game = game(numbers);
            let desired = DesiredFeatures::from(FeatureSet::compute(&game, &context));
            assert_eq!(desired.len(), Feature::COUNT);
            let evaluator = TargetEvaluator::new(&desired, &context);
            assert_eq!(evaluator.evaluate(&game).error, 0.0);
            assert_eq!(evaluator.error(&game), 0.0);
        }
    }

    #[test]
    fn test_error_shortcut_agrees_with_evaluate() {
        let context = context();
        let desired = DesiredFeatures::new()
            .with(Feature::Std, FeatureValue::Scalar(12.0))
            .unwrap()
            .with(Feature::AvgHistFreq, FeatureValue::Scalar(5.0))
            .unwrap()
            .with(Feature::LastDigitCounts, FeatureValue::Vector(vec![1.0; 10]))
            .unwrap();
        let evaluator = TargetEvaluator::new(&desired, &context);
        let game = game([3, 17, 22, 36, 48, 55]);
        let full = evaluator.evaluate(&game).error;
        assert!((full - evaluator.error(&game)).abs() < 1e-9);
        assert!(full > 0.0);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let err = DesiredFeatures::new()
            .with(Feature::QuadrantCounts, FeatureValue::Vector(vec![1.0; 6]))
            .unwrap_err();
        assert_eq!(
            err,
            TargetError::ShapeMismatch {
                feature: Feature::QuadrantCounts,
                expected: Arity::Vector(4),
                actual: Arity::Vector(6),
            }
        );
        assert_eq!(
            err.to_string(),
            "target for `quadrant_counts` must be a list of 4 numbers, got a list of 6 numbers"
        );

        assert!(matches!(
            DesiredFeatures::new().with(Feature::Sum, FeatureValue::Vector(vec![1.0])),
            Err(TargetError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            DesiredFeatures::new().with(Feature::TensGroupCounts, FeatureValue::Scalar(1.0)),
            Err(TargetError::ShapeMismatch { .. })
        ));
        assert_eq!(
            DesiredFeatures::new().with(Feature::Mean, FeatureValue::Scalar(f64::NAN)),
            Err(TargetError::NonFinite {
                feature: Feature::Mean
            })
        );
    }

    #[test]
    fn test_unknown_feature_policy() {
        let raw: BTreeMap<String, FeatureValue> = serde_json::from_str(
            r#"{ "sum": 123, "mirror_numbers": 2, "tens_group_counts": [1, 1, 1, 1, 1, 1] }"#,
        )
        .unwrap();

        let lenient = DesiredFeatures::from_raw(raw.clone(), UnknownFeaturePolicy::Ignore).unwrap();
        assert_eq!(lenient.len(), 2);
        assert_eq!(lenient.get(Feature::Sum), Some(&FeatureValue::Scalar(123.0)));

        assert_eq!(
            DesiredFeatures::from_raw(raw, UnknownFeaturePolicy::Reject),
            Err(TargetError::UnknownFeature {
                id: "mirror_numbers".to_owned()
            })
        );
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let desired: DesiredFeatures =
            serde_json::from_str(r#"{ "sum": 150, "quadrant_counts": [2, 2, 1, 1] }"#).unwrap();
        assert_eq!(desired.len(), 2);

        assert!(serde_json::from_str::<DesiredFeatures>(r#"{ "quadrant_counts": 3 }"#).is_err());

        let json = serde_json::to_value(&desired).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sum": 150.0, "quadrant_counts": [2.0, 2.0, 1.0, 1.0] })
        );
    }
}
