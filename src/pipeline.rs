//! Prediction pipeline: preprocess, infer, inverse-transform.
//!
//! One synchronous pass per request. Each input feature goes through its
//! fitted transform in the frozen model-input order, the transformed vector
//! feeds the stacking regressor, and the transformed-scale prediction maps
//! back to the original target scale through the target quantile transform's
//! inverse. Any failure aborts the request; no partial result is returned.

use ndarray::Array1;

use crate::artifacts::ArtifactSet;
use crate::features::{Feature, FeatureVector};
use crate::model::ShapeError;
use crate::transform::TransformError;

/// A single prediction request failed. Reported to the caller, never
/// suppressed; the next request starts clean.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    #[error("transform failed for {}: {source}", .feature.name())]
    Transform {
        feature: Feature,
        #[source]
        source: TransformError,
    },

    #[error("transformed value for {} is not finite ({value})", .feature.name())]
    NonFinite { feature: Feature, value: f64 },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("model output is not finite ({value})")]
    NonFiniteOutput { value: f64 },
}

/// Result of one successful prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The raw inputs the request ran with.
    pub inputs: FeatureVector,
    /// Transformed feature values in [`Feature::ORDER`].
    pub transformed: [f64; Feature::COUNT],
    /// Regressor output on the transformed target scale.
    pub transformed_scale: f64,
    /// Prediction mapped back to the original target scale.
    pub original_scale: f64,
}

/// The preprocessing-and-inference pipeline over a loaded artifact set.
///
/// Owns the artifacts immutably for the process lifetime; every call is a
/// pure function of the inputs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    artifacts: ArtifactSet,
}

impl Pipeline {
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Applies each feature's fitted transform in [`Feature::ORDER`].
    ///
    /// The output always has exactly [`Feature::COUNT`] finite values; a
    /// non-finite transform result is an error here, before the regressor
    /// ever sees the vector.
    pub fn transform_features(
        &self,
        inputs: &FeatureVector,
    ) -> Result<[f64; Feature::COUNT], PredictError> {
        let mut transformed = [0.0; Feature::COUNT];
        for (slot, feature) in transformed.iter_mut().zip(Feature::ORDER) {
            let value = self
                .artifacts
                .transform_for(feature)
                .forward(inputs.get(feature))
                .map_err(|source| PredictError::Transform { feature, source })?;
            if !value.is_finite() {
                return Err(PredictError::NonFinite { feature, value });
            }
            *slot = value;
        }
        Ok(transformed)
    }

    /// Runs one complete prediction: transform, infer, inverse-transform.
    pub fn predict(&self, inputs: &FeatureVector) -> Result<Prediction, PredictError> {
        let transformed = self.transform_features(inputs)?;
        let x = Array1::from_iter(transformed);

        let transformed_scale = self.artifacts.model().predict(x.view())?;
        if !transformed_scale.is_finite() {
            return Err(PredictError::NonFiniteOutput {
                value: transformed_scale,
            });
        }

        let original_scale = self.artifacts.target().inverse(transformed_scale);

        Ok(Prediction {
            inputs: *inputs,
            transformed,
            transformed_scale,
            original_scale,
        })
    }
}
