//! tsn-predict: preprocessing and inference for a pre-fitted TSN
//! adsorption-capacity stacking regressor.
//!
//! The crate loads a set of pre-fitted artifacts (per-feature quantile and
//! Box-Cox transforms, a two-layer stacking regressor, and a target-scale
//! quantile transform), applies them to five material-property inputs in a
//! frozen order, and reports the prediction on both the transformed and the
//! original target scale.
//!
//! # Key Types
//!
//! - [`ArtifactSet`] - every fitted object, loaded once, read-only afterwards
//! - [`Pipeline`] - transform, infer, inverse-transform for one request
//! - [`FeatureVector`] / [`Feature`] - the five inputs and their frozen order
//! - [`Prediction`] - both prediction scales plus the transformed vector
//!
//! # Quick Start
//!
//! ```ignore
//! use tsn_predict::{ArtifactSet, FeatureVector, Pipeline};
//!
//! let artifacts = ArtifactSet::load(std::path::Path::new("artifacts"))?;
//! let pipeline = Pipeline::new(artifacts);
//! let prediction = pipeline.predict(&FeatureVector::default())?;
//! println!("TSN = {:.4}", prediction.original_scale);
//! ```

// Re-export approx for users comparing predictions in tests.
pub use approx;

pub mod artifacts;
pub mod features;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod present;
pub mod testing;
pub mod transform;

pub use artifacts::ArtifactSet;
pub use features::{Feature, FeatureVector, InputError};
pub use model::{ShapeError, StackingRegressor};
pub use persist::LoadError;
pub use pipeline::{Pipeline, PredictError, Prediction};
pub use present::{contribution_assets, render_assets, render_report, AssetStatus, RequestState};
pub use transform::{boxcox, BoxCox, FittedTransform, QuantileTransform, TransformError};
