//! Process-lifetime artifact set.
//!
//! One load at startup deserializes every fitted object the pipeline needs.
//! The set is read-only afterwards; sequential requests share it without any
//! synchronization because nothing ever mutates it.

use std::path::Path;

use crate::features::Feature;
use crate::model::StackingRegressor;
use crate::persist::{self, LoadError};
use crate::transform::{FittedTransform, QuantileTransform};

/// Fixed artifact file names, one fitted object per file.
///
/// LCD, GSA and Density are always quantile transforms; Vf is always Box-Cox.
/// The Ktoluene file may hold either kind (the tag in the file decides), since
/// fitted artifact sets exist in both variants.
pub mod files {
    pub const STACKING_MODEL: &str = "stacking_model.json";
    pub const QT_LCD: &str = "qt_lcd.json";
    pub const VF_LAMBDA: &str = "vf_lambda.json";
    pub const QT_GSA: &str = "qt_gsa.json";
    pub const QT_DENSITY: &str = "qt_density.json";
    pub const QT_KTOLUENE: &str = "qt_ktoluene.json";
    pub const QT_TARGET: &str = "qt_target.json";
}

/// Every pre-fitted object the pipeline needs, loaded once.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    feature_transforms: [FittedTransform; Feature::COUNT],
    target: QuantileTransform,
    model: StackingRegressor,
}

impl ArtifactSet {
    /// Loads the full artifact set from a directory.
    ///
    /// # Errors
    ///
    /// Fails with a [`LoadError`] if any file is missing, corrupt, the wrong
    /// kind, or inconsistent with the five-feature contract. Nothing is
    /// usable on error.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let feature_transforms = [
            FittedTransform::Quantile(persist::load_quantile(&dir.join(files::QT_LCD))?),
            FittedTransform::BoxCox(persist::load_boxcox(&dir.join(files::VF_LAMBDA))?),
            FittedTransform::Quantile(persist::load_quantile(&dir.join(files::QT_GSA))?),
            FittedTransform::Quantile(persist::load_quantile(&dir.join(files::QT_DENSITY))?),
            persist::load_transform(&dir.join(files::QT_KTOLUENE))?,
        ];
        let target = persist::load_quantile(&dir.join(files::QT_TARGET))?;
        let model = persist::load_model(&dir.join(files::STACKING_MODEL))?;

        if model.n_features() != Feature::COUNT {
            return Err(LoadError::Validation(format!(
                "stacking model was fitted on {} features, this pipeline has {}",
                model.n_features(),
                Feature::COUNT
            )));
        }

        Ok(Self {
            feature_transforms,
            target,
            model,
        })
    }

    /// Builds a set from already-constructed parts. Used by the synthetic
    /// artifact builders and tests.
    pub fn from_parts(
        feature_transforms: [FittedTransform; Feature::COUNT],
        target: QuantileTransform,
        model: StackingRegressor,
    ) -> Result<Self, LoadError> {
        if model.n_features() != Feature::COUNT {
            return Err(LoadError::Validation(format!(
                "stacking model was fitted on {} features, this pipeline has {}",
                model.n_features(),
                Feature::COUNT
            )));
        }
        Ok(Self {
            feature_transforms,
            target,
            model,
        })
    }

    /// The fitted transform for one feature, in model-input order.
    pub fn transform_for(&self, feature: Feature) -> &FittedTransform {
        &self.feature_transforms[feature.index()]
    }

    /// Target-scale quantile transform (supports inverse).
    pub fn target(&self) -> &QuantileTransform {
        &self.target
    }

    /// The pre-fitted stacking regressor.
    pub fn model(&self) -> &StackingRegressor {
        &self.model
    }
}
