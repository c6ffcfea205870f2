//! Input feature definitions.
//!
//! The model was fitted on five material properties in a fixed column order.
//! That order is frozen here as [`Feature::ORDER`] and checked at the pipeline
//! boundary; assembling the model input in any other order would silently
//! produce wrong predictions.

use serde::{Deserialize, Serialize};

/// One of the five material-property input features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Largest cavity diameter (Å).
    Lcd,
    /// Void fraction.
    Vf,
    /// Gravimetric surface area (m²/g).
    Gsa,
    /// Framework density (g/cm³).
    Density,
    /// Henry coefficient for toluene.
    Ktoluene,
}

impl Feature {
    /// Model-input column order, frozen at fit time.
    pub const ORDER: [Feature; 5] = [
        Feature::Lcd,
        Feature::Vf,
        Feature::Gsa,
        Feature::Density,
        Feature::Ktoluene,
    ];

    /// Number of input features.
    pub const COUNT: usize = Self::ORDER.len();

    /// Position of this feature in [`Feature::ORDER`].
    pub fn index(&self) -> usize {
        match self {
            Feature::Lcd => 0,
            Feature::Vf => 1,
            Feature::Gsa => 2,
            Feature::Density => 3,
            Feature::Ktoluene => 4,
        }
    }

    /// Display name as used in the original feature table.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Lcd => "LCD",
            Feature::Vf => "Vf",
            Feature::Gsa => "GSA",
            Feature::Density => "Density",
            Feature::Ktoluene => "Ktoluene",
        }
    }

    /// Inclusive valid input range `(min, max)` documented for this feature.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Feature::Lcd => (6.03338, 39.1106),
            Feature::Vf => (0.2574, 0.9182),
            Feature::Gsa => (204.912, 7061.42),
            Feature::Density => (0.237838, 2.86501),
            Feature::Ktoluene => (0.000027383, 28527.4),
        }
    }

    /// Default input value shown to the operator.
    pub fn default_value(&self) -> f64 {
        match self {
            Feature::Lcd => 8.33,
            Feature::Vf => 0.57,
            Feature::Gsa => 701.88,
            Feature::Density => 1.51,
            Feature::Ktoluene => 0.0135,
        }
    }
}

/// Input validation errors, raised before any transform runs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
    #[error("{} = {value} is not a finite number", .feature.name())]
    NotFinite { feature: Feature, value: f64 },

    #[error("{} = {value} is outside the valid range [{min}, {max}]", .feature.name())]
    OutOfRange {
        feature: Feature,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// The five raw input values, one per [`Feature`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub lcd: f64,
    pub vf: f64,
    pub gsa: f64,
    pub density: f64,
    pub ktoluene: f64,
}

impl FeatureVector {
    /// Builds a vector from values given in [`Feature::ORDER`].
    pub fn from_ordered(values: [f64; Feature::COUNT]) -> Self {
        Self {
            lcd: values[0],
            vf: values[1],
            gsa: values[2],
            density: values[3],
            ktoluene: values[4],
        }
    }

    /// Value of a single feature.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Lcd => self.lcd,
            Feature::Vf => self.vf,
            Feature::Gsa => self.gsa,
            Feature::Density => self.density,
            Feature::Ktoluene => self.ktoluene,
        }
    }

    /// Values in [`Feature::ORDER`].
    pub fn values_ordered(&self) -> [f64; Feature::COUNT] {
        Feature::ORDER.map(|f| self.get(f))
    }

    /// Checks every value is finite and within its documented range.
    pub fn validate(&self) -> Result<(), InputError> {
        for feature in Feature::ORDER {
            let value = self.get(feature);
            if !value.is_finite() {
                return Err(InputError::NotFinite { feature, value });
            }
            let (min, max) = feature.range();
            if value < min || value > max {
                return Err(InputError::OutOfRange {
                    feature,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::from_ordered(Feature::ORDER.map(|f| f.default_value()))
    }
}
