//! Fitted feature transforms.
//!
//! Each input feature is normalized by exactly one pre-fitted transform before
//! it reaches the regressor:
//!
//! - [`QuantileTransform`]: maps a value to its quantile rank within a fitted
//!   empirical distribution (forward and inverse).
//! - [`BoxCox`]: parametric power transform with a fitted lambda.
//!
//! Transforms are immutable once constructed; fitting happens elsewhere and the
//! parameters arrive through the persist layer.

pub mod boxcox;
pub mod quantile;

pub use boxcox::{boxcox, BoxCox};
pub use quantile::QuantileTransform;

/// Errors raised while constructing or applying a fitted transform.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransformError {
    /// Box-Cox requires a strictly positive input.
    #[error("box-cox transform requires x > 0, got {value} (lambda = {lambda})")]
    Domain { value: f64, lambda: f64 },

    #[error("box-cox lambda must be finite, got {lambda}")]
    InvalidLambda { lambda: f64 },

    #[error("quantile transform needs at least 2 breakpoints, got {got}")]
    TooFewQuantiles { got: usize },

    #[error("quantile breakpoints must be finite and non-decreasing (violated at index {index})")]
    UnsortedQuantiles { index: usize },

    #[error("quantile breakpoints ({quantiles}) and references ({references}) differ in length")]
    QuantileLenMismatch { quantiles: usize, references: usize },
}

/// A fitted transform of either kind, applied to one feature.
#[derive(Debug, Clone)]
pub enum FittedTransform {
    Quantile(QuantileTransform),
    BoxCox(BoxCox),
}

impl FittedTransform {
    /// Applies the forward transform.
    pub fn forward(&self, x: f64) -> Result<f64, TransformError> {
        match self {
            FittedTransform::Quantile(qt) => Ok(qt.forward(x)),
            FittedTransform::BoxCox(bc) => bc.forward(x),
        }
    }

    /// Short kind name, used in reports and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FittedTransform::Quantile(_) => "quantile",
            FittedTransform::BoxCox(_) => "box_cox",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_transform_dispatches() {
        let qt = QuantileTransform::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let bc = BoxCox::new(0.0).unwrap();
        assert_eq!(FittedTransform::Quantile(qt).forward(0.5).unwrap(), 0.5);
        assert_eq!(FittedTransform::BoxCox(bc).forward(1.0).unwrap(), 0.0);
    }

    #[test]
    fn kind_names_match_schema_tags() {
        let qt = QuantileTransform::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(FittedTransform::Quantile(qt).kind(), "quantile");
        let bc = BoxCox::new(0.5).unwrap();
        assert_eq!(FittedTransform::BoxCox(bc).kind(), "box_cox");
    }
}
