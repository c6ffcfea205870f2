//! Box-Cox power transform with a fitted lambda.

use super::TransformError;

/// Box-Cox transform of a single value with a fixed lambda.
///
/// `y = (x^lambda - 1) / lambda` for `lambda != 0`, `y = ln(x)` at `lambda = 0`.
/// The input must be strictly positive.
///
/// # Errors
///
/// Returns [`TransformError::Domain`] for `x <= 0` (including NaN).
pub fn boxcox(x: f64, lambda: f64) -> Result<f64, TransformError> {
    if !(x > 0.0) {
        return Err(TransformError::Domain { value: x, lambda });
    }
    if lambda == 0.0 {
        Ok(x.ln())
    } else {
        Ok((x.powf(lambda) - 1.0) / lambda)
    }
}

/// A fitted Box-Cox transformer wrapping a lambda scalar.
///
/// Exposes the same semantics as the free [`boxcox`] function; the two must
/// agree exactly for any lambda and input. The wrapper exists because some
/// artifact sets persist the fitted transformer object while others persist
/// the bare lambda.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCox {
    lambda: f64,
}

impl BoxCox {
    /// Wraps a fitted lambda.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidLambda`] if `lambda` is not finite.
    pub fn new(lambda: f64) -> Result<Self, TransformError> {
        if !lambda.is_finite() {
            return Err(TransformError::InvalidLambda { lambda });
        }
        Ok(Self { lambda })
    }

    /// The fitted power parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Applies the transform. Same contract as [`boxcox`].
    pub fn forward(&self, x: f64) -> Result<f64, TransformError> {
        boxcox(x, self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lambda_zero_is_ln() {
        for &x in &[0.1, 1.0, 2.718281828459045, 1000.0] {
            assert_abs_diff_eq!(boxcox(x, 0.0).unwrap(), x.ln(), epsilon = 1e-15);
        }
    }

    #[test]
    fn lambda_one_is_shift() {
        assert_abs_diff_eq!(boxcox(3.0, 1.0).unwrap(), 2.0, epsilon = 1e-15);
    }

    #[test]
    fn small_lambda_approaches_ln() {
        // The lambda != 0 branch must be continuous with ln at lambda -> 0.
        let x = 7.5;
        let near = boxcox(x, 1e-8).unwrap();
        assert_abs_diff_eq!(near, x.ln(), epsilon = 1e-6);
    }

    #[test]
    fn nonpositive_input_is_domain_error() {
        for &x in &[0.0, -1.0, -1e-9] {
            assert!(matches!(
                boxcox(x, 0.5),
                Err(TransformError::Domain { .. })
            ));
        }
    }

    #[test]
    fn nan_input_is_domain_error() {
        assert!(matches!(
            boxcox(f64::NAN, 0.5),
            Err(TransformError::Domain { .. })
        ));
    }

    #[test]
    fn wrapper_matches_free_fn() {
        // The fitted-object variant and the raw-lambda variant must be
        // numerically identical, not just close.
        for &lambda in &[-1.0, -0.123, 0.0, 0.271, 1.0, 2.5] {
            let bc = BoxCox::new(lambda).unwrap();
            for &x in &[0.000027383, 0.013545, 0.5726, 1.0, 42.0, 28527.4] {
                assert_eq!(bc.forward(x).unwrap(), boxcox(x, lambda).unwrap());
            }
        }
    }

    #[test]
    fn non_finite_lambda_rejected() {
        assert!(BoxCox::new(f64::NAN).is_err());
        assert!(BoxCox::new(f64::INFINITY).is_err());
    }

    #[test]
    fn documented_ktoluene_bounds_transform() {
        let bc = BoxCox::new(0.0421).unwrap();
        assert!(bc.forward(0.000027383).unwrap().is_finite());
        assert!(bc.forward(28527.4).unwrap().is_finite());
    }
}
