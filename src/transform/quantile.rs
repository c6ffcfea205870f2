//! Fitted empirical quantile transform.

use super::TransformError;

/// A fitted quantile transform.
///
/// Holds the sorted empirical breakpoints of the fitting distribution and the
/// matching reference grid (uniform in `[0, 1]` for the artifact sets this
/// system loads). Forward maps a raw value to its quantile rank by monotone
/// piecewise-linear interpolation; inverse interpolates the other way.
///
/// Values outside the fitted range clamp to the boundary rank, so the forward
/// output is always within the reference range.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileTransform {
    quantiles: Vec<f64>,
    references: Vec<f64>,
}

impl QuantileTransform {
    /// Builds a transform from fitted breakpoints and their reference ranks.
    ///
    /// # Errors
    ///
    /// Rejects fewer than two breakpoints, a length mismatch, or breakpoints /
    /// references that are not finite and non-decreasing.
    pub fn new(quantiles: Vec<f64>, references: Vec<f64>) -> Result<Self, TransformError> {
        if quantiles.len() < 2 {
            return Err(TransformError::TooFewQuantiles {
                got: quantiles.len(),
            });
        }
        if quantiles.len() != references.len() {
            return Err(TransformError::QuantileLenMismatch {
                quantiles: quantiles.len(),
                references: references.len(),
            });
        }
        for series in [&quantiles, &references] {
            for i in 0..series.len() {
                if !series[i].is_finite() || (i > 0 && series[i] < series[i - 1]) {
                    return Err(TransformError::UnsortedQuantiles { index: i });
                }
            }
        }
        Ok(Self {
            quantiles,
            references,
        })
    }

    /// Fits a transform on a sample, with a uniform `[0, 1]` reference grid.
    ///
    /// The breakpoints are the sorted sample values. Used by the synthetic
    /// artifact builders; production artifacts arrive pre-fitted.
    pub fn fit(mut sample: Vec<f64>) -> Result<Self, TransformError> {
        sample.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = sample.len();
        if n < 2 {
            return Err(TransformError::TooFewQuantiles { got: n });
        }
        let references = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        Self::new(sample, references)
    }

    /// Fitted breakpoints, sorted ascending.
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Reference ranks matching the breakpoints.
    pub fn references(&self) -> &[f64] {
        &self.references
    }

    /// Maps a raw value to its quantile rank.
    pub fn forward(&self, x: f64) -> f64 {
        interp(x, &self.quantiles, &self.references)
    }

    /// Maps a quantile rank back to the original scale.
    ///
    /// Exact inverse of [`forward`](Self::forward) within the fitted range, up
    /// to floating-point error, when the breakpoints are strictly increasing.
    pub fn inverse(&self, rank: f64) -> f64 {
        interp(rank, &self.references, &self.quantiles)
    }
}

/// Monotone piecewise-linear interpolation of `x` over `(xs, ys)`, clamping
/// outside the fitted range. `xs` is non-decreasing.
fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // partition_point: first index with xs[i] > x; x < xs[n-1] keeps it < n.
    let hi = xs.partition_point(|&q| q <= x);
    let lo = hi - 1;
    let (x0, x1) = (xs[lo], xs[hi]);
    let (y0, y1) = (ys[lo], ys[hi]);
    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn simple() -> QuantileTransform {
        QuantileTransform::new(vec![10.0, 20.0, 40.0], vec![0.0, 0.5, 1.0]).unwrap()
    }

    #[test]
    fn forward_interpolates() {
        let qt = simple();
        assert_abs_diff_eq!(qt.forward(10.0), 0.0);
        assert_abs_diff_eq!(qt.forward(15.0), 0.25);
        assert_abs_diff_eq!(qt.forward(20.0), 0.5);
        assert_abs_diff_eq!(qt.forward(30.0), 0.75);
        assert_abs_diff_eq!(qt.forward(40.0), 1.0);
    }

    #[test]
    fn forward_clamps_outside_range() {
        let qt = simple();
        assert_eq!(qt.forward(-5.0), 0.0);
        assert_eq!(qt.forward(1e9), 1.0);
    }

    #[test]
    fn forward_is_monotone() {
        let qt = simple();
        let mut prev = f64::NEG_INFINITY;
        let mut x = 5.0;
        while x < 45.0 {
            let y = qt.forward(x);
            assert!(y >= prev, "not monotone at x = {x}");
            prev = y;
            x += 0.5;
        }
    }

    #[test]
    fn inverse_round_trips() {
        let qt = simple();
        for &v in &[10.0, 12.5, 20.0, 33.3, 40.0] {
            assert_abs_diff_eq!(qt.inverse(qt.forward(v)), v, epsilon = 1e-12);
        }
    }

    #[test]
    fn fit_sorts_and_round_trips() {
        let qt = QuantileTransform::fit(vec![3.0, 1.0, 2.0, 5.0, 4.0]).unwrap();
        assert_eq!(qt.quantiles(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_abs_diff_eq!(qt.forward(3.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(qt.inverse(qt.forward(2.5)), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn tied_breakpoints_stay_finite() {
        let qt = QuantileTransform::new(vec![1.0, 1.0, 2.0], vec![0.0, 0.5, 1.0]).unwrap();
        let y = qt.forward(1.0);
        assert!(y.is_finite());
        assert!((0.0..=1.0).contains(&y));
    }

    #[test]
    fn construction_rejects_bad_input() {
        assert!(matches!(
            QuantileTransform::new(vec![1.0], vec![0.0]),
            Err(TransformError::TooFewQuantiles { got: 1 })
        ));
        assert!(matches!(
            QuantileTransform::new(vec![1.0, 2.0], vec![0.0]),
            Err(TransformError::QuantileLenMismatch { .. })
        ));
        assert!(matches!(
            QuantileTransform::new(vec![2.0, 1.0], vec![0.0, 1.0]),
            Err(TransformError::UnsortedQuantiles { index: 1 })
        ));
        assert!(matches!(
            QuantileTransform::new(vec![1.0, f64::NAN], vec![0.0, 1.0]),
            Err(TransformError::UnsortedQuantiles { index: 1 })
        ));
    }
}
