//! Dense linear model, used both as a base learner and as the meta-learner.

use ndarray::ArrayView1;

/// `y = w . x + b` over a dense weight vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Number of input features (weight count).
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Dot product plus intercept. Callers check the input length.
    pub(crate) fn predict_unchecked(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn dot_plus_intercept() {
        let m = LinearModel::new(vec![2.0, -1.0, 0.5], 3.0);
        let y = m.predict_unchecked(array![1.0, 2.0, 4.0].view());
        assert_abs_diff_eq!(y, 2.0 - 2.0 + 2.0 + 3.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_model_is_intercept() {
        let m = LinearModel::new(vec![], 0.25);
        assert_abs_diff_eq!(m.predict_unchecked(array![].view()), 0.25);
    }
}
