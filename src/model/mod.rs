//! Pre-fitted stacking regressor.
//!
//! The regressor is a two-layer ensemble: a set of base learners whose outputs
//! feed a linear meta-learner. The pipeline treats it as an opaque function
//! from a fixed-length feature vector to one scalar; nothing outside this
//! module inspects the layers.
//!
//! Models are immutable once constructed and arrive pre-fitted through the
//! persist layer. There is no training code in this crate.

pub mod forest;
pub mod linear;

pub use forest::{Forest, Tree};
pub use linear::LinearModel;

use ndarray::ArrayView1;

/// Structural mismatch between a model and the vector handed to it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShapeError {
    #[error("input vector has {got} features, model expects {expected}")]
    InputLen { expected: usize, got: usize },

    #[error("meta-learner takes {meta_inputs} inputs but there are {base_learners} base learners")]
    MetaArity {
        meta_inputs: usize,
        base_learners: usize,
    },

    #[error("base learner {index} expects {got} features, model expects {expected}")]
    BaseLearnerArity {
        index: usize,
        expected: usize,
        got: usize,
    },
}

/// A first-layer learner of the stack.
#[derive(Debug, Clone)]
pub enum BaseLearner {
    /// Decision-tree ensemble.
    Forest(Forest),
    /// Dense linear model.
    Linear(LinearModel),
}

impl BaseLearner {
    /// Number of input features the learner was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            BaseLearner::Forest(f) => f.n_features(),
            BaseLearner::Linear(l) => l.n_features(),
        }
    }

    fn predict_unchecked(&self, x: ArrayView1<'_, f64>) -> f64 {
        match self {
            BaseLearner::Forest(f) => f.predict_unchecked(x),
            BaseLearner::Linear(l) => l.predict_unchecked(x),
        }
    }
}

/// Two-layer stacking regressor: base learners plus a linear meta-learner.
#[derive(Debug, Clone)]
pub struct StackingRegressor {
    base: Vec<BaseLearner>,
    meta: LinearModel,
    n_features: usize,
}

impl StackingRegressor {
    /// Assembles a stack, checking the layer arities agree.
    pub fn new(
        base: Vec<BaseLearner>,
        meta: LinearModel,
        n_features: usize,
    ) -> Result<Self, ShapeError> {
        if meta.n_features() != base.len() {
            return Err(ShapeError::MetaArity {
                meta_inputs: meta.n_features(),
                base_learners: base.len(),
            });
        }
        for (index, learner) in base.iter().enumerate() {
            if learner.n_features() != n_features {
                return Err(ShapeError::BaseLearnerArity {
                    index,
                    expected: n_features,
                    got: learner.n_features(),
                });
            }
        }
        Ok(Self {
            base,
            meta,
            n_features,
        })
    }

    /// Number of input features the stack was fitted on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// First-layer learners.
    pub fn base_learners(&self) -> &[BaseLearner] {
        &self.base
    }

    /// Second-layer meta-learner.
    pub fn meta_learner(&self) -> &LinearModel {
        &self.meta
    }

    /// Predicts one scalar on the transformed target scale.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InputLen`] if the vector length does not match
    /// the fitted feature count.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Result<f64, ShapeError> {
        if x.len() != self.n_features {
            return Err(ShapeError::InputLen {
                expected: self.n_features,
                got: x.len(),
            });
        }
        let level_one: Vec<f64> = self.base.iter().map(|b| b.predict_unchecked(x)).collect();
        Ok(self.meta.predict_unchecked(ArrayView1::from(level_one.as_slice())))
    }
}
