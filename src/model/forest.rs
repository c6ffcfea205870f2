//! Decision-tree ensemble base learner.
//!
//! Trees are stored in a struct-of-arrays layout: one entry per node across
//! parallel vectors, node 0 as root. Traversal is iterative; a missing or NaN
//! comparison takes the right branch (NaN fails `x < threshold`).

use ndarray::ArrayView1;

/// Structural validation errors for deserialized trees.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("tree node arrays have inconsistent lengths")]
    InconsistentArrays,

    #[error("node {node} references child {child} outside of {num_nodes} nodes")]
    ChildOutOfBounds {
        node: usize,
        child: u32,
        num_nodes: usize,
    },

    #[error("node {node} splits on feature {feature} but the forest has {n_features} features")]
    SplitFeatureOutOfBounds {
        node: usize,
        feature: u32,
        n_features: usize,
    },

    /// Children must come after their parent in the node arrays. This is the
    /// topological layout the format stores; it also rules out reference
    /// cycles, so traversal always terminates.
    #[error("node {node} references child {child}, children must have a larger index")]
    ChildNotForward { node: usize, child: u32 },
}

/// A single regression tree in struct-of-arrays layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_features: Vec<u32>,
    thresholds: Vec<f64>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f64>,
}

impl Tree {
    /// Builds a tree, validating the node arrays against `n_features`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        split_features: Vec<u32>,
        thresholds: Vec<f64>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f64>,
        n_features: usize,
    ) -> Result<Self, TreeError> {
        let num_nodes = split_features.len();
        if num_nodes == 0 {
            return Err(TreeError::Empty);
        }
        let same_len = [
            thresholds.len(),
            left_children.len(),
            right_children.len(),
            is_leaf.len(),
            leaf_values.len(),
        ]
        .iter()
        .all(|&l| l == num_nodes);
        if !same_len {
            return Err(TreeError::InconsistentArrays);
        }
        for node in 0..num_nodes {
            if is_leaf[node] {
                continue;
            }
            let feature = split_features[node];
            if feature as usize >= n_features {
                return Err(TreeError::SplitFeatureOutOfBounds {
                    node,
                    feature,
                    n_features,
                });
            }
            for &child in [left_children[node], right_children[node]].iter() {
                if child as usize >= num_nodes {
                    return Err(TreeError::ChildOutOfBounds {
                        node,
                        child,
                        num_nodes,
                    });
                }
                if child as usize <= node {
                    return Err(TreeError::ChildNotForward { node, child });
                }
            }
        }
        Ok(Self {
            split_features,
            thresholds,
            left_children,
            right_children,
            is_leaf,
            leaf_values,
        })
    }

    /// A tree with a single leaf node.
    pub fn leaf(value: f64) -> Self {
        Self {
            split_features: vec![0],
            thresholds: vec![0.0],
            left_children: vec![0],
            right_children: vec![0],
            is_leaf: vec![true],
            leaf_values: vec![value],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.split_features.len()
    }

    pub fn split_features(&self) -> &[u32] {
        &self.split_features
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn left_children(&self) -> &[u32] {
        &self.left_children
    }

    pub fn right_children(&self) -> &[u32] {
        &self.right_children
    }

    pub fn is_leaf(&self) -> &[bool] {
        &self.is_leaf
    }

    pub fn leaf_values(&self) -> &[f64] {
        &self.leaf_values
    }

    /// Traverses to a leaf. Child bounds were checked at construction.
    fn traverse(&self, x: ArrayView1<'_, f64>) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf[node] {
            let value = x[self.split_features[node] as usize];
            node = if value < self.thresholds[node] {
                self.left_children[node] as usize
            } else {
                self.right_children[node] as usize
            };
        }
        self.leaf_values[node]
    }
}

/// An additive ensemble of regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f64,
    n_features: usize,
}

impl Forest {
    /// Builds a forest, re-checking every tree's split indices against
    /// `n_features`. [`Tree::new`] validates against the count it was given;
    /// this catches trees paired with a narrower forest.
    pub fn new(trees: Vec<Tree>, base_score: f64, n_features: usize) -> Result<Self, TreeError> {
        for tree in &trees {
            for node in 0..tree.num_nodes() {
                if tree.is_leaf[node] {
                    continue;
                }
                let feature = tree.split_features[node];
                if feature as usize >= n_features {
                    return Err(TreeError::SplitFeatureOutOfBounds {
                        node,
                        feature,
                        n_features,
                    });
                }
            }
        }
        Ok(Self {
            trees,
            base_score,
            n_features,
        })
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Sum of the base score and every tree's leaf value for `x`.
    ///
    /// Callers check the input length; see
    /// [`StackingRegressor::predict`](crate::model::StackingRegressor::predict).
    pub(crate) fn predict_unchecked(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.traverse(x)).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// root: x[1] < 0.5 ? leaf(-1.0) : leaf(2.0)
    fn stump() -> Tree {
        Tree::new(
            vec![1, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, -1.0, 2.0],
            2,
        )
        .unwrap()
    }

    #[test]
    fn stump_routes_both_ways() {
        let forest = Forest::new(vec![stump()], 0.5, 2).unwrap();
        assert_abs_diff_eq!(forest.predict_unchecked(array![0.0, 0.2].view()), -0.5);
        assert_abs_diff_eq!(forest.predict_unchecked(array![0.0, 0.9].view()), 2.5);
    }

    #[test]
    fn boundary_value_goes_right() {
        let forest = Forest::new(vec![stump()], 0.0, 2).unwrap();
        assert_abs_diff_eq!(forest.predict_unchecked(array![0.0, 0.5].view()), 2.0);
    }

    #[test]
    fn nan_goes_right() {
        let forest = Forest::new(vec![stump()], 0.0, 2).unwrap();
        assert_abs_diff_eq!(forest.predict_unchecked(array![0.0, f64::NAN].view()), 2.0);
    }

    #[test]
    fn trees_are_additive() {
        let forest = Forest::new(vec![stump(), Tree::leaf(10.0)], 1.0, 2).unwrap();
        assert_abs_diff_eq!(forest.predict_unchecked(array![0.0, 0.2].view()), 10.0);
    }

    #[test]
    fn forest_rejects_trees_from_a_wider_feature_space() {
        // stump() splits on feature 1; a one-feature forest must refuse it
        // rather than index past the input vector at traversal time.
        let err = Forest::new(vec![stump()], 0.0, 1).unwrap_err();
        assert!(matches!(
            err,
            TreeError::SplitFeatureOutOfBounds { feature: 1, .. }
        ));
    }

    #[test]
    fn empty_tree_rejected() {
        assert!(matches!(
            Tree::new(vec![], vec![], vec![], vec![], vec![], vec![], 2),
            Err(TreeError::Empty)
        ));
    }

    #[test]
    fn child_out_of_bounds_rejected() {
        let err = Tree::new(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![1, 0],
            vec![7, 0],
            vec![false, true],
            vec![0.0, 1.0],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::ChildOutOfBounds { child: 7, .. }));
    }

    #[test]
    fn split_feature_out_of_bounds_rejected() {
        let err = Tree::new(
            vec![5, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, -1.0, 1.0],
            2,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TreeError::SplitFeatureOutOfBounds { feature: 5, .. }
        ));
    }

    #[test]
    fn self_reference_rejected() {
        let err = Tree::new(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![0, 0],
            vec![1, 0],
            vec![false, true],
            vec![0.0, 1.0],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::ChildNotForward { node: 0, child: 0 }));
    }

    #[test]
    fn cyclic_tree_rejected() {
        // Two internal nodes referencing each other: node 0 -> node 1 -> node
        // 0. In-bounds and not self-referential, but traversal would never
        // terminate; the forward-ordering check refuses it at construction.
        let err = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.5, 0.0],
            vec![1, 0, 0],
            vec![2, 2, 0],
            vec![false, false, true],
            vec![0.0, 0.0, 1.0],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::ChildNotForward { node: 1, child: 0 }));
    }
}
