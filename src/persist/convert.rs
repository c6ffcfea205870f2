//! Conversion between runtime types and schema types.
//!
//! Deserialized schemas are validated on the way in (`TryFrom`); runtime
//! types convert losslessly on the way out (`From`).

use super::schema::{
    ArtifactSchema, BaseLearnerSchema, BoxCoxSchema, ForestSchema, LinearSchema, QuantileSchema,
    StackingSchema, TreeSchema,
};
use super::LoadError;
use crate::model::{BaseLearner, Forest, LinearModel, StackingRegressor, Tree};
use crate::transform::{BoxCox, FittedTransform, QuantileTransform};

// =============================================================================
// Schema -> runtime (validating)
// =============================================================================

impl TryFrom<QuantileSchema> for QuantileTransform {
    type Error = LoadError;

    fn try_from(schema: QuantileSchema) -> Result<Self, Self::Error> {
        QuantileTransform::new(schema.quantiles, schema.references)
            .map_err(|e| LoadError::Validation(e.to_string()))
    }
}

impl TryFrom<BoxCoxSchema> for BoxCox {
    type Error = LoadError;

    fn try_from(schema: BoxCoxSchema) -> Result<Self, Self::Error> {
        BoxCox::new(schema.lambda).map_err(|e| LoadError::Validation(e.to_string()))
    }
}

impl TryFrom<LinearSchema> for LinearModel {
    type Error = LoadError;

    fn try_from(schema: LinearSchema) -> Result<Self, Self::Error> {
        for &w in schema.weights.iter().chain([&schema.intercept]) {
            if !w.is_finite() {
                return Err(LoadError::Validation(format!(
                    "linear model contains non-finite weight {w}"
                )));
            }
        }
        Ok(LinearModel::new(schema.weights, schema.intercept))
    }
}

fn tree_from_schema(schema: TreeSchema, n_features: usize) -> Result<Tree, LoadError> {
    if schema.num_nodes as usize != schema.split_features.len() {
        return Err(LoadError::Validation(format!(
            "tree declares {} nodes but has {} entries",
            schema.num_nodes,
            schema.split_features.len()
        )));
    }
    Tree::new(
        schema.split_features,
        schema.thresholds,
        schema.left_children,
        schema.right_children,
        schema.is_leaf,
        schema.leaf_values,
        n_features,
    )
    .map_err(|e| LoadError::Validation(e.to_string()))
}

fn forest_from_schema(schema: ForestSchema, n_features: usize) -> Result<Forest, LoadError> {
    if !schema.base_score.is_finite() {
        return Err(LoadError::Validation(format!(
            "forest base_score is not finite: {}",
            schema.base_score
        )));
    }
    let trees = schema
        .trees
        .into_iter()
        .map(|t| tree_from_schema(t, n_features))
        .collect::<Result<Vec<_>, _>>()?;
    Forest::new(trees, schema.base_score, n_features)
        .map_err(|e| LoadError::Validation(e.to_string()))
}

impl TryFrom<StackingSchema> for StackingRegressor {
    type Error = LoadError;

    fn try_from(schema: StackingSchema) -> Result<Self, Self::Error> {
        let n_features = schema.n_features;
        if let Some(names) = &schema.feature_names {
            if names.len() != n_features {
                return Err(LoadError::Validation(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }
        let base = schema
            .base
            .into_iter()
            .map(|b| -> Result<BaseLearner, LoadError> {
                match b {
                    BaseLearnerSchema::Forest(f) => {
                        Ok(BaseLearner::Forest(forest_from_schema(f, n_features)?))
                    }
                    BaseLearnerSchema::Linear(l) => {
                        let linear = LinearModel::try_from(l)?;
                        if linear.n_features() != n_features {
                            return Err(LoadError::Validation(format!(
                                "linear base learner has {} weights for {} features",
                                linear.n_features(),
                                n_features
                            )));
                        }
                        Ok(BaseLearner::Linear(linear))
                    }
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let meta = LinearModel::try_from(schema.meta)?;
        StackingRegressor::new(base, meta, n_features)
            .map_err(|e| LoadError::Validation(e.to_string()))
    }
}

// =============================================================================
// Runtime -> schema (lossless)
// =============================================================================

impl From<&QuantileTransform> for QuantileSchema {
    fn from(qt: &QuantileTransform) -> Self {
        Self {
            quantiles: qt.quantiles().to_vec(),
            references: qt.references().to_vec(),
        }
    }
}

impl From<&BoxCox> for BoxCoxSchema {
    fn from(bc: &BoxCox) -> Self {
        Self {
            lambda: bc.lambda(),
        }
    }
}

impl From<&FittedTransform> for ArtifactSchema {
    fn from(transform: &FittedTransform) -> Self {
        match transform {
            FittedTransform::Quantile(qt) => ArtifactSchema::Quantile(qt.into()),
            FittedTransform::BoxCox(bc) => ArtifactSchema::BoxCox(bc.into()),
        }
    }
}

impl From<&LinearModel> for LinearSchema {
    fn from(m: &LinearModel) -> Self {
        Self {
            weights: m.weights().to_vec(),
            intercept: m.intercept(),
        }
    }
}

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        Self {
            num_nodes: tree.num_nodes() as u32,
            split_features: tree.split_features().to_vec(),
            thresholds: tree.thresholds().to_vec(),
            left_children: tree.left_children().to_vec(),
            right_children: tree.right_children().to_vec(),
            is_leaf: tree.is_leaf().to_vec(),
            leaf_values: tree.leaf_values().to_vec(),
        }
    }
}

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        Self {
            base_score: forest.base_score(),
            trees: forest.trees().iter().map(TreeSchema::from).collect(),
        }
    }
}

impl From<&StackingRegressor> for StackingSchema {
    fn from(stack: &StackingRegressor) -> Self {
        Self {
            n_features: stack.n_features(),
            feature_names: None,
            base: stack
                .base_learners()
                .iter()
                .map(|b| match b {
                    BaseLearner::Forest(f) => BaseLearnerSchema::Forest(f.into()),
                    BaseLearner::Linear(l) => BaseLearnerSchema::Linear(l.into()),
                })
                .collect(),
            meta: stack.meta_learner().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn quantile_schema_round_trips() {
        let qt = QuantileTransform::new(vec![1.0, 2.0, 4.0], vec![0.0, 0.5, 1.0]).unwrap();
        let schema = QuantileSchema::from(&qt);
        let back = QuantileTransform::try_from(schema).unwrap();
        assert_eq!(back, qt);
    }

    #[test]
    fn unsorted_quantiles_fail_validation() {
        let schema = QuantileSchema {
            quantiles: vec![2.0, 1.0],
            references: vec![0.0, 1.0],
        };
        assert!(matches!(
            QuantileTransform::try_from(schema),
            Err(LoadError::Validation(_))
        ));
    }

    #[test]
    fn stacking_schema_round_trips_predictions() {
        let stack = StackingRegressor::new(
            vec![crate::model::BaseLearner::Linear(LinearModel::new(
                vec![1.0, -2.0],
                0.5,
            ))],
            LinearModel::new(vec![3.0], 0.0),
            2,
        )
        .unwrap();
        let schema = StackingSchema::from(&stack);
        let back = StackingRegressor::try_from(schema).unwrap();

        let x = array![0.7, 0.1];
        assert_eq!(
            back.predict(x.view()).unwrap(),
            stack.predict(x.view()).unwrap()
        );
    }

    #[test]
    fn cyclic_tree_fails_at_load() {
        // Node 0 and node 1 reference each other, both internal. Traversal
        // would never terminate, so this must be a load-time error.
        let schema = TreeSchema {
            num_nodes: 3,
            split_features: vec![0, 0, 0],
            thresholds: vec![0.5, 0.5, 0.0],
            left_children: vec![1, 0, 0],
            right_children: vec![2, 2, 0],
            is_leaf: vec![false, false, true],
            leaf_values: vec![0.0, 0.0, 1.0],
        };
        assert!(matches!(
            tree_from_schema(schema, 5),
            Err(LoadError::Validation(_))
        ));
    }

    #[test]
    fn declared_node_count_must_match() {
        let schema = TreeSchema {
            num_nodes: 3,
            split_features: vec![0],
            thresholds: vec![0.0],
            left_children: vec![0],
            right_children: vec![0],
            is_leaf: vec![true],
            leaf_values: vec![1.0],
        };
        assert!(matches!(
            tree_from_schema(schema, 5),
            Err(LoadError::Validation(_))
        ));
    }

    #[test]
    fn mismatched_feature_names_rejected() {
        let schema = StackingSchema {
            n_features: 5,
            feature_names: Some(vec!["only_one".to_string()]),
            base: vec![],
            meta: LinearSchema {
                weights: vec![],
                intercept: 0.0,
            },
        };
        assert!(matches!(
            StackingRegressor::try_from(schema),
            Err(LoadError::Validation(_))
        ));
    }
}
