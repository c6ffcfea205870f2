//! Schema types for artifact serialization.
//!
//! Schema types are separate from runtime types so the on-disk format can
//! evolve independently and deserialization can validate before anything is
//! constructed. Every artifact file carries an explicit `format_version` and a
//! `kind` tag; nothing relies on implicit object-graph serialization.

use serde::{Deserialize, Serialize};

/// Current artifact format version. Bump when the schema changes shape.
pub const FORMAT_VERSION: u32 = 1;

/// One artifact file: a version header plus the tagged payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFileSchema {
    /// Format version; readers reject versions they do not know.
    pub format_version: u32,
    /// The fitted object.
    pub artifact: ArtifactSchema,
}

impl ArtifactFileSchema {
    /// Wraps a payload with the current format version.
    pub fn current(artifact: ArtifactSchema) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            artifact,
        }
    }
}

/// Tagged union of every artifact kind this system loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSchema {
    /// Fitted quantile transform.
    Quantile(QuantileSchema),
    /// Fitted Box-Cox lambda.
    BoxCox(BoxCoxSchema),
    /// Pre-fitted stacking regressor.
    Stacking(StackingSchema),
}

impl ArtifactSchema {
    /// Kind tag as written to JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactSchema::Quantile(_) => "quantile",
            ArtifactSchema::BoxCox(_) => "box_cox",
            ArtifactSchema::Stacking(_) => "stacking",
        }
    }
}

/// Fitted quantile transform: sorted breakpoints plus reference ranks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantileSchema {
    /// Empirical breakpoints, ascending.
    pub quantiles: Vec<f64>,
    /// Reference ranks matching the breakpoints, ascending.
    pub references: Vec<f64>,
}

/// Fitted Box-Cox transform: the bare power parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxCoxSchema {
    pub lambda: f64,
}

/// Dense linear model weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSchema {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// Single regression tree in struct-of-arrays layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index per node (unused for leaves).
    pub split_features: Vec<u32>,
    /// Split threshold per node (unused for leaves).
    pub thresholds: Vec<f64>,
    /// Left child index per node (unused for leaves).
    pub left_children: Vec<u32>,
    /// Right child index per node (unused for leaves).
    pub right_children: Vec<u32>,
    /// Whether each node is a leaf.
    pub is_leaf: Vec<bool>,
    /// Leaf value per node (0.0 for internal nodes).
    pub leaf_values: Vec<f64>,
}

/// Additive tree ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    pub base_score: f64,
    pub trees: Vec<TreeSchema>,
}

/// First-layer learner of the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseLearnerSchema {
    Forest(ForestSchema),
    Linear(LinearSchema),
}

/// Full stacking regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackingSchema {
    /// Number of input features the stack was fitted on.
    pub n_features: usize,
    /// Feature names in model-input order (optional, for reports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// First-layer learners.
    pub base: Vec<BaseLearnerSchema>,
    /// Second-layer meta-learner over the base outputs.
    pub meta: LinearSchema,
}
