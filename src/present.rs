//! Presentation stage: report rendering, contribution assets, request state.
//!
//! No algorithmic content lives here. The report is plain markdown text; the
//! three pre-rendered SHAP contribution images are looked up on disk and their
//! absence is an ordinary, non-fatal state, not an error.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::features::Feature;
use crate::pipeline::Prediction;

/// Whether a pre-rendered contribution image exists on disk.
///
/// Absence is an expected state the presentation layer branches on, never a
/// failure signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Present(PathBuf),
    Missing(PathBuf),
}

impl AssetStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, AssetStatus::Present(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            AssetStatus::Present(p) | AssetStatus::Missing(p) => p,
        }
    }
}

/// One contribution-analysis image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionAsset {
    /// Human-readable label for the report.
    pub label: &'static str,
    pub status: AssetStatus,
}

/// File names of the three pre-rendered SHAP contribution images.
const ASSET_FILES: [(&str, &str); 3] = [
    ("first-layer base learners", "summary_plot.png"),
    ("second-layer meta-learner", "meta_learner_contributions.png"),
    ("overall stacking model", "overall_contributions.png"),
];

/// Looks up the three contribution images under `dir`.
///
/// Each lookup is independent; a missing file degrades that slot to
/// [`AssetStatus::Missing`] and the rest of the page still renders.
pub fn contribution_assets(dir: &Path) -> Vec<ContributionAsset> {
    ASSET_FILES
        .iter()
        .map(|&(label, file)| {
            let path = dir.join(file);
            let status = if path.is_file() {
                AssetStatus::Present(path)
            } else {
                AssetStatus::Missing(path)
            };
            ContributionAsset { label, status }
        })
        .collect()
}

/// Per-request state machine. One request is a complete synchronous
/// round-trip; there are never two in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Predicting,
    Done(Prediction),
    /// User-visible message; every computational failure is converted to this
    /// at the request boundary.
    Failed(String),
}

impl RequestState {
    /// Folds a finished request back into the state machine.
    pub fn finish(result: Result<Prediction, impl std::fmt::Display>) -> Self {
        match result {
            Ok(prediction) => RequestState::Done(prediction),
            Err(e) => RequestState::Failed(e.to_string()),
        }
    }
}

/// Renders one prediction as a markdown report: the raw-vs-transformed feature
/// table and both prediction scales.
pub fn render_report(prediction: &Prediction) -> String {
    let mut out = String::new();
    writeln!(out, "## Prediction\n").unwrap();
    writeln!(out, "| Feature | Input | Transformed |").unwrap();
    writeln!(out, "|---------|-------|-------------|").unwrap();
    for (i, feature) in Feature::ORDER.iter().enumerate() {
        writeln!(
            out,
            "| {} | {} | {:.6} |",
            feature.name(),
            prediction.inputs.get(*feature),
            prediction.transformed[i]
        )
        .unwrap();
    }
    writeln!(out).unwrap();
    writeln!(
        out,
        "Prediction (transformed scale): {:.6}",
        prediction.transformed_scale
    )
    .unwrap();
    writeln!(
        out,
        "Prediction (original scale, TSN): {:.4}",
        prediction.original_scale
    )
    .unwrap();
    out
}

/// Renders the contribution-asset section; missing files become warnings.
pub fn render_assets(assets: &[ContributionAsset]) -> String {
    let mut out = String::new();
    writeln!(out, "## Contribution analysis\n").unwrap();
    for asset in assets {
        match &asset.status {
            AssetStatus::Present(path) => {
                writeln!(out, "- {}: {}", asset.label, path.display()).unwrap();
            }
            AssetStatus::Missing(path) => {
                writeln!(
                    out,
                    "- {}: warning, image not found ({})",
                    asset.label,
                    path.display()
                )
                .unwrap();
            }
        }
    }
    out
}
