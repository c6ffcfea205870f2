//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

use tsn_predict::testing::{write_artifact_files, KtolueneVariant};
use tsn_predict::{ArtifactSet, FeatureVector, Pipeline};

/// Writes a synthetic artifact set to a fresh temp dir and returns it.
pub fn artifact_dir(seed: u64, ktoluene: KtolueneVariant) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_artifact_files(dir.path(), seed, ktoluene).expect("write artifact files");
    dir
}

/// Loads a pipeline from a directory of artifact files.
pub fn load_pipeline(dir: &Path) -> Pipeline {
    let artifacts = ArtifactSet::load(dir).expect("load artifact set");
    Pipeline::new(artifacts)
}

/// The end-to-end scenario inputs from the original system's documentation.
pub fn scenario_inputs() -> FeatureVector {
    FeatureVector {
        lcd: 8.33119,
        vf: 0.5726,
        gsa: 701.884,
        density: 1.51454,
        ktoluene: 0.013545,
    }
}
