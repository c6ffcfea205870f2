//! Synthetic fitted artifacts for tests and the demo flow.
//!
//! Everything here is deterministic per seed. The builders produce an
//! [`ArtifactSet`] shaped exactly like a production one: quantile transforms
//! fitted on in-range samples, a Box-Cox lambda for Vf, a small forest plus a
//! linear base learner stacked under a linear meta-learner, and a target
//! transform for the inverse mapping.

use rand::prelude::*;

use crate::artifacts::{files, ArtifactSet};
use crate::features::Feature;
use crate::model::{BaseLearner, Forest, LinearModel, StackingRegressor, Tree};
use crate::persist::schema::{ArtifactSchema, QuantileSchema, StackingSchema};
use crate::persist::{save_artifact, LoadError};
use crate::transform::{BoxCox, FittedTransform, QuantileTransform};

/// Sample count for the synthetic quantile fits.
const N_SAMPLES: usize = 64;

/// Which transform kind the synthetic Ktoluene slot gets.
///
/// Production artifact sets exist in both variants, so tests exercise both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KtolueneVariant {
    Quantile,
    BoxCox,
}

fn sample_in_range(rng: &mut StdRng, feature: Feature) -> Vec<f64> {
    let (min, max) = feature.range();
    (0..N_SAMPLES)
        .map(|_| min + rng.gen::<f64>() * (max - min))
        .collect()
}

fn quantile_for(rng: &mut StdRng, feature: Feature) -> QuantileTransform {
    QuantileTransform::fit(sample_in_range(rng, feature)).unwrap()
}

/// A random stump splitting on `feature` with in-range-ish threshold.
fn stump(rng: &mut StdRng, feature: u32) -> Tree {
    let threshold = rng.gen::<f64>();
    let left = rng.gen::<f64>() * 2.0 - 1.0;
    let right = rng.gen::<f64>() * 2.0 - 1.0;
    Tree::new(
        vec![feature, 0, 0],
        vec![threshold, 0.0, 0.0],
        vec![1, 0, 0],
        vec![2, 0, 0],
        vec![false, true, true],
        vec![0.0, left, right],
        Feature::COUNT,
    )
    .unwrap()
}

fn build_parts(
    seed: u64,
    ktoluene: KtolueneVariant,
) -> (
    [FittedTransform; Feature::COUNT],
    QuantileTransform,
    StackingRegressor,
) {
    let mut rng = StdRng::seed_from_u64(seed);

    let qt_lcd = quantile_for(&mut rng, Feature::Lcd);
    let vf_lambda = BoxCox::new(rng.gen::<f64>() - 0.5).unwrap();
    let qt_gsa = quantile_for(&mut rng, Feature::Gsa);
    let qt_density = quantile_for(&mut rng, Feature::Density);
    let ktol = match ktoluene {
        KtolueneVariant::Quantile => {
            FittedTransform::Quantile(quantile_for(&mut rng, Feature::Ktoluene))
        }
        KtolueneVariant::BoxCox => {
            FittedTransform::BoxCox(BoxCox::new(rng.gen::<f64>() * 0.2).unwrap())
        }
    };

    // Synthetic adsorption-capacity targets, uniform over a plausible span.
    let target_samples: Vec<f64> = (0..N_SAMPLES).map(|_| rng.gen::<f64>() * 400.0).collect();
    let target = QuantileTransform::fit(target_samples).unwrap();

    let forest = Forest::new(
        (0..Feature::COUNT as u32).map(|f| stump(&mut rng, f)).collect(),
        rng.gen::<f64>() * 0.2,
        Feature::COUNT,
    )
    .unwrap();
    let linear = LinearModel::new(
        (0..Feature::COUNT)
            .map(|_| rng.gen::<f64>() * 0.6 - 0.3)
            .collect(),
        rng.gen::<f64>() * 0.1,
    );
    let meta = LinearModel::new(vec![0.6, 0.4], rng.gen::<f64>() * 0.05);
    let model = StackingRegressor::new(
        vec![BaseLearner::Forest(forest), BaseLearner::Linear(linear)],
        meta,
        Feature::COUNT,
    )
    .unwrap();

    (
        [
            FittedTransform::Quantile(qt_lcd),
            FittedTransform::BoxCox(vf_lambda),
            FittedTransform::Quantile(qt_gsa),
            FittedTransform::Quantile(qt_density),
            ktol,
        ],
        target,
        model,
    )
}

/// A deterministic synthetic artifact set with a quantile Ktoluene transform
/// (the shape the original artifact set ships).
pub fn synthetic_artifacts(seed: u64) -> ArtifactSet {
    synthetic_artifacts_with(seed, KtolueneVariant::Quantile)
}

/// A deterministic synthetic artifact set with the chosen Ktoluene variant.
pub fn synthetic_artifacts_with(seed: u64, ktoluene: KtolueneVariant) -> ArtifactSet {
    let (transforms, target, model) = build_parts(seed, ktoluene);
    ArtifactSet::from_parts(transforms, target, model).unwrap()
}

/// Writes the full seven-file artifact set to `dir`.
///
/// Loading the directory with [`ArtifactSet::load`] yields a set that predicts
/// identically to [`synthetic_artifacts_with`] for the same seed and variant.
pub fn write_artifact_files(
    dir: &std::path::Path,
    seed: u64,
    ktoluene: KtolueneVariant,
) -> Result<(), LoadError> {
    let (transforms, target, model) = build_parts(seed, ktoluene);
    let [lcd, vf, gsa, density, ktol] = transforms;

    save_artifact(&dir.join(files::QT_LCD), (&lcd).into())?;
    save_artifact(&dir.join(files::VF_LAMBDA), (&vf).into())?;
    save_artifact(&dir.join(files::QT_GSA), (&gsa).into())?;
    save_artifact(&dir.join(files::QT_DENSITY), (&density).into())?;
    save_artifact(&dir.join(files::QT_KTOLUENE), (&ktol).into())?;
    save_artifact(
        &dir.join(files::QT_TARGET),
        ArtifactSchema::Quantile(QuantileSchema::from(&target)),
    )?;
    save_artifact(
        &dir.join(files::STACKING_MODEL),
        ArtifactSchema::Stacking(StackingSchema::from(&model)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_artifacts() {
        let a = synthetic_artifacts(42);
        let b = synthetic_artifacts(42);
        assert_eq!(
            a.target().quantiles(),
            b.target().quantiles()
        );
    }

    #[test]
    fn different_seeds_differ() {
        let a = synthetic_artifacts(1);
        let b = synthetic_artifacts(2);
        assert_ne!(a.target().quantiles(), b.target().quantiles());
    }

    #[test]
    fn ktoluene_variant_respected() {
        let q = synthetic_artifacts_with(7, KtolueneVariant::Quantile);
        let b = synthetic_artifacts_with(7, KtolueneVariant::BoxCox);
        assert_eq!(q.transform_for(Feature::Ktoluene).kind(), "quantile");
        assert_eq!(b.transform_for(Feature::Ktoluene).kind(), "box_cox");
    }
}
