//! Artifact persistence: versioned JSON load/save for fitted objects.
//!
//! Each fitted object lives in its own JSON file with an explicit
//! `format_version` and a `kind` tag (see [`schema`]). Loading validates shape
//! and contents before any runtime type exists; any problem is a [`LoadError`]
//! and nothing partial escapes.

pub mod convert;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::model::StackingRegressor;
use crate::transform::{BoxCox, FittedTransform, QuantileTransform};
use schema::{ArtifactFileSchema, ArtifactSchema, FORMAT_VERSION};

/// An artifact file cannot be read or is not what it claims to be.
///
/// Fatal at startup: no prediction runs until every artifact loads.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {} has format version {found}, this reader supports {supported}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("artifact {} is a {found} artifact, expected {expected}", .path.display())]
    WrongKind {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    #[error("artifact failed validation: {0}")]
    Validation(String),
}

/// Reads and version-checks one artifact file.
fn read_file(path: &Path) -> Result<ArtifactFileSchema, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ArtifactFileSchema =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if parsed.format_version != FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: parsed.format_version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(parsed)
}

/// Loads a fitted transform of either kind.
pub fn load_transform(path: &Path) -> Result<FittedTransform, LoadError> {
    let file = read_file(path)?;
    match file.artifact {
        ArtifactSchema::Quantile(q) => Ok(FittedTransform::Quantile(QuantileTransform::try_from(
            q,
        )?)),
        ArtifactSchema::BoxCox(b) => Ok(FittedTransform::BoxCox(BoxCox::try_from(b)?)),
        other => Err(LoadError::WrongKind {
            path: path.to_path_buf(),
            expected: "transform",
            found: other.kind(),
        }),
    }
}

/// Loads a fitted quantile transform; any other kind is a [`LoadError::WrongKind`].
///
/// Used for the target transformer, which must support `inverse()`.
pub fn load_quantile(path: &Path) -> Result<QuantileTransform, LoadError> {
    let file = read_file(path)?;
    match file.artifact {
        ArtifactSchema::Quantile(q) => QuantileTransform::try_from(q),
        other => Err(LoadError::WrongKind {
            path: path.to_path_buf(),
            expected: "quantile",
            found: other.kind(),
        }),
    }
}

/// Loads a fitted Box-Cox transform; any other kind is a [`LoadError::WrongKind`].
pub fn load_boxcox(path: &Path) -> Result<BoxCox, LoadError> {
    let file = read_file(path)?;
    match file.artifact {
        ArtifactSchema::BoxCox(b) => BoxCox::try_from(b),
        other => Err(LoadError::WrongKind {
            path: path.to_path_buf(),
            expected: "box_cox",
            found: other.kind(),
        }),
    }
}

/// Loads the pre-fitted stacking regressor.
pub fn load_model(path: &Path) -> Result<StackingRegressor, LoadError> {
    let file = read_file(path)?;
    match file.artifact {
        ArtifactSchema::Stacking(s) => StackingRegressor::try_from(s),
        other => Err(LoadError::WrongKind {
            path: path.to_path_buf(),
            expected: "stacking",
            found: other.kind(),
        }),
    }
}

/// Writes an artifact file with the current format version.
pub fn save_artifact(path: &Path, artifact: ArtifactSchema) -> Result<(), LoadError> {
    let file = File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &ArtifactFileSchema::current(artifact))
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
