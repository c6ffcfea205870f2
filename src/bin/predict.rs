//! Command-line front end for one synchronous prediction round-trip.
//!
//! Usage:
//!   predict [options]
//!
//! Options:
//!   --lcd <v>         LCD input (default: 8.33)
//!   --vf <v>          Vf input (default: 0.57)
//!   --gsa <v>         GSA input (default: 701.88)
//!   --density <v>     Density input (default: 1.51)
//!   --ktoluene <v>    Ktoluene input (default: 0.0135)
//!   --artifacts <dir> Artifact directory (default: artifacts)
//!   --assets <dir>    Contribution-image directory (default: the artifact dir)
//!   --demo            Write synthetic fitted artifacts to the artifact dir first
//!   --help            Print this help

use std::path::PathBuf;
use std::process::ExitCode;

use tsn_predict::testing::{write_artifact_files, KtolueneVariant};
use tsn_predict::{
    contribution_assets, render_assets, render_report, ArtifactSet, Feature, FeatureVector,
    Pipeline, RequestState,
};

struct Args {
    inputs: FeatureVector,
    artifacts: PathBuf,
    assets: Option<PathBuf>,
    demo: bool,
}

fn numeric(it: &mut impl Iterator<Item = String>, flag: &str) -> f64 {
    it.next()
        .unwrap_or_else(|| panic!("{flag} needs a value"))
        .parse()
        .unwrap_or_else(|e| panic!("{flag}: {e}"))
}

fn parse_args() -> Args {
    let mut inputs = FeatureVector::default();
    let mut artifacts = PathBuf::from("artifacts");
    let mut assets: Option<PathBuf> = None;
    let mut demo = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--lcd" => inputs.lcd = numeric(&mut it, "--lcd"),
            "--vf" => inputs.vf = numeric(&mut it, "--vf"),
            "--gsa" => inputs.gsa = numeric(&mut it, "--gsa"),
            "--density" => inputs.density = numeric(&mut it, "--density"),
            "--ktoluene" => inputs.ktoluene = numeric(&mut it, "--ktoluene"),
            "--artifacts" => artifacts = PathBuf::from(it.next().expect("--artifacts dir")),
            "--assets" => assets = Some(PathBuf::from(it.next().expect("--assets dir"))),
            "--demo" => demo = true,
            "--help" => {
                let ranges: Vec<String> = Feature::ORDER
                    .iter()
                    .map(|f| {
                        let (min, max) = f.range();
                        format!(
                            "  --{:<10} {} input, valid range [{min}, {max}] (default: {})",
                            f.name().to_lowercase(),
                            f.name(),
                            f.default_value()
                        )
                    })
                    .collect();
                eprintln!(
                    "predict - TSN adsorption-capacity prediction\n\n{}\n  --artifacts <dir> Artifact directory (default: artifacts)\n  --assets <dir>    Contribution-image directory (default: the artifact dir)\n  --demo            Write synthetic fitted artifacts first\n  --help            Print this help",
                    ranges.join("\n")
                );
                std::process::exit(0);
            }
            other => panic!("unknown arg: {other}"),
        }
    }

    Args {
        inputs,
        artifacts,
        assets,
        demo,
    }
}

fn main() -> ExitCode {
    let args = parse_args();

    if args.demo {
        if let Err(e) = std::fs::create_dir_all(&args.artifacts) {
            eprintln!("cannot create artifact directory: {e}");
            return ExitCode::FAILURE;
        }
        if let Err(e) = write_artifact_files(&args.artifacts, 42, KtolueneVariant::Quantile) {
            eprintln!("cannot write demo artifacts: {e}");
            return ExitCode::FAILURE;
        }
    }

    // Artifact problems are fatal at startup; no prediction runs.
    let artifacts = match ArtifactSet::load(&args.artifacts) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("artifact load failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let pipeline = Pipeline::new(artifacts);

    // Inputs are checked against the documented ranges before any transform.
    if let Err(e) = args.inputs.validate() {
        eprintln!("invalid input: {e}");
        return ExitCode::FAILURE;
    }

    // One complete synchronous request: Predicting -> Done | Failed.
    let state = RequestState::finish(pipeline.predict(&args.inputs));

    let code = match &state {
        RequestState::Done(prediction) => {
            print!("{}", render_report(prediction));
            ExitCode::SUCCESS
        }
        RequestState::Failed(message) => {
            eprintln!("prediction failed: {message}");
            ExitCode::FAILURE
        }
        RequestState::Idle | RequestState::Predicting => unreachable!("request did not finish"),
    };

    // Asset lookups are independent of the prediction outcome; missing files
    // degrade to warnings inside the rendered section.
    let asset_dir = args.assets.as_ref().unwrap_or(&args.artifacts);
    let assets = contribution_assets(asset_dir);
    println!();
    print!("{}", render_assets(&assets));

    code
}
