use tracing::info;
use tracing_subscriber::EnvFilter;

use lsmosaic::api;
use lsmosaic::{BandSet, PipelineConfig};

use super::args::CliArgs;
use super::errors::AppError;

/// Merge the optional config file with command-line overrides
fn build_config(args: &CliArgs) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            PipelineConfig::from_json_file(path).map_err(|source| AppError::Config {
                path: path.display().to_string(),
                source,
            })?
        }
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &args.working_dir {
        config.working_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(bands) = &args.drop_bands {
        config.bands_to_drop = BandSet::new(bands.iter().copied())?;
    }
    if let Some(order) = &args.band_order {
        config.mosaic_band_order = <[u32; 3]>::try_from(order.as_slice()).map_err(|_| {
            AppError::InvalidBandOrder {
                order: format!("{:?}", order),
            }
        })?;
    }
    if let Some(policy) = args.scene_policy {
        config.scene_policy = policy;
    }
    if let Some(policy) = args.mosaic_policy {
        config.mosaic_policy = policy;
    }
    if let Some(policy) = args.cutline_policy {
        config.cutline_policy = policy;
    }
    if let Some(gating) = args.gating {
        config.gating = gating;
    }
    if let Some(backend) = args.band_backend {
        config.band_backend = backend;
    }
    if let Some(python) = &args.python {
        config.toolkit.python = python.clone();
    }
    if args.sort_scenes {
        config.sort_scenes = true;
    }

    Ok(config)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if args.log { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Landsat mosaic pipeline");
    let config = build_config(&args)?;
    info!(
        "Bands to delete: {}, mosaic band order: {:?}",
        config.bands_to_drop, config.mosaic_band_order
    );

    let report = match &args.report {
        Some(path) => api::run_to_report(&config, path)?,
        None => api::run(&config)?,
    };

    if report.failed() > 0 {
        info!(
            "Finished with {} failed stage(s); see messages above",
            report.failed()
        );
    }
    info!("End of run");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use lsmosaic::{DependencyGating, FailurePolicy};
    use std::path::PathBuf;

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::parse_from([
            "lsmosaic",
            "--working-dir",
            "/data/L2",
            "--drop-bands",
            "1,4,6",
            "--band-order",
            "4,3,2",
            "--scene-policy",
            "abort",
            "--gating",
            "gated",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/data/L2"));
        assert_eq!(config.bands_to_drop.as_slice(), &[1, 4, 6]);
        assert_eq!(config.mosaic_band_order, [4, 3, 2]);
        assert_eq!(config.scene_policy, FailurePolicy::Abort);
        assert_eq!(config.mosaic_policy, FailurePolicy::Abort);
        assert_eq!(config.gating, DependencyGating::Gated);
    }

    #[test]
    fn band_order_must_have_three_entries() {
        let args = CliArgs::parse_from(["lsmosaic", "--band-order", "3,2"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pipeline.json");
        std::fs::write(
            &path,
            r#"{ "working_dir": "/from/file", "sort_scenes": false, "toolkit": { "python": "py3" } }"#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "lsmosaic",
            "--config",
            path.to_str().unwrap(),
            "--sort-scenes",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/from/file"));
        assert!(config.sort_scenes);
        assert_eq!(config.toolkit.python, "py3");
    }
}
