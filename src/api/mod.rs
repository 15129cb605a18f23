//! High-level, ergonomic library API: run the whole batch with the subprocess toolkit
//! or a toolkit of your own, and discover scenes without touching the output tree.
//! Prefer these entrypoints over the low-level `core` modules when integrating lsmosaic.
use std::path::Path;

use crate::core::discovery::discover_scenes;
use crate::core::params::PipelineConfig;
use crate::core::processing::pipeline::{RunReport, run_pipeline};
use crate::core::scene::Scene;
use crate::error::Result;
use crate::io::writers::report::write_report_json;
use crate::io::{CommandToolkit, Toolkit};

/// Run the full batch, calling the toolkit through the configured command templates
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    let toolkit = CommandToolkit::new(config.toolkit.clone());
    run_with_toolkit(config, &toolkit)
}

/// Run the full batch against any `Toolkit` implementation
pub fn run_with_toolkit(config: &PipelineConfig, toolkit: &dyn Toolkit) -> Result<RunReport> {
    run_pipeline(config, toolkit)
}

/// Run the full batch and write the JSON run report to `report_path`
pub fn run_to_report(config: &PipelineConfig, report_path: &Path) -> Result<RunReport> {
    let report = run(config)?;
    write_report_json(&report, report_path)?;
    Ok(report)
}

/// List the scenes a run would process, in the order it would process them
pub fn discover(config: &PipelineConfig) -> Result<Vec<Scene>> {
    config.validate()?;
    discover_scenes(
        &config.working_dir,
        &config.scene_pattern,
        config.sort_scenes,
    )
}
