//! Mosaic construction over the corrected scenes, followed by cutline export.
//!
//! Preparation, definition and execution run under `mosaic_policy` (abort by default,
//! so a failure stops the run before any later mosaic artifact exists). The cutline
//! export has its own `cutline_policy` boundary.
use std::fs;

use tracing::info;

use crate::core::params::PipelineConfig;
use crate::core::processing::stage::{StageGuard, StageOutcome, run_stage};
use crate::core::workspace::Workspace;
use crate::error::Result;
use crate::io::Toolkit;
use crate::types::{Stage, VectorFormat};

pub fn build_mosaic(
    toolkit: &dyn Toolkit,
    workspace: &Workspace,
    config: &PipelineConfig,
) -> Result<Vec<StageOutcome>> {
    let guard = StageGuard {
        policy: config.mosaic_policy,
        gating: config.gating,
    };

    info!("Preparing mosaic from {:?}", workspace.atcor);
    let prepared = run_stage(
        Stage::MosaicPreparation,
        None,
        workspace.atcor.clone(),
        workspace.mosaic_project(),
        None,
        guard,
        |source, project| toolkit.prepare_mosaic(source, project),
    )?;

    let defined = run_stage(
        Stage::MosaicDefinition,
        None,
        prepared.output.clone(),
        workspace.mosaic_definition(),
        Some(&prepared),
        guard,
        |project, definition| {
            toolkit.define_mosaic(project, definition, &config.mosaic_band_order)
        },
    )?;

    let output_dir = workspace.mosaic_output();
    fs::create_dir(&output_dir)?;
    let project = prepared.output.clone();
    let executed = run_stage(
        Stage::MosaicExecution,
        None,
        defined.output.clone(),
        output_dir,
        Some(&defined),
        guard,
        |definition, output_dir| toolkit.run_mosaic(&project, definition, output_dir),
    )?;

    let format = VectorFormat::Shapefile;
    let exported = run_stage(
        Stage::CutlineExport,
        None,
        workspace.cutline_source(),
        workspace.cutline_output(format.extension()),
        Some(&executed),
        StageGuard {
            policy: config.cutline_policy,
            gating: config.gating,
        },
        |input, output| toolkit.export_vector(input, output, format, &config.cutline_segments),
    )?;
    if exported.succeeded() {
        info!("Cutlines successfully exported as {}", format);
    }

    Ok(vec![prepared, defined, executed, exported])
}
