//! Per-scene correction: haze removal, atmospheric correction, band deletion.
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::PipelineConfig;
use crate::core::processing::stage::{StageGuard, StageOutcome, run_stage};
use crate::core::scene::Scene;
use crate::core::workspace::Workspace;
use crate::error::Result;
use crate::io::{Toolkit, ToolkitError};
use crate::types::{BandDeletionBackend, Stage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneReport {
    pub scene: Scene,
    pub stages: Vec<StageOutcome>,
}

impl SceneReport {
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages.iter().find(|o| o.stage == stage)
    }
}

/// Correct one scene. Each stage reads the path recorded in its predecessor's
/// outcome. Returns `Err` only when `scene_policy` is `Abort`.
pub fn correct_scene(
    toolkit: &dyn Toolkit,
    scene: &Scene,
    workspace: &Workspace,
    config: &PipelineConfig,
) -> Result<SceneReport> {
    let guard = StageGuard {
        policy: config.scene_policy,
        gating: config.gating,
    };

    let haze = run_stage(
        Stage::HazeRemoval,
        Some(scene),
        scene.multispectral_input(),
        scene.haze_output(&workspace.haze),
        None,
        guard,
        |input, output| toolkit.haze_removal(input, output),
    )?;

    let atcor = run_stage(
        Stage::AtmosphericCorrection,
        Some(scene),
        haze.output.clone(),
        scene.atcor_output(&workspace.atcor),
        Some(&haze),
        guard,
        |input, output| toolkit.atmospheric_correction(input, output),
    )?;

    let bands = &config.bands_to_drop;
    let trimmed = run_stage(
        Stage::BandDeletion,
        Some(scene),
        atcor.output.clone(),
        atcor.output.clone(),
        Some(&atcor),
        guard,
        |file, _| match config.band_backend {
            BandDeletionBackend::Toolkit => toolkit.delete_bands(file, bands),
            BandDeletionBackend::Gdal => delete_bands_with_gdal(file, bands),
        },
    )?;
    if trimmed.succeeded() {
        info!("{} bands removed from {}", bands.len(), scene);
    }

    Ok(SceneReport {
        scene: scene.clone(),
        stages: vec![haze, atcor, trimmed],
    })
}

#[cfg(feature = "raster")]
fn delete_bands_with_gdal(
    file: &std::path::Path,
    bands: &crate::core::params::BandSet,
) -> std::result::Result<(), ToolkitError> {
    crate::io::gdal::delete_bands(file, bands)?;
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn delete_bands_with_gdal(
    _file: &std::path::Path,
    _bands: &crate::core::params::BandSet,
) -> std::result::Result<(), ToolkitError> {
    Err(ToolkitError::Unsupported(
        "GDAL band deletion requires the `raster` feature".to_string(),
    ))
}
