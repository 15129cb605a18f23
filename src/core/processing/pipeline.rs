use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::discovery::discover_scenes;
use crate::core::params::PipelineConfig;
use crate::core::processing::correct::{SceneReport, correct_scene};
use crate::core::processing::mosaic::build_mosaic;
use crate::core::processing::stage::StageOutcome;
use crate::core::workspace::{Workspace, prepare_workspace};
use crate::error::Result;
use crate::io::Toolkit;
use crate::types::Stage;

/// Everything a finished run did, stage by stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: i64,
    pub output_dir: PathBuf,
    pub scenes: Vec<SceneReport>,
    pub mosaic: Vec<StageOutcome>,
}

impl RunReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &StageOutcome> {
        self.scenes
            .iter()
            .flat_map(|s| s.stages.iter())
            .chain(self.mosaic.iter())
    }

    pub fn mosaic_outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.mosaic.iter().find(|o| o.stage == stage)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes().filter(|o| o.failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes().filter(|o| o.skipped()).count()
    }
}

/// Prepare the workspace, discover scenes, correct each one in order, then build
/// the mosaic. Runs strictly sequentially.
pub fn run_pipeline(config: &PipelineConfig, toolkit: &dyn Toolkit) -> Result<RunReport> {
    let started_at = Utc::now();
    config.validate()?;

    info!("Working directory is: {:?}", config.working_dir);
    let output_dir = config.resolved_output_dir();
    let workspace: Workspace = prepare_workspace(&config.working_dir, &output_dir)?;

    let scenes = discover_scenes(&config.working_dir, &config.scene_pattern, config.sort_scenes)?;
    info!("Scenes: {:?}", scenes.iter().map(|s| &s.metadata_path).collect::<Vec<_>>());

    let mut reports = Vec::with_capacity(scenes.len());
    for scene in &scenes {
        info!("Processing scene: {}", scene);
        reports.push(correct_scene(toolkit, scene, &workspace, config)?);
    }
    info!("Haze removal and Atmospheric correction Complete...");

    let mosaic = build_mosaic(toolkit, &workspace, config)?;

    let elapsed_seconds = (Utc::now() - started_at).num_seconds().max(0);
    let report = RunReport {
        started_at,
        elapsed_seconds,
        output_dir,
        scenes: reports,
        mosaic,
    };
    info!(
        "Stages succeeded: {}, failed: {}, skipped: {}",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    info!("Total Processing Time: {} seconds.", report.elapsed_seconds);
    Ok(report)
}
