//! A single guarded collaborator call and its recorded outcome.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::scene::Scene;
use crate::error::{Error, Result};
use crate::io::ToolkitError;
use crate::types::{DependencyGating, FailurePolicy, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum StageStatus {
    Succeeded,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    /// Base identifier of the scene, `None` for mosaic stages
    pub scene: Option<String>,
    pub input: PathBuf,
    /// Where the stage writes; the next stage reads from here
    pub output: PathBuf,
    pub status: StageStatus,
}

impl StageOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, StageStatus::Succeeded)
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, StageStatus::Failed(_))
    }

    pub fn skipped(&self) -> bool {
        matches!(self.status, StageStatus::Skipped(_))
    }
}

/// How a guarded stage treats errors and failed predecessors
#[derive(Debug, Clone, Copy)]
pub struct StageGuard {
    pub policy: FailurePolicy,
    pub gating: DependencyGating,
}

/// Run one collaborator call inside its failure boundary.
///
/// With `Ungated` the call is attempted even if `upstream` failed, using the
/// conventional input path. With `Gated` a non-successful upstream turns this stage
/// into `Skipped`. An error is logged and recorded under `Continue`, and returned as
/// `Error::StageFailed` under `Abort`.
pub fn run_stage<F>(
    stage: Stage,
    scene: Option<&Scene>,
    input: PathBuf,
    output: PathBuf,
    upstream: Option<&StageOutcome>,
    guard: StageGuard,
    call: F,
) -> Result<StageOutcome>
where
    F: FnOnce(&Path, &Path) -> std::result::Result<(), ToolkitError>,
{
    let subject = match scene {
        Some(scene) => scene.to_string(),
        None => output.display().to_string(),
    };
    let mut outcome = StageOutcome {
        stage,
        scene: scene.map(|s| s.base_id.clone()),
        input,
        output,
        status: StageStatus::Succeeded,
    };

    if guard.gating == DependencyGating::Gated {
        if let Some(up) = upstream.filter(|up| !up.succeeded()) {
            warn!(
                "Skipping {} for {}: {} did not succeed",
                stage, subject, up.stage
            );
            outcome.status = StageStatus::Skipped(format!("{} did not succeed", up.stage));
            return Ok(outcome);
        }
    }

    match call(outcome.input.as_path(), outcome.output.as_path()) {
        Ok(()) => {
            info!("{} complete for {}", stage.title(), subject);
            Ok(outcome)
        }
        Err(e) => match guard.policy {
            FailurePolicy::Continue => {
                warn!("Error: {} failed for {}: {}", stage, subject, e);
                outcome.status = StageStatus::Failed(e.to_string());
                Ok(outcome)
            }
            FailurePolicy::Abort => Err(Error::StageFailed {
                stage,
                subject,
                source: e,
            }),
        },
    }
}
