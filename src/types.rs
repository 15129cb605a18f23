//! Shared types and enums used across lsmosaic.
//! Includes `Stage`, the failure-handling knobs (`FailurePolicy`, `DependencyGating`),
//! `BandDeletionBackend`, and `VectorFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One collaborator call in the pipeline, in execution order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    HazeRemoval,
    AtmosphericCorrection,
    BandDeletion,
    MosaicPreparation,
    MosaicDefinition,
    MosaicExecution,
    CutlineExport,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::HazeRemoval,
        Stage::AtmosphericCorrection,
        Stage::BandDeletion,
        Stage::MosaicPreparation,
        Stage::MosaicDefinition,
        Stage::MosaicExecution,
        Stage::CutlineExport,
    ];

    /// Sentence-case label used at the start of progress lines
    pub fn title(self) -> &'static str {
        match self {
            Stage::HazeRemoval => "Haze removal",
            Stage::AtmosphericCorrection => "Atmospheric correction",
            Stage::BandDeletion => "Band deletion",
            Stage::MosaicPreparation => "Mosaic preparation",
            Stage::MosaicDefinition => "Mosaic definition",
            Stage::MosaicExecution => "Mosaic execution",
            Stage::CutlineExport => "Cutline export",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title().to_lowercase())
    }
}

/// What the driver does when a stage returns an error
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and move on to the next statement
    #[default]
    Continue,
    /// Stop the run with the stage error
    Abort,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Continue => write!(f, "Continue"),
            FailurePolicy::Abort => write!(f, "Abort"),
        }
    }
}

/// Whether a stage runs when the stage feeding it did not succeed.
///
/// `Ungated` reproduces the historical behaviour: every stage is attempted on the
/// conventional input path even if that file was never produced.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DependencyGating {
    #[default]
    Ungated,
    Gated,
}

/// Who performs in-place band deletion on the corrected rasters
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BandDeletionBackend {
    #[default]
    Toolkit,
    Gdal,
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VectorFormat {
    #[default]
    Shapefile,
}

impl VectorFormat {
    /// Format code understood by the toolkit's exporter
    pub fn code(self) -> &'static str {
        match self {
            VectorFormat::Shapefile => "shp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            VectorFormat::Shapefile => "shp",
        }
    }
}

impl std::fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorFormat::Shapefile => write!(f, "ESRI Shapefile"),
        }
    }
}
