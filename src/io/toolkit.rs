//! The external remote-sensing toolkit as seen by the pipeline.
//!
//! Each method is one opaque collaborator call. Implementations own how the call
//! is carried out (subprocess, bindings, a test double); the pipeline only sees
//! `Ok(())` or a `ToolkitError` and applies its failure policy.
use std::path::Path;

use thiserror::Error;

use crate::core::params::BandSet;
use crate::types::{Stage, VectorFormat};

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("Failed to launch `{program}` for {stage}: {source}")]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} exited with {status}: {stderr}")]
    ExitStatus {
        stage: Stage,
        status: String,
        stderr: String,
    },

    #[cfg(feature = "raster")]
    #[error("Raster error: {0}")]
    Raster(#[from] crate::io::gdal::GdalError),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Failed(String),
}

impl ToolkitError {
    pub fn failed<E: std::fmt::Display>(e: E) -> Self {
        ToolkitError::Failed(e.to_string())
    }
}

pub trait Toolkit {
    /// Remove haze from the multispectral input, writing a new raster
    fn haze_removal(&self, input: &Path, output: &Path) -> Result<(), ToolkitError>;

    /// Convert the haze-free raster toward surface reflectance
    fn atmospheric_correction(&self, input: &Path, output: &Path) -> Result<(), ToolkitError>;

    /// Delete the given 1-based channels from `file` in place
    fn delete_bands(&self, file: &Path, bands: &BandSet) -> Result<(), ToolkitError>;

    /// Scan every raster in `source_dir` and write a mosaic project file
    fn prepare_mosaic(&self, source_dir: &Path, project: &Path) -> Result<(), ToolkitError>;

    fn define_mosaic(
        &self,
        project: &Path,
        definition: &Path,
        band_order: &[u32; 3],
    ) -> Result<(), ToolkitError>;

    /// Render the mosaic into the (already created) output directory
    fn run_mosaic(
        &self,
        project: &Path,
        definition: &Path,
        output_dir: &Path,
    ) -> Result<(), ToolkitError>;

    fn export_vector(
        &self,
        input: &Path,
        output: &Path,
        format: VectorFormat,
        segments: &[u32],
    ) -> Result<(), ToolkitError>;
}
