#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use lsmosaic::{BandSet, Stage, Toolkit, ToolkitError, VectorFormat};

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub stage: Stage,
    pub input: PathBuf,
    pub output: PathBuf,
    pub bands: Vec<u32>,
}

/// In-memory toolkit that writes placeholder files and fails on request.
///
/// A failure rule matches a stage, optionally restricted to calls whose input path
/// contains a given fragment (e.g. a scene base id).
#[derive(Default)]
pub struct FakeToolkit {
    pub calls: RefCell<Vec<Call>>,
    failures: Vec<(Stage, Option<String>)>,
}

impl FakeToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, stage: Stage, fragment: Option<&str>) -> Self {
        self.failures.push((stage, fragment.map(str::to_string)));
        self
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.calls.borrow().iter().map(|c| c.stage).collect()
    }

    pub fn calls_for(&self, stage: Stage) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.stage == stage)
            .cloned()
            .collect()
    }

    fn record(
        &self,
        stage: Stage,
        input: &Path,
        output: &Path,
        bands: &[u32],
    ) -> Result<(), ToolkitError> {
        self.calls.borrow_mut().push(Call {
            stage,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            bands: bands.to_vec(),
        });
        let input_text = input.display().to_string();
        let fails = self.failures.iter().any(|(s, fragment)| {
            *s == stage && fragment.as_ref().is_none_or(|f| input_text.contains(f.as_str()))
        });
        if fails {
            return Err(ToolkitError::failed(format!("simulated {stage} failure")));
        }
        Ok(())
    }

    fn require(input: &Path) -> Result<(), ToolkitError> {
        if input.exists() {
            Ok(())
        } else {
            Err(ToolkitError::failed(format!("file not found: {}", input.display())))
        }
    }
}

impl Toolkit for FakeToolkit {
    fn haze_removal(&self, input: &Path, output: &Path) -> Result<(), ToolkitError> {
        self.record(Stage::HazeRemoval, input, output, &[])?;
        fs::write(output, b"haze").map_err(ToolkitError::failed)
    }

    fn atmospheric_correction(&self, input: &Path, output: &Path) -> Result<(), ToolkitError> {
        self.record(Stage::AtmosphericCorrection, input, output, &[])?;
        Self::require(input)?;
        fs::write(output, b"atcor").map_err(ToolkitError::failed)
    }

    fn delete_bands(&self, file: &Path, bands: &BandSet) -> Result<(), ToolkitError> {
        self.record(Stage::BandDeletion, file, file, bands.as_slice())?;
        Self::require(file)
    }

    fn prepare_mosaic(&self, source_dir: &Path, project: &Path) -> Result<(), ToolkitError> {
        self.record(Stage::MosaicPreparation, source_dir, project, &[])?;
        let cutline_dir = project.with_extension("").join("misc");
        fs::create_dir_all(&cutline_dir).map_err(ToolkitError::failed)?;
        fs::write(cutline_dir.join("mosaic_prj_cutline_topology.pix"), b"cutlines")
            .map_err(ToolkitError::failed)?;
        fs::write(project, b"project").map_err(ToolkitError::failed)
    }

    fn define_mosaic(
        &self,
        project: &Path,
        definition: &Path,
        band_order: &[u32; 3],
    ) -> Result<(), ToolkitError> {
        self.record(Stage::MosaicDefinition, project, definition, band_order)?;
        Self::require(project)?;
        fs::write(definition, b"<mosaic/>").map_err(ToolkitError::failed)
    }

    fn run_mosaic(
        &self,
        _project: &Path,
        definition: &Path,
        output_dir: &Path,
    ) -> Result<(), ToolkitError> {
        self.record(Stage::MosaicExecution, definition, output_dir, &[])?;
        Self::require(definition)?;
        fs::write(output_dir.join("mosaic_1.pix"), b"mosaic").map_err(ToolkitError::failed)
    }

    fn export_vector(
        &self,
        input: &Path,
        output: &Path,
        format: VectorFormat,
        segments: &[u32],
    ) -> Result<(), ToolkitError> {
        self.record(Stage::CutlineExport, input, output, segments)?;
        Self::require(input)?;
        assert_eq!(format, VectorFormat::Shapefile);
        fs::write(output, b"shp").map_err(ToolkitError::failed)
    }
}

/// Working directory with one `<id>_MTL.txt` per id, spread over nested folders
pub fn scene_tree(ids: &[&str]) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    for (i, id) in ids.iter().enumerate() {
        let dir = tmp.path().join("LandsatImagery").join(format!("path{i}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{id}_MTL.txt")), b"GROUP = L1_METADATA_FILE\n").unwrap();
    }
    tmp
}

pub fn file_names(dir: &Path) -> HashSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

pub fn names(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}
