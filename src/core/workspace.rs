//! Output tree setup. Every run starts from an empty `outputs/` directory holding
//! the `haze`, `atcor` and `mosaic` stage folders; earlier results are discarded.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

pub const HAZE_DIR: &str = "haze";
pub const ATCOR_DIR: &str = "atcor";
pub const MOSAIC_DIR: &str = "mosaic";
pub const STAGE_DIRS: [&str; 3] = [HAZE_DIR, ATCOR_DIR, MOSAIC_DIR];

pub const MOSAIC_PROJECT_FILE: &str = "mosaic_prj.mos";
pub const MOSAIC_DEFINITION_FILE: &str = "mosdef.xml";
pub const MOSAIC_OUTPUT_DIR: &str = "mosaic_output";
pub const CUTLINE_FILE_STEM: &str = "cutlines";

/// Resolved output layout for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub haze: PathBuf,
    pub atcor: PathBuf,
    pub mosaic: PathBuf,
}

impl Workspace {
    /// Compute the layout under `root` without touching the filesystem
    pub fn layout<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        Workspace {
            haze: root.join(HAZE_DIR),
            atcor: root.join(ATCOR_DIR),
            mosaic: root.join(MOSAIC_DIR),
            root,
        }
    }

    pub fn mosaic_project(&self) -> PathBuf {
        self.mosaic.join(MOSAIC_PROJECT_FILE)
    }

    pub fn mosaic_definition(&self) -> PathBuf {
        self.mosaic.join(MOSAIC_DEFINITION_FILE)
    }

    pub fn mosaic_output(&self) -> PathBuf {
        self.mosaic.join(MOSAIC_OUTPUT_DIR)
    }

    /// Cutline topology written by mosaic preparation next to the project file:
    /// `mosaic/<stem>/misc/<stem>_cutline_topology.pix`
    pub fn cutline_source(&self) -> PathBuf {
        let project = self.mosaic_project();
        let stem = project
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.mosaic
            .join(&stem)
            .join("misc")
            .join(format!("{stem}_cutline_topology.pix"))
    }

    pub fn cutline_output(&self, extension: &str) -> PathBuf {
        self.mosaic_output()
            .join(format!("{CUTLINE_FILE_STEM}.{extension}"))
    }
}

/// Delete and recreate `output_dir` with its three empty stage folders.
///
/// Refuses to run when `output_dir` is the working directory or one of its
/// ancestors, since clearing it would remove the input scenes.
pub fn prepare_workspace(working_dir: &Path, output_dir: &Path) -> Result<Workspace> {
    if output_dir.exists() {
        let working = working_dir.canonicalize()?;
        let output = output_dir.canonicalize()?;
        if working.starts_with(&output) {
            return Err(Error::UnsafeOutputDir { output, working });
        }

        fs::remove_dir_all(output_dir)?;
        info!("Previous directory removed");
    }

    fs::create_dir_all(output_dir)?;
    info!("New output directory created: {:?}", output_dir);

    let workspace = Workspace::layout(output_dir);
    for (name, dir) in STAGE_DIRS
        .iter()
        .zip([&workspace.haze, &workspace.atcor, &workspace.mosaic])
    {
        fs::create_dir(dir)?;
        info!("New {} subfolder created", name);
    }

    Ok(workspace)
}
