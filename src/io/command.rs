//! Subprocess-backed `Toolkit`.
//!
//! Every collaborator call is a command template whose arguments may contain
//! `{placeholder}` tokens. The built-in templates drive the PCI Geomatica Python
//! modules through a `python -c` one-liner; any of them can be replaced from the
//! JSON config, e.g. to call a wrapper script or a different interpreter.
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::params::{BandSet, join_indices};
use crate::io::toolkit::{Toolkit, ToolkitError};
use crate::types::{Stage, VectorFormat};

/// A program and its argument templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Substitute `{name}` tokens in every argument
    pub fn render(&self, vars: &[(&str, String)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{name}}}"), value)
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Interpreter used by the built-in templates
    pub python: String,
    /// Per-stage overrides of the built-in templates
    pub commands: BTreeMap<Stage, ToolCommand>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            commands: BTreeMap::new(),
        }
    }
}

impl ToolkitConfig {
    pub fn command_for(&self, stage: Stage) -> ToolCommand {
        match self.commands.get(&stage) {
            Some(command) => command.clone(),
            None => ToolCommand::new(
                self.python.clone(),
                vec!["-c".to_string(), builtin_script(stage).to_string()],
            ),
        }
    }
}

fn builtin_script(stage: Stage) -> &'static str {
    match stage {
        Stage::HazeRemoval => {
            "from pci.hazerem import hazerem; hazerem(fili=r'{input}', filo=r'{output}')"
        }
        Stage::AtmosphericCorrection => {
            "from pci.atcor import atcor; atcor(fili=r'{input}', filo=r'{output}')"
        }
        Stage::BandDeletion => {
            "from pci.pcimod import pcimod; pcimod(file=r'{file}', pciop='DEL', pcival=[{bands}])"
        }
        Stage::MosaicPreparation => {
            "from pci.mosprep import mosprep; mosprep(mfile=r'{source}', silfile=r'{project}')"
        }
        Stage::MosaicDefinition => {
            "from pci.mosdef import mosdef; mosdef(silfile=r'{project}', mdfile=r'{definition}', dbic=[{band_order}])"
        }
        Stage::MosaicExecution => {
            "from pci.mosrun import mosrun; mosrun(silfile=r'{project}', mdfile=r'{definition}', outdir=r'{output_dir}')"
        }
        Stage::CutlineExport => {
            "from pci.fexport import fexport; fexport(fili=r'{input}', filo=r'{output}', dbvs=[{segments}], ftype='{format}')"
        }
    }
}

fn path_var(name: &'static str, path: &Path) -> (&'static str, String) {
    (name, path.display().to_string())
}

/// Runs each collaborator call as a blocking child process
#[derive(Debug, Clone, Default)]
pub struct CommandToolkit {
    pub config: ToolkitConfig,
}

impl CommandToolkit {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    fn run(&self, stage: Stage, vars: &[(&str, String)]) -> Result<(), ToolkitError> {
        let command = self.config.command_for(stage);
        let args = command.render(vars);
        debug!("Running {}: {} {:?}", stage, command.program, args);

        let output = Command::new(&command.program)
            .args(&args)
            .output()
            .map_err(|source| ToolkitError::Spawn {
                stage,
                program: command.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{} output:\n{}", stage, stdout.trim_end());
        }

        if !output.status.success() {
            return Err(ToolkitError::ExitStatus {
                stage,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Toolkit for CommandToolkit {
    fn haze_removal(&self, input: &Path, output: &Path) -> Result<(), ToolkitError> {
        self.run(
            Stage::HazeRemoval,
            &[path_var("input", input), path_var("output", output)],
        )
    }

    fn atmospheric_correction(&self, input: &Path, output: &Path) -> Result<(), ToolkitError> {
        self.run(
            Stage::AtmosphericCorrection,
            &[path_var("input", input), path_var("output", output)],
        )
    }

    fn delete_bands(&self, file: &Path, bands: &BandSet) -> Result<(), ToolkitError> {
        self.run(
            Stage::BandDeletion,
            &[path_var("file", file), ("bands", bands.to_string())],
        )
    }

    fn prepare_mosaic(&self, source_dir: &Path, project: &Path) -> Result<(), ToolkitError> {
        self.run(
            Stage::MosaicPreparation,
            &[path_var("source", source_dir), path_var("project", project)],
        )
    }

    fn define_mosaic(
        &self,
        project: &Path,
        definition: &Path,
        band_order: &[u32; 3],
    ) -> Result<(), ToolkitError> {
        self.run(
            Stage::MosaicDefinition,
            &[
                path_var("project", project),
                path_var("definition", definition),
                ("band_order", join_indices(band_order)),
            ],
        )
    }

    fn run_mosaic(
        &self,
        project: &Path,
        definition: &Path,
        output_dir: &Path,
    ) -> Result<(), ToolkitError> {
        self.run(
            Stage::MosaicExecution,
            &[
                path_var("project", project),
                path_var("definition", definition),
                path_var("output_dir", output_dir),
            ],
        )
    }

    fn export_vector(
        &self,
        input: &Path,
        output: &Path,
        format: VectorFormat,
        segments: &[u32],
    ) -> Result<(), ToolkitError> {
        self.run(
            Stage::CutlineExport,
            &[
                path_var("input", input),
                path_var("output", output),
                ("format", format.code().to_string()),
                ("segments", join_indices(segments)),
            ],
        )
    }
}
