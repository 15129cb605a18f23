use clap::Parser;
use std::path::PathBuf;

use lsmosaic::{BandDeletionBackend, DependencyGating, FailurePolicy};

#[derive(Parser)]
#[command(
    name = "lsmosaic",
    version,
    about = "Correct and mosaic Landsat scenes with an external remote-sensing toolkit"
)]
pub struct CliArgs {
    /// Directory searched recursively for *_MTL.txt scene metadata files
    #[arg(short, long)]
    pub working_dir: Option<PathBuf>,

    /// Output directory (default: <working-dir>/outputs). Cleared at start!
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON pipeline configuration; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bands deleted from every corrected scene, e.g. 1,4,6,7,8
    #[arg(long, value_delimiter = ',')]
    pub drop_bands: Option<Vec<u32>>,

    /// Mosaic output channel order, exactly three bands, e.g. 3,2,1
    #[arg(long, value_delimiter = ',')]
    pub band_order: Option<Vec<u32>>,

    /// Failure handling for haze removal, atmospheric correction and band deletion
    #[arg(long, value_enum)]
    pub scene_policy: Option<FailurePolicy>,

    /// Failure handling for mosaic preparation, definition and execution
    #[arg(long, value_enum)]
    pub mosaic_policy: Option<FailurePolicy>,

    /// Failure handling for the cutline export
    #[arg(long, value_enum)]
    pub cutline_policy: Option<FailurePolicy>,

    /// Skip stages whose input stage did not succeed (gated) or always attempt them (ungated)
    #[arg(long, value_enum)]
    pub gating: Option<DependencyGating>,

    /// Band deletion backend (toolkit or gdal)
    #[arg(long, value_enum)]
    pub band_backend: Option<BandDeletionBackend>,

    /// Python interpreter with the toolkit modules installed
    #[arg(long)]
    pub python: Option<String>,

    /// Visit directories in file-name order for a reproducible scene order
    #[arg(long, default_value_t = false)]
    pub sort_scenes: bool,

    /// Write a JSON report of every stage outcome to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging (toolkit command lines and output)
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
