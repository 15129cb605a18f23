#![doc = r#"
lsmosaic — batch haze removal, atmospheric correction and mosaicking of Landsat scenes.

This crate drives an external remote-sensing toolkit (PCI Geomatica by default) over a
directory of Landsat scenes: it discovers `*_MTL.txt` metadata files, removes haze,
corrects each scene atmospherically, deletes unwanted bands, then prepares, defines and
runs a mosaic of all corrected scenes and exports its cutlines as an ESRI Shapefile.
It powers the `lsmosaic` CLI and can be embedded in your own Rust applications.

Requirements
------------
- A toolkit installation reachable from the configured Python interpreter, or your own
  command templates / `Toolkit` implementation.
- GDAL development headers and runtime when the `raster` feature is enabled (default).
- Rust 2024 edition toolchain.

Output layout
-------------
```text
<working_dir>/outputs/
├── haze/<base>_HAZE.pix
├── atcor/<base>_ATMOSC.pix
└── mosaic/
    ├── mosaic_prj.mos
    ├── mosdef.xml
    └── mosaic_output/   (mosaic rasters + cutlines.shp)
```
The output directory is deleted and recreated at the start of every run.

Quick start
-----------
```rust,no_run
use lsmosaic::{PipelineConfig, api};

fn main() -> lsmosaic::Result<()> {
    let config = PipelineConfig::new("/data/Osterland_L2");
    let report = api::run(&config)?;

    println!(
        "scenes={} failed stages={} elapsed={}s",
        report.scenes.len(),
        report.failed(),
        report.elapsed_seconds
    );
    Ok(())
}
```

Failure policies
----------------
Scene stages log and continue by default; mosaic preparation, definition and execution
abort the run; the cutline export logs and continues. Stages are not gated on their
predecessor unless `DependencyGating::Gated` is selected.

```rust,no_run
use lsmosaic::{BandSet, DependencyGating, FailurePolicy, PipelineConfig, api};

fn main() -> lsmosaic::Result<()> {
    let mut config = PipelineConfig::new("/data/scenes");
    config.bands_to_drop = BandSet::new([1, 6, 7, 8])?;
    config.gating = DependencyGating::Gated;
    config.scene_policy = FailurePolicy::Abort;

    match api::run(&config) {
        Ok(report) => println!("{} stages succeeded", report.succeeded()),
        Err(lsmosaic::Error::StageFailed { stage, subject, .. }) => {
            eprintln!("{stage} failed for {subject}")
        }
        Err(other) => return Err(other),
    }
    Ok(())
}
```

Custom toolkits
---------------
Implement [`Toolkit`] to call the collaborator operations some other way (bindings,
a remote service, a test double) and pass it to [`api::run_with_toolkit`].

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — configuration, workspace, discovery, scene naming and guarded stages.
- [`io`] — the `Toolkit` seam, the subprocess toolkit, GDAL band deletion, report writers.
- [`types`] — stage and policy enums.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{BandSet, PipelineConfig};
pub use crate::core::processing::correct::SceneReport;
pub use crate::core::processing::pipeline::RunReport;
pub use crate::core::processing::stage::{StageOutcome, StageStatus};
pub use crate::core::scene::Scene;
pub use crate::core::workspace::Workspace;
pub use error::{Error, Result};
pub use types::{BandDeletionBackend, DependencyGating, FailurePolicy, Stage, VectorFormat};

// Toolkit seam
pub use io::{CommandToolkit, ToolCommand, Toolkit, ToolkitConfig, ToolkitError};

// Building blocks
pub use crate::core::discovery::discover_scenes;
pub use crate::core::processing::pipeline::run_pipeline;
pub use crate::core::workspace::prepare_workspace;
pub use io::writers::report::write_report_json;
