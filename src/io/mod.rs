//! I/O layer for the external toolkit and raster files.
//! Provides the `Toolkit` seam, the subprocess-backed `CommandToolkit`, the optional
//! GDAL band-deletion backend, and `writers` for run reports.
pub mod toolkit;
pub use toolkit::{Toolkit, ToolkitError};

pub mod command;
pub use command::{CommandToolkit, ToolCommand, ToolkitConfig};

#[cfg(feature = "raster")]
pub mod gdal;
#[cfg(feature = "raster")]
pub use self::gdal::{GdalError, RasterInfo};

pub mod writers;
