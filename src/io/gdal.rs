use gdal::raster::{GdalDataType, GdalType};
use gdal::{Dataset, errors::GdalError as GdalCrateError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::params::BandSet;

/// Errors encountered when rewriting rasters through GDAL
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Band index {index} out of range: raster has {bands} bands")]
    BandOutOfRange { index: u32, bands: usize },
    #[error("Refusing to delete all {0} bands")]
    NoBandsLeft(usize),
}

/// Shape and georeferencing of a raster dataset
#[derive(Debug, Clone)]
pub struct RasterInfo {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients, when the dataset has one
    pub geotransform: Option<[f64; 6]>,
    /// Projection in WKT format (may be empty)
    pub projection: String,
    /// Short name of the driver that opened the file, e.g. `PCIDSK`
    pub driver: String,
}

impl RasterInfo {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (size_x, size_y) = dataset.raster_size();
        RasterInfo {
            size_x,
            size_y,
            bands: dataset.raster_count() as usize,
            geotransform: dataset.geo_transform().ok(),
            projection: dataset.projection(),
            driver: dataset.driver().short_name(),
        }
    }

    /// 1-based indices that survive deleting `bands`
    pub fn kept_bands(&self, bands: &BandSet) -> Result<Vec<usize>, GdalError> {
        if let Some(&index) = bands.as_slice().iter().find(|&&b| b as usize > self.bands) {
            return Err(GdalError::BandOutOfRange {
                index,
                bands: self.bands,
            });
        }
        let kept: Vec<usize> = (1..=self.bands)
            .filter(|&b| !bands.contains(b as u32))
            .collect();
        if kept.is_empty() {
            return Err(GdalError::NoBandsLeft(self.bands));
        }
        Ok(kept)
    }
}

/// Delete `bands` from the raster at `path` in place.
///
/// The surviving bands are copied into a sibling file written with the same driver,
/// pixel type, geotransform and projection, which then replaces the original. The
/// pixel type is taken from the first surviving band. Returns the number of bands left.
pub fn delete_bands(path: &Path, bands: &BandSet) -> Result<usize, GdalError> {
    let source = Dataset::open(path)?;
    let info = RasterInfo::from_dataset(&source);
    let kept = info.kept_bands(bands)?;
    let band_type = source.rasterband(kept[0])?.band_type();
    debug!(
        "Rewriting {:?} ({} driver, {:?}) keeping bands {:?}",
        path, info.driver, band_type, kept
    );

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("pix");
    let staging = tempfile::Builder::new()
        .prefix(".band-delete-")
        .suffix(&format!(".{extension}"))
        .tempfile_in(parent)?
        .into_temp_path();

    match band_type {
        GdalDataType::UInt8 => copy_kept::<u8>(&source, &info, &kept, &staging)?,
        GdalDataType::UInt16 => copy_kept::<u16>(&source, &info, &kept, &staging)?,
        GdalDataType::Int16 => copy_kept::<i16>(&source, &info, &kept, &staging)?,
        GdalDataType::UInt32 => copy_kept::<u32>(&source, &info, &kept, &staging)?,
        GdalDataType::Int32 => copy_kept::<i32>(&source, &info, &kept, &staging)?,
        GdalDataType::Float32 => copy_kept::<f32>(&source, &info, &kept, &staging)?,
        _ => copy_kept::<f64>(&source, &info, &kept, &staging)?,
    }
    drop(source);

    staging.persist(path).map_err(|e| GdalError::Io(e.error))?;
    info!("{:?} now has {} bands", path, kept.len());
    Ok(kept.len())
}

fn copy_kept<T: GdalType + Copy>(
    source: &Dataset,
    info: &RasterInfo,
    kept: &[usize],
    staging: &Path,
) -> Result<(), GdalError> {
    let window = (info.size_x, info.size_y);
    let mut target =
        source
            .driver()
            .create_with_band_type::<T, _>(staging, info.size_x, info.size_y, kept.len())?;
    if let Some(gt) = info.geotransform {
        target.set_geo_transform(&gt)?;
    }
    if !info.projection.is_empty() {
        target.set_projection(&info.projection)?;
    }

    for (slot, &index) in kept.iter().enumerate() {
        let band = source.rasterband(index)?;
        let mut buffer = band.read_as::<T>((0, 0), window, window, None)?;
        let mut out = target.rasterband(slot + 1)?;
        out.write((0, 0), window, &mut buffer)?;
        if let Some(nodata) = band.no_data_value() {
            out.set_no_data_value(Some(nodata))?;
        }
    }
    Ok(())
}
