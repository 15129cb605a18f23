//! Scene descriptors and the artifact naming convention shared by every stage.
//!
//! A scene is identified by its Landsat metadata file (`<base>_MTL.txt`). Every
//! intermediate file is named by concatenating the base identifier with a fixed
//! stage suffix, so the on-disk layout can be inspected without a run report.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker separating the base identifier from the rest of the metadata file name
pub const METADATA_MARKER: &str = "_MTL";
/// Appended to the metadata path to address the multispectral channel group
pub const MULTISPECTRAL_SUFFIX: &str = "-MS";
pub const HAZE_SUFFIX: &str = "_HAZE";
pub const ATCOR_SUFFIX: &str = "_ATMOSC";
pub const RASTER_EXTENSION: &str = "pix";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Path of the `*_MTL.txt` file that marked this scene
    pub metadata_path: PathBuf,
    /// File name up to the first `_MTL`
    pub base_id: String,
}

impl Scene {
    pub fn from_metadata_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::invalid("scene", path.display()))?
            .to_string_lossy();

        // A bare `_MTL.txt` keeps an empty base and is still processed
        let base_id = match file_name.split_once(METADATA_MARKER) {
            Some((base, _)) => base.to_string(),
            None => file_name.to_string(),
        };

        Ok(Scene {
            metadata_path: path.to_path_buf(),
            base_id,
        })
    }

    /// Toolkit address of the multispectral image (`<metadata path>-MS`)
    pub fn multispectral_input(&self) -> PathBuf {
        let mut raw: OsString = self.metadata_path.clone().into_os_string();
        raw.push(MULTISPECTRAL_SUFFIX);
        PathBuf::from(raw)
    }

    /// `<haze_dir>/<base>_HAZE.pix`
    pub fn haze_output(&self, haze_dir: &Path) -> PathBuf {
        haze_dir.join(self.artifact_name(HAZE_SUFFIX))
    }

    /// `<atcor_dir>/<base>_ATMOSC.pix`
    pub fn atcor_output(&self, atcor_dir: &Path) -> PathBuf {
        atcor_dir.join(self.artifact_name(ATCOR_SUFFIX))
    }

    fn artifact_name(&self, suffix: &str) -> String {
        format!("{}{}.{}", self.base_id, suffix, RASTER_EXTENSION)
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.metadata_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_id_strips_metadata_suffix() {
        let scene = Scene::from_metadata_path("/data/p138/LC08_B1_MTL.txt").unwrap();
        assert_eq!(scene.base_id, "LC08_B1");
    }

    #[test]
    fn base_id_stops_at_first_marker() {
        let scene = Scene::from_metadata_path("LC08_L1TP_138041_MTL_MTL.txt").unwrap();
        assert_eq!(scene.base_id, "LC08_L1TP_138041");
    }

    #[test]
    fn stage_paths_follow_naming_convention() {
        let scene = Scene::from_metadata_path("/data/LC08_B1_MTL.txt").unwrap();
        assert_eq!(
            scene.haze_output(Path::new("/work/outputs/haze")),
            PathBuf::from("/work/outputs/haze/LC08_B1_HAZE.pix")
        );
        assert_eq!(
            scene.atcor_output(Path::new("/work/outputs/atcor")),
            PathBuf::from("/work/outputs/atcor/LC08_B1_ATMOSC.pix")
        );
    }

    #[test]
    fn multispectral_input_appends_suffix() {
        let scene = Scene::from_metadata_path("/data/LC08_B1_MTL.txt").unwrap();
        assert_eq!(
            scene.multispectral_input(),
            PathBuf::from("/data/LC08_B1_MTL.txt-MS")
        );
    }

    #[test]
    fn bare_marker_yields_empty_base() {
        let scene = Scene::from_metadata_path("/data/_MTL.txt").unwrap();
        assert_eq!(scene.base_id, "");
        assert_eq!(
            scene.haze_output(Path::new("/work/outputs/haze")),
            PathBuf::from("/work/outputs/haze/_HAZE.pix")
        );
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(Scene::from_metadata_path("/").is_err());
    }
}
