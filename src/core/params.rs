use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::discovery::DEFAULT_SCENE_PATTERN;
use crate::error::{Error, Result};
use crate::io::command::ToolkitConfig;
use crate::types::{BandDeletionBackend, DependencyGating, FailurePolicy};

/// Name of the output folder created under the working directory
pub const OUTPUT_DIR_NAME: &str = "outputs";

/// Ordered, de-duplicated set of 1-based band indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct BandSet(Vec<u32>);

impl BandSet {
    pub fn new<I: IntoIterator<Item = u32>>(indices: I) -> Result<Self> {
        let set: BTreeSet<u32> = indices.into_iter().collect();
        if set.contains(&0) {
            return Err(Error::invalid("bands_to_drop", 0));
        }
        Ok(BandSet(set.into_iter().collect()))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BandSet {
    /// Landsat 8 OLI: keep blue (2), green (3) and NIR (5)
    fn default() -> Self {
        BandSet(vec![1, 4, 6, 7, 8])
    }
}

impl TryFrom<Vec<u32>> for BandSet {
    type Error = Error;

    fn try_from(value: Vec<u32>) -> Result<Self> {
        BandSet::new(value)
    }
}

impl From<BandSet> for Vec<u32> {
    fn from(value: BandSet) -> Self {
        value.0
    }
}

impl std::fmt::Display for BandSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join_indices(&self.0))
    }
}

/// Comma-separated rendering used in toolkit command lines
pub fn join_indices(indices: &[u32]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Pipeline configuration, suitable for JSON config files.
///
/// Defaults reproduce the historical batch run: scene stages log and continue,
/// mosaic preparation/definition/execution abort, cutline export logs and continues,
/// and no stage is gated on its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub working_dir: PathBuf,
    /// Defaults to `<working_dir>/outputs`
    pub output_dir: Option<PathBuf>,
    pub scene_pattern: String,
    /// Sort the directory walk by file name instead of filesystem order
    pub sort_scenes: bool,
    pub bands_to_drop: BandSet,
    /// Output channel composition for the mosaic definition
    pub mosaic_band_order: [u32; 3],
    /// Vector segments exported from the cutline topology file
    pub cutline_segments: Vec<u32>,
    pub scene_policy: FailurePolicy,
    pub mosaic_policy: FailurePolicy,
    pub cutline_policy: FailurePolicy,
    pub gating: DependencyGating,
    pub band_backend: BandDeletionBackend,
    pub toolkit: ToolkitConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            output_dir: None,
            scene_pattern: DEFAULT_SCENE_PATTERN.to_string(),
            sort_scenes: false,
            bands_to_drop: BandSet::default(),
            mosaic_band_order: [3, 2, 1],
            cutline_segments: vec![2],
            scene_policy: FailurePolicy::Continue,
            mosaic_policy: FailurePolicy::Abort,
            cutline_policy: FailurePolicy::Continue,
            gating: DependencyGating::Ungated,
            band_backend: BandDeletionBackend::Toolkit,
            toolkit: ToolkitConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.working_dir.join(OUTPUT_DIR_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.mosaic_band_order.contains(&0) {
            return Err(Error::invalid(
                "mosaic_band_order",
                join_indices(&self.mosaic_band_order),
            ));
        }
        if self.cutline_segments.is_empty() {
            return Err(Error::invalid("cutline_segments", "[]"));
        }
        glob::Pattern::new(&self.scene_pattern)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::command::ToolCommand;
    use crate::types::Stage;

    #[test]
    fn band_set_is_sorted_and_deduplicated() {
        let bands = BandSet::new([8, 1, 4, 1]).unwrap();
        assert_eq!(bands.as_slice(), &[1, 4, 8]);
        assert!(bands.contains(4));
        assert!(!bands.contains(2));
        assert_eq!(bands.to_string(), "1,4,8");
    }

    #[test]
    fn band_set_rejects_zero() {
        assert!(BandSet::new([0, 1]).is_err());
        assert!(serde_json::from_str::<BandSet>("[0]").is_err());
    }

    #[test]
    fn defaults_match_historical_run() {
        let config = PipelineConfig::new("/data/L2");
        assert_eq!(config.bands_to_drop.as_slice(), &[1, 4, 6, 7, 8]);
        assert_eq!(config.mosaic_band_order, [3, 2, 1]);
        assert_eq!(config.scene_policy, FailurePolicy::Continue);
        assert_eq!(config.mosaic_policy, FailurePolicy::Abort);
        assert_eq!(config.cutline_policy, FailurePolicy::Continue);
        assert_eq!(config.gating, DependencyGating::Ungated);
        assert_eq!(
            config.resolved_output_dir(),
            PathBuf::from("/data/L2/outputs")
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{ "working_dir": "/scenes", "bands_to_drop": [9, 1], "gating": "gated" }"#,
        )
        .unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/scenes"));
        assert_eq!(config.bands_to_drop.as_slice(), &[1, 9]);
        assert_eq!(config.gating, DependencyGating::Gated);
        assert_eq!(config.mosaic_policy, FailurePolicy::Abort);
        assert_eq!(config.scene_pattern, "*_MTL.txt");
    }

    #[test]
    fn json_round_trip_keeps_defaults_and_overrides() {
        let mut config = PipelineConfig::default();
        config.toolkit.commands.insert(
            Stage::HazeRemoval,
            ToolCommand::new("hazerem", vec!["{input}".into(), "{output}".into()]),
        );

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains(r#""bands_to_drop":[1,4,6,7,8]"#));
        assert!(text.contains(r#""haze_removal":{"program":"hazerem""#));

        let back: PipelineConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.toolkit.command_for(Stage::HazeRemoval).program, "hazerem");
        assert_eq!(back.toolkit.command_for(Stage::AtmosphericCorrection).program, "python");
    }

    #[test]
    fn validate_rejects_bad_band_order() {
        let mut config = PipelineConfig::default();
        config.mosaic_band_order = [3, 0, 1];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_pattern() {
        let mut config = PipelineConfig::default();
        config.scene_pattern = "[*_MTL.txt".to_string();
        assert!(matches!(config.validate(), Err(Error::Pattern(_))));
    }
}
