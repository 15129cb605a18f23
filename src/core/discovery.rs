//! Scene discovery: a recursive walk collecting Landsat metadata files.
use std::path::Path;

use glob::Pattern;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::scene::Scene;
use crate::error::Result;

pub const DEFAULT_SCENE_PATTERN: &str = "*_MTL.txt";

/// Walk `root` and return every file whose name matches `pattern` (case-sensitive),
/// at any depth, in traversal order. With `sorted` the walk visits entries by file
/// name, which makes the order reproducible across filesystems.
///
/// Unreadable subdirectories are logged and skipped; an unreadable root is an error.
pub fn discover_scenes(root: &Path, pattern: &str, sorted: bool) -> Result<Vec<Scene>> {
    let pattern = Pattern::new(pattern)?;

    let mut walker = WalkDir::new(root);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut scenes = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            debug!("Found scene metadata: {:?}", entry.path());
            scenes.push(Scene::from_metadata_path(entry.path())?);
        }
    }

    info!("{} Landsat scenes collected", scenes.len());
    Ok(scenes)
}
