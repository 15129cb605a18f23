use std::path::Path;

use serde_json::{Value, json};
use tracing::info;

use crate::core::processing::pipeline::RunReport;
use crate::error::Result;

/// Convert a run report to JSON, adding provenance fields
pub fn report_to_json(report: &RunReport) -> Result<Value> {
    let mut value = serde_json::to_value(report)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "summary".to_string(),
            json!({
                "scenes": report.scenes.len(),
                "succeeded": report.succeeded(),
                "failed": report.failed(),
                "skipped": report.skipped(),
            }),
        );
        map.insert(
            "conversion_tool".to_string(),
            Value::String(env!("CARGO_PKG_NAME").to_string()),
        );
        map.insert(
            "conversion_version".to_string(),
            Value::String(env!("CARGO_PKG_VERSION").to_string()),
        );
    }
    Ok(value)
}

/// Write the run report as pretty-printed JSON
pub fn write_report_json(report: &RunReport, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(&report_to_json(report)?)?;
    std::fs::write(path, json_string)?;
    info!("Run report written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::stage::{StageOutcome, StageStatus};
    use crate::types::Stage;
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            started_at: chrono::Utc::now(),
            elapsed_seconds: 4,
            output_dir: PathBuf::from("/w/outputs"),
            scenes: Vec::new(),
            mosaic: vec![
                StageOutcome {
                    stage: Stage::MosaicExecution,
                    scene: None,
                    input: PathBuf::from("/w/outputs/mosaic/mosdef.xml"),
                    output: PathBuf::from("/w/outputs/mosaic/mosaic_output"),
                    status: StageStatus::Succeeded,
                },
                StageOutcome {
                    stage: Stage::CutlineExport,
                    scene: None,
                    input: PathBuf::from("cutline_topology.pix"),
                    output: PathBuf::from("cutlines.shp"),
                    status: StageStatus::Failed("segment 2 missing".into()),
                },
            ],
        }
    }

    #[test]
    fn json_carries_summary_and_statuses() {
        let value = report_to_json(&report()).unwrap();
        assert_eq!(value["summary"]["succeeded"], 1);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["mosaic"][0]["stage"], "mosaic_execution");
        assert_eq!(value["mosaic"][1]["status"]["state"], "failed");
        assert_eq!(value["mosaic"][1]["status"]["detail"], "segment 2 missing");
        assert_eq!(value["conversion_tool"], "lsmosaic");
    }

    #[test]
    fn writes_report_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.json");
        write_report_json(&report(), &path).unwrap();
        let parsed: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.elapsed_seconds, 4);
        assert_eq!(parsed.mosaic.len(), 2);
    }
}
