//! スコアレポート（JSON）

use crate::error::Result;
use crate::pipeline::{BatchOutcome, FileError};
use checklist_common::{score_records, ScoredRecord};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// RFC 3339, UTC
    pub generated_at: String,
    pub files_processed: usize,
    pub total_score: f64,
    pub records: Vec<ScoredRecord>,
    pub errors: Vec<FileError>,
}

impl ScoreReport {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        let records = score_records(&outcome.records);
        let total_score = records.iter().map(|r| r.score).sum();
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            files_processed: outcome.files_processed,
            total_score,
            records,
            errors: outcome.errors.clone(),
        }
    }
}

pub fn write_report(report: &ScoreReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, json)?;
    Ok(())
}
