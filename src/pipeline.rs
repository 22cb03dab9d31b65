//! バッチ処理
//!
//! Each file is parsed on its own (`parse_file` touches no shared state), so
//! the batch can run sequentially or on a rayon pool with the same result.
//! A failing file is recorded and skipped; only a batch without a single
//! valid record is an error.

use crate::error::{ChecklistError, Result};
use crate::reader::{load_sheet, SheetLayout, SheetNames};
use checklist_common::{build_precleaned_records, build_records, BuildOutcome, CanonicalCardRecord, Provenance};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// ファイル単位のエラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileError {
    pub file_name: String,
    pub message: String,
}

/// バッチオプション
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub sheets: SheetNames,
    pub parallel: bool,
}

/// バッチ結果
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<CanonicalCardRecord>,
    pub errors: Vec<FileError>,
    /// Files that produced a record list (possibly empty)
    pub files_processed: usize,
    /// Per-file record counts in input order, failed files excluded
    pub per_file: Vec<(PathBuf, usize)>,
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 1ファイルを解析する
pub fn parse_file(path: &Path, sheets: &SheetNames) -> Result<Vec<CanonicalCardRecord>> {
    let file_name = file_name_of(path);
    let sheet = load_sheet(path, sheets)?;
    let provenance = Provenance::from_file_name(&file_name);

    let outcome: BuildOutcome = match sheet.layout {
        SheetLayout::Raw => build_records(&sheet.grid, &provenance),
        SheetLayout::PreCleaned => build_precleaned_records(&sheet.grid, &provenance),
    };

    debug!(
        file = %file_name,
        layout = ?sheet.layout,
        records = outcome.records.len(),
        discarded = outcome.rows_discarded,
        header_dropped = outcome.header_dropped,
        "parsed checklist"
    );

    Ok(outcome.records)
}

/// 複数ファイルを解析する
///
/// # Arguments
/// * `paths` - 入力ファイル
/// * `options` - シート名・並列実行
/// * `on_file` - 1ファイル終了ごとに呼ばれる（進捗表示用）
pub fn load_batch<F>(paths: &[PathBuf], options: &BatchOptions, on_file: F) -> Result<BatchOutcome>
where
    F: Fn(&Path) + Sync,
{
    let parse = |path: &PathBuf| {
        let result = parse_file(path, &options.sheets);
        on_file(path);
        result
    };

    let results: Vec<Result<Vec<CanonicalCardRecord>>> = if options.parallel {
        paths.par_iter().map(parse).collect()
    } else {
        paths.iter().map(parse).collect()
    };

    let mut outcome = BatchOutcome::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(records) => {
                outcome.files_processed += 1;
                outcome.per_file.push((path.clone(), records.len()));
                outcome.records.extend(records);
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping checklist");
                outcome.errors.push(FileError {
                    file_name: file_name_of(path),
                    message: e.to_string(),
                });
            }
        }
    }

    if outcome.records.is_empty() {
        return Err(ChecklistError::NoValidRecords(outcome.errors));
    }

    Ok(outcome)
}
