pub mod excel;
pub mod json;

pub use json::{write_report, ScoreReport};

use crate::error::{ChecklistError, Result};
use crate::pipeline::{file_name_of, parse_file, FileError};
use crate::reader::SheetNames;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 整形済みファイル1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
}

/// 一括整形の結果
#[derive(Debug, Clone, Default)]
pub struct CleanSummary {
    pub files: Vec<CleanedFile>,
    pub errors: Vec<FileError>,
}

impl CleanSummary {
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }
}

/// 入力ファイルごとに整形済みワークブックを書き出す
///
/// # Arguments
/// * `paths` - 入力ファイル
/// * `output_dir` - 出力先（`<output_dir>/<ファイル名>`）
/// * `sheets` - シート名（出力シート名は `sheets.clean`）
/// * `on_file` - 1ファイル終了ごとに呼ばれる
pub fn clean_batch<F>(
    paths: &[PathBuf],
    output_dir: &Path,
    sheets: &SheetNames,
    on_file: F,
) -> Result<CleanSummary>
where
    F: Fn(&Path),
{
    let mut summary = CleanSummary::default();

    for path in paths {
        let file_name = file_name_of(path);
        let output = output_dir.join(&file_name);

        let result = parse_file(path, sheets).and_then(|records| {
            excel::write_clean_workbook(&records, path, &output, &sheets.clean)?;
            Ok(records.len())
        });
        on_file(path);

        match result {
            Ok(rows) => summary.files.push(CleanedFile {
                source: path.clone(),
                output,
                rows,
            }),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping checklist");
                summary.errors.push(FileError {
                    file_name,
                    message: e.to_string(),
                });
            }
        }
    }

    if summary.total_rows() == 0 {
        return Err(ChecklistError::NoValidRecords(summary.errors));
    }

    Ok(summary)
}
