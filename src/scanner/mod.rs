use crate::error::{ChecklistError, Result};
use checklist_common::builder::{extract_year, UNKNOWN};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistFile {
    pub path: PathBuf,
    pub file_name: String,
    /// `YYYY-YY` or `"Unknown"`
    pub year: String,
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

fn is_spreadsheet_extension(ext: &str) -> bool {
    SPREADSHEET_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Excel のロックファイル（`~$...`）と隠しファイルは除外
fn is_skipped_name(file_name: &str) -> bool {
    file_name.starts_with("~$") || file_name.starts_with('.')
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ChecklistFile>> {
    if !folder.exists() {
        return Err(ChecklistError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if is_skipped_name(&file_name) {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_spreadsheet_extension(&ext.to_string_lossy()) {
                files.push(ChecklistFile {
                    path: path.to_path_buf(),
                    year: extract_year(&file_name),
                    file_name,
                });
            }
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// 入力パスを展開（フォルダは直下のチェックリスト、ファイルはそのまま）
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(scan_folder(input)?.into_iter().map(|f| f.path));
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            return Err(ChecklistError::FolderNotFound(input.display().to_string()));
        }
    }

    if paths.is_empty() {
        let joined: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        return Err(ChecklistError::NoFilesFound(joined.join(", ")));
    }

    Ok(paths)
}

/// 年度ごとにグループ化（新しい年度が先、不明は最後）
pub fn group_by_year(files: &[ChecklistFile]) -> Vec<(String, Vec<&ChecklistFile>)> {
    let mut groups: BTreeMap<&str, Vec<&ChecklistFile>> = BTreeMap::new();
    for file in files {
        groups.entry(file.year.as_str()).or_default().push(file);
    }

    let unknown = groups.remove(UNKNOWN);
    groups
        .into_iter()
        .rev()
        .chain(unknown.map(|files| (UNKNOWN, files)))
        .map(|(year, files)| (year.to_string(), files))
        .collect()
}
