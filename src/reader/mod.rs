//! ワークブック読み込み
//!
//! Opens a checklist workbook with calamine and hands the chosen worksheet
//! to the core as a `RawCellGrid`.

use crate::error::{ChecklistError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use checklist_common::{Cell, RawCellGrid};
use std::path::Path;

/// シート名の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub raw: String,
    pub clean: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            raw: crate::config::DEFAULT_RAW_SHEET.to_string(),
            clean: crate::config::DEFAULT_CLEAN_SHEET.to_string(),
        }
    }
}

/// シートの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// 列構成不明（推定が必要）
    Raw,
    /// Player / Team / Card Type / Numbering
    PreCleaned,
}

/// 読み込んだシート
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub layout: SheetLayout,
    pub grid: RawCellGrid,
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

fn range_to_grid(range: &Range<Data>) -> RawCellGrid {
    RawCellGrid::new(
        range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect(),
    )
}

/// チェックリストを読み込む
///
/// 整形済みシートがあればそれを優先し、なければ生データのシートを読む。
pub fn load_sheet(path: &Path, sheets: &SheetNames) -> Result<LoadedSheet> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ChecklistError::UnreadableFile(format!("{}: {}", file_name, e)))?;
    let names = workbook.sheet_names();

    let (sheet, layout) = if names.iter().any(|n| n == &sheets.clean) {
        (sheets.clean.as_str(), SheetLayout::PreCleaned)
    } else if names.iter().any(|n| n == &sheets.raw) {
        (sheets.raw.as_str(), SheetLayout::Raw)
    } else {
        return Err(ChecklistError::MissingWorksheet {
            file: file_name,
            sheet: sheets.raw.clone(),
        });
    };

    let range = workbook.worksheet_range(sheet)?;

    Ok(LoadedSheet {
        layout,
        grid: range_to_grid(&range),
    })
}
