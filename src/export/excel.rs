//! 整形済みシートの出力
//!
//! Writes the fixed 4-column layout that is read back as pre-cleaned input.

use crate::error::{ChecklistError, Result};
use checklist_common::{CanonicalCardRecord, CLEAN_HEADER};
use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use std::path::Path;

const COLUMN_WIDTHS: [f64; 4] = [32.0, 26.0, 36.0, 12.0];

/// 整形済みシートをバッファに生成
pub fn generate_clean_buffer(records: &[CanonicalCardRecord], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, (title, width)) in CLEAN_HEADER.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string(row, 0, record.player())?;
        worksheet.write_string(row, 1, record.team())?;
        worksheet.write_string(row, 2, record.card_type())?;
        // 番号なしは空セル
        if let Some(n) = record.numbering() {
            worksheet.write_number(row, 3, n as f64)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// 整形済みシートをファイルに書き出す
///
/// 入力ファイル自体への上書きは拒否する。
pub fn write_clean_workbook(
    records: &[CanonicalCardRecord],
    source_path: &Path,
    output_path: &Path,
    sheet_name: &str,
) -> Result<()> {
    if same_file(source_path, output_path) {
        return Err(ChecklistError::ExcelGeneration(format!(
            "入力ファイルには上書きできません: {}",
            output_path.display()
        )));
    }

    let buffer = generate_clean_buffer(records, sheet_name)?;
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
