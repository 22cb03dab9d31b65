//! シリアル番号（print run）の抽出
//!
//! Vendors write the print-run denominator either inside descriptive text
//! (`"Gold /10"`) or split across cells around a bare `/` glyph
//! (`[.., 49, "/", ..]`). Both layouts are recovered here.
//!
//! A stray `/` cell next to an unrelated number is read as numbering too;
//! nothing in a row tells the two apart.

use crate::grid::Cell;
use regex::Regex;

lazy_static::lazy_static! {
    static ref SLASH_DIGITS_RE: Regex = Regex::new(r"/\s*(\d+)").unwrap();
}

/// 行から print run の分母を抽出する
///
/// 1. `/` + 数字 を含むテキストセル（最初の一致）
/// 2. `/` だけのセルの左右隣の数値セル
/// 3. 見つからなければ `None`
pub fn extract_numbering(row: &[Cell]) -> Option<String> {
    from_embedded_text(row).or_else(|| from_bare_slash(row))
}

fn from_embedded_text(row: &[Cell]) -> Option<String> {
    row.iter()
        .filter_map(Cell::as_text)
        .find_map(|text| SLASH_DIGITS_RE.captures(text).map(|caps| caps[1].to_string()))
}

fn from_bare_slash(row: &[Cell]) -> Option<String> {
    row.iter()
        .enumerate()
        .filter(|(_, cell)| cell.as_text().map(|t| t.trim() == "/").unwrap_or(false))
        .find_map(|(idx, _)| {
            let left = idx.checked_sub(1).and_then(|i| row.get(i));
            let right = row.get(idx + 1);
            [left, right]
                .into_iter()
                .flatten()
                .find_map(numeric_neighbor)
        })
}

fn numeric_neighbor(cell: &Cell) -> Option<String> {
    let n = cell.as_number()?;
    if n < 0.0 {
        return None;
    }
    Some((n.trunc() as u64).to_string())
}

/// 抽出した数字列を正の整数に変換（0・桁あふれは番号なし扱い）
pub fn parse_numbering(digits: &str) -> Option<u32> {
    digits.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
