//! レコード構築
//!
//! Turns one worksheet grid into canonical records.
//!
//! ## 処理フロー（生シート）
//! 1. 全セル空の列を除去
//! 2. 先頭行がヘッダーなら除去
//! 3. 選手・チーム・カード種別の列を推定
//! 4. 行ごとに検証・正規化（選手/チーム空の行は破棄）
//!
//! Each call works on its own grid only, so files can be built in parallel.

use crate::grid::{Cell, RawCellGrid};
use crate::normalizer::{clean_player_name, extract_numbering, normalize_team_field, parse_numbering};
use crate::schema::{infer_columns, is_header_row, ColumnInference};
use crate::types::{CanonicalCardRecord, Provenance};
use regex::Regex;
use tracing::debug;

/// Fallback for year and product
pub const UNKNOWN: &str = "Unknown";

/// Generic words dropped from product labels
const GENERIC_WORDS: &[&str] = &["checklist", "checklists"];

/// Fixed column order of a pre-cleaned worksheet
pub const CLEAN_HEADER: [&str; 4] = ["Player", "Team", "Card Type", "Numbering"];

lazy_static::lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"\d{4}-\d{2}").unwrap();
    static ref SEPARATOR_RE: Regex = Regex::new(r"[-_.]+").unwrap();
}

/// ファイル名からシーズン（`YYYY-YY`）を取得
pub fn extract_year(file_name: &str) -> String {
    YEAR_RE
        .find(file_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// ファイル名から商品名を取得
///
/// `"2025-26-Topps-Chrome-Basketball-Checklist.xlsx"` → `"Topps Chrome Basketball"`
pub fn extract_product(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let without_year = YEAR_RE.replace_all(stem, " ");
    let spaced = SEPARATOR_RE.replace_all(&without_year, " ");

    let product = spaced
        .split_whitespace()
        .filter(|word| !GENERIC_WORDS.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    if product.is_empty() {
        UNKNOWN.to_string()
    } else {
        product
    }
}

impl Provenance {
    pub fn from_file_name(file_name: &str) -> Self {
        Self {
            source_file: file_name.to_string(),
            year: extract_year(file_name),
            product: extract_product(file_name),
        }
    }
}

/// 構築結果（診断情報つき）
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub records: Vec<CanonicalCardRecord>,
    /// None for pre-cleaned sheets
    pub inference: Option<ColumnInference>,
    pub header_dropped: bool,
    pub rows_discarded: usize,
}

fn cell_text(cell: &Cell) -> String {
    cell.to_string().trim().to_string()
}

/// `player` is already cleaned by the caller.
fn build_row(
    player: String,
    team: &Cell,
    card_type: &Cell,
    numbering: Option<u32>,
    provenance: &Provenance,
) -> Option<CanonicalCardRecord> {
    let team = normalize_team_field(&team.to_string());

    CanonicalCardRecord::new(player, team, cell_text(card_type), numbering, provenance.clone()).ok()
}

/// 生シートからレコードを構築する
pub fn build_records(grid: &RawCellGrid, provenance: &Provenance) -> BuildOutcome {
    let grid = grid.without_empty_columns();
    if grid.is_empty() {
        return BuildOutcome::default();
    }

    let header_dropped = grid.row(0).map(is_header_row).unwrap_or(false);
    let body = if header_dropped { grid.skip_rows(1) } else { grid };
    if body.is_empty() {
        return BuildOutcome { header_dropped, ..Default::default() };
    }

    let inference = infer_columns(&body);
    debug!(
        file = %provenance.source_file,
        player = inference.player,
        team = inference.team,
        card_type = inference.card_type,
        team_ratio = inference.team_ratio,
        fallback = inference.used_fallback,
        "inferred columns"
    );

    let mut records = Vec::with_capacity(body.height());
    let mut rows_discarded = 0;

    for row in body.rows() {
        let numbering = extract_numbering(row).as_deref().and_then(parse_numbering);
        let record = build_row(
            clean_player_name(&row[inference.player].to_string()),
            &row[inference.team],
            &row[inference.card_type],
            numbering,
            provenance,
        );
        match record {
            Some(r) => records.push(r),
            None => rows_discarded += 1,
        }
    }

    debug!(file = %provenance.source_file, kept = records.len(), discarded = rows_discarded, "built records");

    BuildOutcome {
        records,
        inference: Some(inference),
        header_dropped,
        rows_discarded,
    }
}

/// 整形済みセルの番号を読む（数値・数字列・`/数字`）
fn clean_numbering(cell: &Cell) -> Option<u32> {
    match cell {
        Cell::Number(n) if n.is_finite() && *n >= 1.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
            Some(*n as u32)
        }
        Cell::Text(s) => {
            let s = s.trim();
            parse_numbering(s.strip_prefix('/').unwrap_or(s))
        }
        _ => None,
    }
}

/// 整形済みシート（Player / Team / Card Type / Numbering）からレコードを構築する
pub fn build_precleaned_records(grid: &RawCellGrid, provenance: &Provenance) -> BuildOutcome {
    if grid.is_empty() {
        return BuildOutcome::default();
    }

    let header_dropped = grid.row(0).map(is_header_row).unwrap_or(false);
    let skip = usize::from(header_dropped);

    let mut records = Vec::with_capacity(grid.height());
    let mut rows_discarded = 0;

    for row_idx in skip..grid.height() {
        // 書き出し済みの値なので末尾カンマは残す
        let record = build_row(
            cell_text(grid.cell(row_idx, 0)),
            grid.cell(row_idx, 1),
            grid.cell(row_idx, 2),
            clean_numbering(grid.cell(row_idx, 3)),
            provenance,
        );
        match record {
            Some(r) => records.push(r),
            None => rows_discarded += 1,
        }
    }

    BuildOutcome {
        records,
        inference: None,
        header_dropped,
        rows_discarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::Category;
    use crate::scoring::ScoredRecord;

    fn text(s: &str) -> Cell {
        Cell::text(s)
    }

    fn provenance() -> Provenance {
        Provenance::from_file_name("2025-26-Topps-Chrome-Basketball-Checklist.xlsx")
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2025-26-Topps-Chrome-Basketball-Checklist.xlsx"), "2025-26");
        assert_eq!(extract_year("Prizm 2023-24 checklist.xlsx"), "2023-24");
        assert_eq!(extract_year("Hoops.xlsx"), "Unknown");
    }

    #[test]
    fn test_extract_product() {
        assert_eq!(
            extract_product("2025-26-Topps-Chrome-Basketball-Checklist.xlsx"),
            "Topps Chrome Basketball"
        );
        assert_eq!(extract_product("Panini  Prizm_2023-24 CHECKLIST.xlsx"), "Panini Prizm");
        assert_eq!(extract_product("2024-25-checklist.xlsx"), "Unknown");
    }

    #[test]
    fn test_end_to_end_two_rows() {
        let grid = RawCellGrid::new(vec![
            vec![text("Auto"), Cell::Empty, text("LeBron James,"), text("lakers"), Cell::Empty, text("/25")],
            vec![text("Base"), Cell::Empty, text("Stephen Curry"), text("Golden State Warriors"), Cell::Empty, Cell::Empty],
        ]);
        let outcome = build_records(&grid, &provenance());

        assert!(!outcome.header_dropped);
        assert_eq!(outcome.records.len(), 2);

        let first = ScoredRecord::from_record(&outcome.records[0]);
        assert_eq!(first.record.player(), "LeBron James");
        assert_eq!(first.record.team(), "Los Angeles Lakers");
        assert_eq!(first.record.card_type(), "Auto");
        assert_eq!(first.record.numbering(), Some(25));
        assert_eq!(first.category, Category::AutoMem);
        assert!((first.rarity_multiplier - 5.0).abs() < 1e-9);
        assert!((first.score - 100.0).abs() < 1e-9);

        let second = ScoredRecord::from_record(&outcome.records[1]);
        assert_eq!(second.record.player(), "Stephen Curry");
        assert_eq!(second.record.team(), "Golden State Warriors");
        assert_eq!(second.record.numbering(), None);
        assert_eq!(second.category, Category::BaseOther);
        assert!((second.rarity_multiplier - 1.0).abs() < 1e-9);
        assert!((second.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_header_row_dropped() {
        let grid = RawCellGrid::new(vec![
            vec![text("Card Type"), text("Player"), text("Team")],
            vec![text("Base"), text("Ja Morant"), text("Memphis")],
        ]);
        let outcome = build_records(&grid, &provenance());
        assert!(outcome.header_dropped);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].team(), "Memphis Grizzlies");
    }

    #[test]
    fn test_unrecognized_header_becomes_record() {
        let grid = RawCellGrid::new(vec![
            vec![text("Type"), text("Name"), text("Club")],
            vec![text("Base"), text("Ja Morant"), text("Memphis")],
            vec![text("Base"), text("Trae Young"), text("Hawks")],
        ]);
        let outcome = build_records(&grid, &provenance());
        assert!(!outcome.header_dropped);
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.records[0].player(), "Name");
        assert_eq!(outcome.records[0].team(), "Club");
    }

    #[test]
    fn test_rows_missing_player_or_team_discarded() {
        let grid = RawCellGrid::new(vec![
            vec![text("Auto"), text("Luka Doncic"), text("Dallas")],
            vec![text("Auto"), Cell::Empty, text("Dallas")],
            vec![text("Auto"), text(","), text("Dallas")],
            vec![text("Auto"), text("Kyrie Irving"), text("  ")],
            vec![Cell::Empty, Cell::Empty, Cell::Empty],
        ]);
        let outcome = build_records(&grid, &provenance());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.rows_discarded, 4);
    }

    #[test]
    fn test_unknown_team_passes_through() {
        let grid = RawCellGrid::new(vec![
            vec![text("Base"), text("A"), text("Lakers")],
            vec![text("Base"), text("B"), text("Rookie Team USA")],
        ]);
        let outcome = build_records(&grid, &provenance());
        assert_eq!(outcome.records[1].team(), "Rookie Team USA");
    }

    #[test]
    fn test_zero_numbering_is_unnumbered() {
        let grid = RawCellGrid::new(vec![vec![text("Base /0"), text("A"), text("Lakers")]]);
        let outcome = build_records(&grid, &provenance());
        assert_eq!(outcome.records[0].numbering(), None);
    }

    #[test]
    fn test_numeric_player_cell() {
        let grid = RawCellGrid::new(vec![vec![text("Base"), Cell::Number(23.0), text("Bulls")]]);
        let outcome = build_records(&grid, &provenance());
        assert_eq!(outcome.records[0].player(), "23");
    }

    #[test]
    fn test_empty_grid() {
        let outcome = build_records(&RawCellGrid::default(), &provenance());
        assert!(outcome.records.is_empty());
        assert!(outcome.inference.is_none());

        let header_only = RawCellGrid::new(vec![vec![text("Player"), text("Team")]]);
        let outcome = build_records(&header_only, &provenance());
        assert!(outcome.header_dropped);
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn test_provenance_attached() {
        let grid = RawCellGrid::new(vec![vec![text("Base"), text("A"), text("Lakers")]]);
        let outcome = build_records(&grid, &provenance());
        let record = &outcome.records[0];
        assert_eq!(record.source_file(), "2025-26-Topps-Chrome-Basketball-Checklist.xlsx");
        assert_eq!(record.year(), "2025-26");
        assert_eq!(record.product(), "Topps Chrome Basketball");
    }

    #[test]
    fn test_build_precleaned_records() {
        let grid = RawCellGrid::new(vec![
            CLEAN_HEADER.iter().map(|h| text(h)).collect(),
            vec![text("LeBron James"), text("Los Angeles Lakers"), text("Auto"), Cell::Number(25.0)],
            vec![text("Stephen Curry"), text("warriors"), text("Base"), Cell::Empty],
            vec![text("Jayson Tatum"), text("Boston Celtics"), text("Patch"), text("/10")],
            vec![text(""), text("Boston Celtics"), text("Base"), Cell::Empty],
        ]);
        let outcome = build_precleaned_records(&grid, &provenance());
        assert!(outcome.header_dropped);
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.rows_discarded, 1);
        assert_eq!(outcome.records[0].numbering(), Some(25));
        assert_eq!(outcome.records[1].team(), "Golden State Warriors");
        assert_eq!(outcome.records[1].numbering(), None);
        assert_eq!(outcome.records[2].numbering(), Some(10));
    }

    #[test]
    fn test_precleaned_player_keeps_trailing_comma() {
        let grid = RawCellGrid::new(vec![
            vec![text(" Gary Payton II, "), text("Golden State Warriors"), text("Base"), Cell::Empty],
        ]);
        let outcome = build_precleaned_records(&grid, &provenance());
        assert_eq!(outcome.records[0].player(), "Gary Payton II,");
    }

    #[test]
    fn test_multi_team_field_normalized_per_segment() {
        let grid = RawCellGrid::new(vec![
            vec![text("Dual Auto"), text("LeBron James/Jayson Tatum"), text("lakers/celtics")],
            vec![text("Base"), text("Anthony Davis"), text("Lakers")],
        ]);
        let outcome = build_records(&grid, &provenance());
        assert_eq!(outcome.records[0].team(), "Los Angeles Lakers/Boston Celtics");
        assert!(outcome.records[0].is_multi_team());

        let teams = crate::aggregate::tally_by(&outcome.records, crate::expand::EntityKind::Team, None);
        let lakers = teams.iter().find(|t| t.entity == "Los Angeles Lakers").unwrap();
        assert_eq!(lakers.cards, 2);
        assert_eq!(teams.len(), 2);
    }

    #[test]
    fn test_clean_numbering_rejects_fractions_and_zero() {
        assert_eq!(clean_numbering(&Cell::Number(2.5)), None);
        assert_eq!(clean_numbering(&Cell::Number(0.0)), None);
        assert_eq!(clean_numbering(&text("")), None);
        assert_eq!(clean_numbering(&text(" 99 ")), Some(99));
    }
}
