//! 列推定・ヘッダー検出
//!
//! Checklists arrive without reliable headers and with vendor-specific column
//! orders. The team column is found by how many of its cells are franchise
//! names, the player column sits next to it, and the card-type column is the
//! remaining column richest in card-type keywords.
//!
//! Inference never fails. A weak guess is fine: rows that do not yield a
//! player and a team are dropped by the record builder.

use crate::grid::{Cell, RawCellGrid};
use crate::normalizer::is_known_team;

/// Words typical of card-type descriptors
pub const CARD_TYPE_KEYWORDS: &[&str] = &[
    "base",
    "set",
    "auto",
    "autograph",
    "signature",
    "patch",
    "relic",
    "mem",
    "jersey",
    "logoman",
    "rookie",
    "insert",
    "variation",
    "parallel",
];

const HEADER_MARKERS: &[&str] = &["player", "team"];

/// 先頭行がヘッダーか判定する
///
/// Only `player` / `team` are recognized. A header worded differently
/// (`Name`, `Club`) is kept and later becomes a one-row record.
pub fn is_header_row(row: &[Cell]) -> bool {
    row.iter()
        .filter_map(Cell::as_text)
        .map(str::to_lowercase)
        .any(|text| HEADER_MARKERS.iter().any(|m| text.contains(m)))
}

/// 推定結果
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInference {
    pub player: usize,
    pub team: usize,
    pub card_type: usize,
    /// Share of the team column's non-empty cells that are franchise names
    pub team_ratio: f64,
    /// Keyword-bearing cells in the card-type column
    pub card_type_hits: usize,
    /// True when any column came from the positional fallback
    pub used_fallback: bool,
}

/// 列ごとのチーム名一致率
pub fn team_match_ratio<'a>(cells: impl Iterator<Item = &'a Cell>) -> f64 {
    let (filled, matches) = cells
        .filter(|c| !c.is_empty())
        .fold((0usize, 0usize), |(filled, matches), cell| {
            let hit = is_known_team(&cell.to_string());
            (filled + 1, matches + usize::from(hit))
        });

    if filled == 0 {
        0.0
    } else {
        matches as f64 / filled as f64
    }
}

/// 列ごとのカード種別キーワード出現数（テキストセルのみ）
pub fn card_type_keyword_hits<'a>(cells: impl Iterator<Item = &'a Cell>) -> usize {
    cells
        .filter_map(Cell::as_text)
        .map(str::to_lowercase)
        .filter(|text| CARD_TYPE_KEYWORDS.iter().any(|k| text.contains(k)))
        .count()
}

/// 選手・チーム・カード種別の列を推定する
///
/// # Arguments
/// * `grid` - 空列除去・ヘッダー除去済みのグリッド（幅 1 以上）
///
/// Ties go to the lowest column index. Columns with no signal at all fall
/// back to: team = last, player = second-to-last, card type = first.
pub fn infer_columns(grid: &RawCellGrid) -> ColumnInference {
    let width = grid.width();
    let mut used_fallback = false;

    // 1. チーム列: 一致率最大（0 は不採用）
    let mut team: Option<(usize, f64)> = None;
    for col in 0..width {
        let ratio = team_match_ratio(grid.column(col));
        if ratio > team.map(|(_, best)| best).unwrap_or(0.0) {
            team = Some((col, ratio));
        }
    }

    // 2. 選手列: チーム列の左隣、先頭列なら右隣
    let player = team.and_then(|(col, _)| {
        if col > 0 {
            Some(col - 1)
        } else if col + 1 < width {
            Some(col + 1)
        } else {
            None
        }
    });

    // 3. カード種別列: 残りの列でキーワード出現数最大
    let mut card_type: Option<(usize, usize)> = None;
    for col in 0..width {
        if Some(col) == player || Some(col) == team.map(|(c, _)| c) {
            continue;
        }
        let hits = card_type_keyword_hits(grid.column(col));
        if hits > card_type.map(|(_, best)| best).unwrap_or(0) {
            card_type = Some((col, hits));
        }
    }

    let (team, team_ratio) = team.unwrap_or_else(|| {
        used_fallback = true;
        (width.saturating_sub(1), 0.0)
    });
    let player = player.unwrap_or_else(|| {
        used_fallback = true;
        width.saturating_sub(2)
    });
    let (card_type, card_type_hits) = card_type.unwrap_or_else(|| {
        used_fallback = true;
        (0, 0)
    });

    ColumnInference {
        player,
        team,
        card_type,
        team_ratio,
        card_type_hits,
        used_fallback,
    }
}
