//! 正規化モジュール
//!
//! Cell-level normalization used while building canonical records.
//!
//! ## 処理内容
//! 1. チーム名を 30 フランチャイズ名に統一
//! 2. 行から print run の分母を抽出

pub mod numbering;
pub mod team;

pub use numbering::{extract_numbering, parse_numbering};
pub use team::{canonical_team, is_known_team, normalize_team, normalize_team_field, FRANCHISES};

/// 選手名の後処理（リスト形式由来の末尾カンマを1つ除去）
pub fn clean_player_name(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_suffix(',')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}
