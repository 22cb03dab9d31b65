//! 正規化済みレコードの型定義
//!
//! - Provenance: ファイル名から得たメタデータ
//! - CanonicalCardRecord: 1 枚のカード（不変）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Delimiter between names on dual/triple cards
pub const MULTI_VALUE_DELIMITER: char = '/';

/// Where a record came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source_file: String,
    /// `YYYY-YY` season token or `"Unknown"`
    pub year: String,
    pub product: String,
}

/// 正規化済みカードレコード
///
/// `player` / `team` are non-empty after trimming and may hold several
/// `/`-delimited names. `numbering` is the print-run denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCardRecord {
    player: String,
    team: String,
    card_type: String,
    numbering: Option<u32>,
    #[serde(flatten)]
    provenance: Provenance,
}

impl CanonicalCardRecord {
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        card_type: impl Into<String>,
        numbering: Option<u32>,
        provenance: Provenance,
    ) -> Result<Self> {
        let player = player.into().trim().to_string();
        let team = team.into().trim().to_string();

        if player.is_empty() {
            return Err(Error::MissingPlayer);
        }
        if team.is_empty() {
            return Err(Error::MissingTeam);
        }
        if numbering == Some(0) {
            return Err(Error::InvalidNumbering(0));
        }

        Ok(Self {
            player,
            team,
            card_type: card_type.into().trim().to_string(),
            numbering,
            provenance,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    pub fn numbering(&self) -> Option<u32> {
        self.numbering
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn source_file(&self) -> &str {
        &self.provenance.source_file
    }

    pub fn year(&self) -> &str {
        &self.provenance.year
    }

    pub fn product(&self) -> &str {
        &self.provenance.product
    }

    /// 複数選手カードか
    pub fn is_multi_player(&self) -> bool {
        self.player.contains(MULTI_VALUE_DELIMITER)
    }

    pub fn is_multi_team(&self) -> bool {
        self.team.contains(MULTI_VALUE_DELIMITER)
    }
}

#[cfg(test)]
pub(crate) fn test_provenance() -> Provenance {
    Provenance {
        source_file: "2025-26-Topps-Chrome-Basketball-Checklist.xlsx".to_string(),
        year: "2025-26".to_string(),
        product: "Topps Chrome Basketball".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_trims_fields() {
        let record = CanonicalCardRecord::new(
            "  Stephen Curry ",
            " Golden State Warriors",
            " Base ",
            None,
            test_provenance(),
        )
        .unwrap();
        assert_eq!(record.player(), "Stephen Curry");
        assert_eq!(record.team(), "Golden State Warriors");
        assert_eq!(record.card_type(), "Base");
        assert_eq!(record.year(), "2025-26");
    }

    #[test]
    fn test_record_rejects_empty_player_or_team() {
        let err = CanonicalCardRecord::new("  ", "Lakers", "Base", None, test_provenance());
        assert!(matches!(err, Err(Error::MissingPlayer)));
        let err = CanonicalCardRecord::new("A", "", "Base", None, test_provenance());
        assert!(matches!(err, Err(Error::MissingTeam)));
    }

    #[test]
    fn test_record_rejects_zero_numbering() {
        let err = CanonicalCardRecord::new("A", "B", "Base", Some(0), test_provenance());
        assert!(matches!(err, Err(Error::InvalidNumbering(0))));
    }

    #[test]
    fn test_multi_value_detection() {
        let record = CanonicalCardRecord::new(
            "LeBron James/Anthony Davis",
            "Los Angeles Lakers",
            "Dual Auto",
            Some(10),
            test_provenance(),
        )
        .unwrap();
        assert!(record.is_multi_player());
        assert!(!record.is_multi_team());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = CanonicalCardRecord::new("A", "B", "Auto", Some(25), test_provenance()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cardType"], "Auto");
        assert_eq!(json["numbering"], 25);
        assert_eq!(json["sourceFile"], "2025-26-Topps-Chrome-Basketball-Checklist.xlsx");
    }
}
