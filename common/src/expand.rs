//! 複数選手・複数チームの展開
//!
//! Dual/triple cards list several names separated by `/`. For per-entity
//! grouping each name gets its own view of the card. Views borrow the source
//! record, so card type, numbering and score are exactly the source's.

use crate::categorizer::Category;
use crate::scoring::{record_category, record_score};
use crate::types::{CanonicalCardRecord, Provenance, MULTI_VALUE_DELIMITER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a view is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Player => write!(f, "player"),
            EntityKind::Team => write!(f, "team"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" | "players" | "p" => Ok(EntityKind::Player),
            "team" | "teams" | "t" => Ok(EntityKind::Team),
            _ => Err(format!("Unknown entity: {}. Use player or team", s)),
        }
    }
}

/// 1 エンティティ分のビュー
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedEntityRecord<'a> {
    kind: EntityKind,
    entity: &'a str,
    source: &'a CanonicalCardRecord,
}

impl<'a> ExpandedEntityRecord<'a> {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The single name this view is keyed on
    pub fn entity(&self) -> &'a str {
        self.entity
    }

    pub fn source(&self) -> &'a CanonicalCardRecord {
        self.source
    }

    pub fn player(&self) -> &'a str {
        match self.kind {
            EntityKind::Player => self.entity,
            EntityKind::Team => self.source.player(),
        }
    }

    pub fn team(&self) -> &'a str {
        match self.kind {
            EntityKind::Team => self.entity,
            EntityKind::Player => self.source.team(),
        }
    }

    pub fn card_type(&self) -> &'a str {
        self.source.card_type()
    }

    pub fn numbering(&self) -> Option<u32> {
        self.source.numbering()
    }

    pub fn provenance(&self) -> &'a Provenance {
        self.source.provenance()
    }

    pub fn category(&self) -> Category {
        record_category(self.source)
    }

    /// Full score of the source card
    pub fn score(&self) -> f64 {
        record_score(self.source)
    }
}

/// `/` 区切りの値を分割（空要素は除外）
pub fn split_multi_value(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(MULTI_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// レコードをエンティティ単位に展開する
pub fn expand(record: &CanonicalCardRecord, kind: EntityKind) -> Vec<ExpandedEntityRecord<'_>> {
    let field = match kind {
        EntityKind::Player => record.player(),
        EntityKind::Team => record.team(),
    };

    split_multi_value(field)
        .map(|entity| ExpandedEntityRecord { kind, entity, source: record })
        .collect()
}

/// 全レコードを展開
pub fn expand_all(records: &[CanonicalCardRecord], kind: EntityKind) -> Vec<ExpandedEntityRecord<'_>> {
    records.iter().flat_map(|r| expand(r, kind)).collect()
}
