//! レア度・スコア計算
//!
//! `score = weight(category) × rarity_multiplier(numbering)`
//!
//! The best AutoMem score (20 × 10 = 200) stays below the worst CaseHit
//! score (500 × 1), which stays below the worst TopTier score (1000 × 1).
//! Above AutoMem the print run can outweigh the category: a CaseHit /10
//! (5000) beats an unnumbered TopTier (1000).
//! Scores are projections of a record; nothing here is cached.

use crate::categorizer::{categorize, Category};
use crate::types::CanonicalCardRecord;
use serde::Serialize;

/// Upper bound of the rarity multiplier
pub const MAX_RARITY_MULTIPLIER: f64 = 10.0;

const RARITY_SCALE: f64 = 100.0;

/// カテゴリの重み
pub fn weight(category: Category) -> f64 {
    match category {
        Category::TopTier => 1000.0,
        Category::CaseHit => 500.0,
        Category::AutoMem => 20.0,
        Category::BaseOther => 1.0,
    }
}

/// print run からレア度倍率を計算（番号なしは 1.0）
pub fn rarity_multiplier(numbering: Option<u32>) -> f64 {
    match numbering {
        Some(n) if n > 0 => (1.0 + RARITY_SCALE / n as f64).min(MAX_RARITY_MULTIPLIER),
        _ => 1.0,
    }
}

pub fn score(category: Category, numbering: Option<u32>) -> f64 {
    weight(category) * rarity_multiplier(numbering)
}

/// スコア付きレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CanonicalCardRecord,
    pub category: Category,
    pub rarity_multiplier: f64,
    pub score: f64,
}

impl ScoredRecord {
    pub fn from_record(record: &CanonicalCardRecord) -> Self {
        let category = categorize(record.card_type());
        let rarity_multiplier = rarity_multiplier(record.numbering());
        Self {
            record: record.clone(),
            category,
            rarity_multiplier,
            score: weight(category) * rarity_multiplier,
        }
    }
}

/// Category of a record, derived from its card type.
pub fn record_category(record: &CanonicalCardRecord) -> Category {
    categorize(record.card_type())
}

/// Score of a record, derived on every call.
pub fn record_score(record: &CanonicalCardRecord) -> f64 {
    score(record_category(record), record.numbering())
}

pub fn score_records(records: &[CanonicalCardRecord]) -> Vec<ScoredRecord> {
    records.iter().map(ScoredRecord::from_record).collect()
}
