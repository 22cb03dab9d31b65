//! 集計
//!
//! Read-only rollups over the finished record collection.
//! Entity tallies work on expanded views: a dual card counts in full for each
//! named player. Global totals work on the records themselves: every physical
//! card counts once.

use crate::categorizer::Category;
use crate::expand::{expand_all, split_multi_value, EntityKind};
use crate::scoring::{record_category, record_score};
use crate::types::CanonicalCardRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// カテゴリ別件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub top_tier: usize,
    pub case_hit: usize,
    pub auto_mem: usize,
    pub base_other: usize,
}

impl CategoryCounts {
    pub fn add(&mut self, category: Category) {
        *self.slot(category) += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::TopTier => self.top_tier,
            Category::CaseHit => self.case_hit,
            Category::AutoMem => self.auto_mem,
            Category::BaseOther => self.base_other,
        }
    }

    pub fn total(&self) -> usize {
        self.top_tier + self.case_hit + self.auto_mem + self.base_other
    }

    fn slot(&mut self, category: Category) -> &mut usize {
        match category {
            Category::TopTier => &mut self.top_tier,
            Category::CaseHit => &mut self.case_hit,
            Category::AutoMem => &mut self.auto_mem,
            Category::BaseOther => &mut self.base_other,
        }
    }
}

/// エンティティ（選手・チーム）ごとの集計
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTally {
    pub entity: String,
    pub cards: usize,
    pub score: f64,
    pub by_category: CategoryCounts,
    /// Source files the entity appears in, sorted
    pub files: Vec<String>,
}

/// 全体集計（物理カード単位）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub physical_cards: usize,
    pub total_score: f64,
    pub by_category: CategoryCounts,
    pub files: usize,
    /// Cards naming several players
    pub multi_player_cards: usize,
    /// Cards naming several teams
    pub multi_team_cards: usize,
}

/// エンティティ別に集計する
///
/// # Arguments
/// * `records` - 正規化済みレコード
/// * `kind` - 選手 or チーム
/// * `category` - 指定時はそのカテゴリのみ
///
/// Sorted by card count, then score (both descending), then name.
pub fn tally_by(
    records: &[CanonicalCardRecord],
    kind: EntityKind,
    category: Option<Category>,
) -> Vec<EntityTally> {
    let mut tallies: HashMap<&str, EntityTally> = HashMap::new();

    for view in expand_all(records, kind) {
        let card_category = view.category();
        if category.is_some_and(|c| c != card_category) {
            continue;
        }

        let tally = tallies.entry(view.entity()).or_insert_with(|| EntityTally {
            entity: view.entity().to_string(),
            cards: 0,
            score: 0.0,
            by_category: CategoryCounts::default(),
            files: Vec::new(),
        });
        tally.cards += 1;
        tally.score += view.score();
        tally.by_category.add(card_category);

        let file = view.provenance().source_file.as_str();
        if !tally.files.iter().any(|f| f == file) {
            tally.files.push(file.to_string());
        }
    }

    let mut result: Vec<EntityTally> = tallies
        .into_values()
        .map(|mut t| {
            t.files.sort();
            t
        })
        .collect();

    result.sort_by(|a, b| {
        b.cards
            .cmp(&a.cards)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.entity.cmp(&b.entity))
    });
    result
}

/// 全体集計（展開しない）
pub fn summarize(records: &[CanonicalCardRecord]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let mut files: Vec<&str> = Vec::new();

    for record in records {
        summary.physical_cards += 1;
        summary.total_score += record_score(record);
        summary.by_category.add(record_category(record));
        summary.multi_player_cards += usize::from(record.is_multi_player());
        summary.multi_team_cards += usize::from(record.is_multi_team());
        if !files.contains(&record.source_file()) {
            files.push(record.source_file());
        }
    }

    summary.files = files.len();
    summary
}

/// ファイル別カード数（ファイル名順）
pub fn cards_per_file(records: &[CanonicalCardRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.source_file().to_string()).or_insert(0) += 1;
    }
    counts
}

/// 複数選手カードの組み合わせ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    pub players: String,
    pub cards: usize,
}

/// 複数選手カードを組み合わせ別に数える
///
/// `including` を指定すると、その選手を含む組み合わせのみ。
pub fn multi_player_combinations(
    records: &[CanonicalCardRecord],
    including: Option<&str>,
) -> Vec<Combination> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.is_multi_player()) {
        if let Some(name) = including {
            if !split_multi_value(record.player()).any(|p| p == name) {
                continue;
            }
        }
        *counts.entry(record.player()).or_insert(0) += 1;
    }

    let mut result: Vec<Combination> = counts
        .into_iter()
        .map(|(players, cards)| Combination { players: players.to_string(), cards })
        .collect();
    result.sort_by(|a, b| b.cards.cmp(&a.cards).then_with(|| a.players.cmp(&b.players)));
    result
}
