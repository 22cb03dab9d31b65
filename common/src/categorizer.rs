//! カード種別の分類
//!
//! Card-type free text maps onto a rarity category by ordered,
//! case-insensitive substring rules. The first matching rule wins, so
//! `"Logoman Auto Patch"` is `TopTier`, not `AutoMem`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords of the marquee insert
pub const TOP_TIER_KEYWORDS: &[&str] = &["logoman"];

/// Product-specific short-print inserts (vendor misspellings included)
pub const CASE_HIT_KEYWORDS: &[&str] = &[
    "downtown",
    "micro",
    "stained glass",
    "strined glass",
    "manga",
    "sublime",
    "kaboom",
    "color blast",
];

/// Autograph and memorabilia markers
pub const AUTO_MEM_KEYWORDS: &[&str] = &["auto", "signature", "patch", "relic", "mem", "jersey"];

/// Rarity category, ordered from least to most desirable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    BaseOther,
    AutoMem,
    CaseHit,
    TopTier,
}

impl Category {
    /// All categories, most desirable first
    pub const ALL: [Category; 4] = [
        Category::TopTier,
        Category::CaseHit,
        Category::AutoMem,
        Category::BaseOther,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::TopTier => "Logoman",
            Category::CaseHit => "Case Hit",
            Category::AutoMem => "Auto/Mem",
            Category::BaseOther => "Base/Other",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::TopTier => TOP_TIER_KEYWORDS,
            Category::CaseHit => CASE_HIT_KEYWORDS,
            Category::AutoMem => AUTO_MEM_KEYWORDS,
            Category::BaseOther => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' ', '/'], "").as_str() {
            "toptier" | "logoman" => Ok(Category::TopTier),
            "casehit" => Ok(Category::CaseHit),
            "automem" | "auto" => Ok(Category::AutoMem),
            "baseother" | "base" => Ok(Category::BaseOther),
            _ => Err(format!(
                "Unknown category: {}. Use logoman, case-hit, auto-mem, or base",
                s
            )),
        }
    }
}

/// カード種別テキストを分類する
pub fn categorize(card_type: &str) -> Category {
    let text = card_type.to_lowercase();

    Category::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| text.contains(k)))
        .unwrap_or(Category::BaseOther)
}
