//! チーム名の正規化
//!
//! Free-text team references (full name, city only, nickname) collapse onto
//! one of the 30 franchise names. Unknown text passes through trimmed.

use crate::types::MULTI_VALUE_DELIMITER;
use std::collections::HashMap;

/// Canonical franchise names
pub const FRANCHISES: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Aliases besides the lower-cased canonical names themselves
const ALIASES: &[(&str, &str)] = &[
    ("atlanta", "Atlanta Hawks"),
    ("hawks", "Atlanta Hawks"),
    ("boston", "Boston Celtics"),
    ("celtics", "Boston Celtics"),
    ("brooklyn", "Brooklyn Nets"),
    ("nets", "Brooklyn Nets"),
    ("charlotte", "Charlotte Hornets"),
    ("hornets", "Charlotte Hornets"),
    ("chicago", "Chicago Bulls"),
    ("bulls", "Chicago Bulls"),
    ("cleveland", "Cleveland Cavaliers"),
    ("cavaliers", "Cleveland Cavaliers"),
    ("cavs", "Cleveland Cavaliers"),
    ("dallas", "Dallas Mavericks"),
    ("mavericks", "Dallas Mavericks"),
    ("mavs", "Dallas Mavericks"),
    ("denver", "Denver Nuggets"),
    ("nuggets", "Denver Nuggets"),
    ("detroit", "Detroit Pistons"),
    ("pistons", "Detroit Pistons"),
    ("golden state", "Golden State Warriors"),
    ("warriors", "Golden State Warriors"),
    ("houston", "Houston Rockets"),
    ("rockets", "Houston Rockets"),
    ("indiana", "Indiana Pacers"),
    ("pacers", "Indiana Pacers"),
    ("la clippers", "Los Angeles Clippers"),
    ("clippers", "Los Angeles Clippers"),
    ("la lakers", "Los Angeles Lakers"),
    ("lakers", "Los Angeles Lakers"),
    ("memphis", "Memphis Grizzlies"),
    ("grizzlies", "Memphis Grizzlies"),
    ("miami", "Miami Heat"),
    ("heat", "Miami Heat"),
    ("milwaukee", "Milwaukee Bucks"),
    ("bucks", "Milwaukee Bucks"),
    ("minnesota", "Minnesota Timberwolves"),
    ("timberwolves", "Minnesota Timberwolves"),
    ("wolves", "Minnesota Timberwolves"),
    ("new orleans", "New Orleans Pelicans"),
    ("pelicans", "New Orleans Pelicans"),
    ("new york", "New York Knicks"),
    ("knicks", "New York Knicks"),
    ("oklahoma city", "Oklahoma City Thunder"),
    ("okc", "Oklahoma City Thunder"),
    ("thunder", "Oklahoma City Thunder"),
    ("orlando", "Orlando Magic"),
    ("magic", "Orlando Magic"),
    ("philadelphia", "Philadelphia 76ers"),
    ("76ers", "Philadelphia 76ers"),
    ("sixers", "Philadelphia 76ers"),
    ("phoenix", "Phoenix Suns"),
    ("suns", "Phoenix Suns"),
    ("portland", "Portland Trail Blazers"),
    ("trail blazers", "Portland Trail Blazers"),
    ("blazers", "Portland Trail Blazers"),
    ("sacramento", "Sacramento Kings"),
    ("kings", "Sacramento Kings"),
    ("san antonio", "San Antonio Spurs"),
    ("spurs", "San Antonio Spurs"),
    ("toronto", "Toronto Raptors"),
    ("raptors", "Toronto Raptors"),
    ("utah", "Utah Jazz"),
    ("jazz", "Utah Jazz"),
    ("washington", "Washington Wizards"),
    ("wizards", "Washington Wizards"),
];

lazy_static::lazy_static! {
    static ref TEAM_MAP: HashMap<String, &'static str> = FRANCHISES
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .chain(ALIASES.iter().map(|(alias, name)| (alias.to_string(), *name)))
        .collect();
}

fn lookup_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Franchise for a team reference, if it is one we know.
pub fn canonical_team(value: &str) -> Option<&'static str> {
    TEAM_MAP.get(lookup_key(value).as_str()).copied()
}

pub fn is_known_team(value: &str) -> bool {
    canonical_team(value).is_some()
}

/// チーム名を正規化（不明な値はトリムのみ）
pub fn normalize_team(value: &str) -> String {
    canonical_team(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.trim().to_string())
}

/// `/` 区切りのチーム欄を区間ごとに正規化（空区間は除去）
pub fn normalize_team_field(value: &str) -> String {
    if !value.contains(MULTI_VALUE_DELIMITER) {
        return normalize_team(value);
    }

    value
        .split(MULTI_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(normalize_team)
        .collect::<Vec<_>>()
        .join(&MULTI_VALUE_DELIMITER.to_string())
}
