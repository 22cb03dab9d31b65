//! Checklist Common Library
//!
//! I/O-free core of the checklist scorer: cell grids in, scored canonical
//! card records out. Every function here is a pure transformation over
//! immutable input, so files can be processed independently.

pub mod aggregate;
pub mod builder;
pub mod categorizer;
pub mod error;
pub mod expand;
pub mod grid;
pub mod normalizer;
pub mod schema;
pub mod scoring;
pub mod types;

pub use aggregate::{cards_per_file, multi_player_combinations, summarize, tally_by, BatchSummary, EntityTally};
pub use builder::{build_precleaned_records, build_records, BuildOutcome, CLEAN_HEADER};
pub use categorizer::{categorize, Category};
pub use error::{Error, Result};
pub use expand::{expand, expand_all, EntityKind, ExpandedEntityRecord};
pub use grid::{Cell, RawCellGrid};
pub use normalizer::{extract_numbering, normalize_team};
pub use schema::{infer_columns, is_header_row, ColumnInference};
pub use scoring::{rarity_multiplier, score_records, weight, ScoredRecord};
pub use types::{CanonicalCardRecord, Provenance};
