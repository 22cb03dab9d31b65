//! エラー型定義
//!
//! Record-level invariant violations of the core.

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("player is empty")]
    MissingPlayer,

    #[error("team is empty")]
    MissingTeam,

    #[error("numbering must be a positive integer, got {0}")]
    InvalidNumbering(u32),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
