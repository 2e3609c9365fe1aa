//! Error types
//!
//! Configuration errors are fatal and stop the game from starting.
//! Storage errors never reach the player; the score record logs and absorbs them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("need at least {required} unique assets, found {found}")]
    InsufficientAssets { found: usize, required: usize },
    #[error("time per round must be a positive number of seconds, got {0}")]
    InvalidTimePerRound(f32),
    #[error("result hide delay must be zero or more seconds, got {0}")]
    InvalidResultHide(f32),
    #[error("total rounds must be at least 1")]
    InvalidTotalRounds,
    #[error("win threshold {win_at_least} exceeds total rounds {total_rounds}")]
    InvalidWinThreshold { win_at_least: u32, total_rounds: u32 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value for {key} is not a score: {raw:?}")]
    Malformed { key: String, raw: String },
    #[error("storage unavailable")]
    Unavailable,
}
