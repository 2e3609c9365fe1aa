//! Nine Match - A timed picture matching quiz
//!
//! Core modules:
//! - `sim`: Round engine (option pool, sampling, countdown, game state machine)
//! - `highscores`: Best score record with load/save contract
//! - `persistence`: Key-value score stores (memory, JSON file, LocalStorage)
//! - `settings`: Game rules and preferences
//! - `error`: Configuration and storage errors

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StoreError};
pub use highscores::{BestScoreOutcome, ScoreRecord};
pub use persistence::{MemoryStore, ScoreStore};
pub use settings::{BestScoreScope, GameRules, Settings};
pub use sim::{GameEvent, RoundEngine};

/// Game configuration constants
pub mod consts {
    /// Number of option slots shown each round
    pub const SLOT_COUNT: usize = 9;

    /// Default seconds per round
    pub const DEFAULT_TIME_PER_ROUND: f32 = 30.0;
    /// Default seconds before the result banner auto-clears
    pub const DEFAULT_RESULT_HIDE_SECONDS: f32 = 1.2;
    /// Default rounds per game
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 12;
    /// Default correct picks needed to win
    pub const DEFAULT_WIN_AT_LEAST: u32 = 8;
    /// Default sound effect volume (0.0 - 1.0)
    pub const DEFAULT_SFX_VOLUME: f32 = 0.8;

    /// Frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Whole seconds shown on the timer label (rounded up)
#[inline]
pub fn seconds_rounded_up(seconds: f32) -> u32 {
    if seconds <= 0.0 || !seconds.is_finite() {
        0
    } else {
        seconds.ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_rounded_up() {
        assert_eq!(seconds_rounded_up(30.0), 30);
        assert_eq!(seconds_rounded_up(29.01), 30);
        assert_eq!(seconds_rounded_up(0.001), 1);
        assert_eq!(seconds_rounded_up(0.0), 0);
        assert_eq!(seconds_rounded_up(-1.0), 0);
        assert_eq!(seconds_rounded_up(f32::NAN), 0);
    }
}
