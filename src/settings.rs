//! Game rules and preferences
//!
//! Rules are fixed for a session once the engine is built. Settings are
//! persisted as JSON (file on native, LocalStorage on web).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How long a best score survives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BestScoreScope {
    /// Stored record is wiped when the game process starts
    #[default]
    Session,
    /// Stored record carries over between runs
    Persistent,
}

impl BestScoreScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            BestScoreScope::Session => "Session",
            BestScoreScope::Persistent => "Persistent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "session" => Some(BestScoreScope::Session),
            "persistent" | "persist" => Some(BestScoreScope::Persistent),
            _ => None,
        }
    }
}

/// Round timing and win rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Seconds on the clock at the start of each round
    pub time_per_round: f32,
    /// Seconds the result banner stays up
    pub result_hide_seconds: f32,
    /// Rounds per game
    pub total_rounds: u32,
    /// Correct picks needed to win
    pub win_at_least: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            time_per_round: DEFAULT_TIME_PER_ROUND,
            result_hide_seconds: DEFAULT_RESULT_HIDE_SECONDS,
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            win_at_least: DEFAULT_WIN_AT_LEAST,
        }
    }
}

impl GameRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_per_round.is_finite() && self.time_per_round > 0.0) {
            return Err(ConfigError::InvalidTimePerRound(self.time_per_round));
        }
        if !(self.result_hide_seconds.is_finite() && self.result_hide_seconds >= 0.0) {
            return Err(ConfigError::InvalidResultHide(self.result_hide_seconds));
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::InvalidTotalRounds);
        }
        if self.win_at_least > self.total_rounds {
            return Err(ConfigError::InvalidWinThreshold {
                win_at_least: self.win_at_least,
                total_rounds: self.total_rounds,
            });
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: GameRules,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub best_score_scope: BestScoreScope,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            sfx_volume: DEFAULT_SFX_VOLUME,
            best_score_scope: BestScoreScope::default(),
        }
    }
}

impl Settings {
    /// Volume clamped to the playable range
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sfx_volume.is_finite() {
            self.sfx_volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_SFX_VOLUME
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "nine_match_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults when missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), crate::StoreError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = GameRules::default();
        assert_eq!(rules.total_rounds, 12);
        assert_eq!(rules.win_at_least, 8);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_rules_validation() {
        let bad_time = GameRules {
            time_per_round: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_time.validate(), Err(ConfigError::InvalidTimePerRound(0.0)));

        let bad_hide = GameRules {
            result_hide_seconds: -0.5,
            ..Default::default()
        };
        assert_eq!(bad_hide.validate(), Err(ConfigError::InvalidResultHide(-0.5)));

        let no_rounds = GameRules {
            total_rounds: 0,
            win_at_least: 0,
            ..Default::default()
        };
        assert_eq!(no_rounds.validate(), Err(ConfigError::InvalidTotalRounds));

        let unwinnable = GameRules {
            total_rounds: 3,
            win_at_least: 4,
            ..Default::default()
        };
        assert!(matches!(
            unwinnable.validate(),
            Err(ConfigError::InvalidWinThreshold { .. })
        ));

        let zero_hide = GameRules {
            result_hide_seconds: 0.0,
            win_at_least: 0,
            ..Default::default()
        };
        assert!(zero_hide.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"rules":{"total_rounds":5,"win_at_least":3}}"#)
            .expect("parse");
        assert_eq!(settings.rules.total_rounds, 5);
        assert_eq!(settings.rules.win_at_least, 3);
        assert_eq!(settings.rules.time_per_round, DEFAULT_TIME_PER_ROUND);
        assert_eq!(settings.best_score_scope, BestScoreScope::Session);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            sfx_volume: 0.3,
            best_score_scope: BestScoreScope::Persistent,
            ..Default::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_effective_volume_clamps() {
        let loud = Settings {
            sfx_volume: 3.0,
            ..Default::default()
        };
        assert_eq!(loud.effective_sfx_volume(), 1.0);
        let nan = Settings {
            sfx_volume: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan.effective_sfx_volume(), DEFAULT_SFX_VOLUME);
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!(BestScoreScope::from_str("Session"), Some(BestScoreScope::Session));
        assert_eq!(BestScoreScope::from_str("persist"), Some(BestScoreScope::Persistent));
        assert_eq!(BestScoreScope::from_str("forever"), None);
    }
}
