//! Best score record
//!
//! Keeps the best final score seen and mirrors it to a `ScoreStore` under a
//! single key. Storage failures are logged and never interrupt play.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;
use crate::settings::BestScoreScope;

/// Store key for the best score
pub const STORAGE_KEY: &str = "HIGHSCORE";

/// Result of settling a finished game against the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreOutcome {
    pub new_best: u32,
    /// Final score beat the previous best (and was saved)
    pub improved: bool,
    /// A record existed before this game's save
    pub had_prior_record: bool,
}

/// Best score backed by a store
#[derive(Debug)]
pub struct ScoreRecord<S> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> ScoreRecord<S> {
    /// Open the record. `Session` scope wipes whatever a previous run stored.
    pub fn open(mut store: S, scope: BestScoreScope) -> Self {
        if scope == BestScoreScope::Session {
            if let Err(err) = store.remove(STORAGE_KEY) {
                log::warn!("Could not clear stored best score: {}", err);
            }
        }
        let mut record = Self { store, best: 0 };
        record.best = record.load();
        log::info!("Best score loaded: {}", record.best);
        record
    }

    /// Stored best, 0 when absent or unreadable
    pub fn load(&self) -> u32 {
        match self.store.get(STORAGE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                log::warn!("Could not read best score, starting from 0: {}", err);
                0
            }
        }
    }

    /// Write a value through to the store. Returns false if the write failed.
    pub fn save(&mut self, value: u32) -> bool {
        match self.store.set(STORAGE_KEY, value) {
            Ok(()) => {
                log::info!("Best score saved ({})", value);
                true
            }
            Err(err) => {
                log::warn!("Could not save best score {}: {}", value, err);
                false
            }
        }
    }

    /// Best final score this record has seen (stored or played)
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether the store currently holds a record
    pub fn has_record(&self) -> bool {
        match self.store.contains(STORAGE_KEY) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("Could not check for a stored best score: {}", err);
                false
            }
        }
    }

    /// Settle a finished game. Saves only when the score improves on the best.
    pub fn record_game_end(&mut self, final_score: u32) -> BestScoreOutcome {
        let had_prior_record = self.has_record();
        let improved = final_score > self.best;
        if improved {
            self.best = final_score;
            self.save(final_score);
        }
        BestScoreOutcome {
            new_best: self.best,
            improved,
            had_prior_record,
        }
    }

    /// Readout text for the best-score label
    pub fn label(&self, total_rounds: u32) -> String {
        format!("Highscore: {}/{}", self.best, total_rounds)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::persistence::MemoryStore;

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore {
        value: Option<u32>,
    }

    impl ScoreStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<u32>, StoreError> {
            Ok(self.value)
        }
        fn set(&mut self, _key: &str, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    /// Store whose reads always fail
    struct UnreadableStore;

    impl ScoreStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Malformed {
                key: key.to_string(),
                raw: "garbage".to_string(),
            })
        }
        fn set(&mut self, _key: &str, _value: u32) -> Result<(), StoreError> {
            Ok(())
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_unreadable_store_counts_as_no_record() {
        let mut record = ScoreRecord::open(UnreadableStore, BestScoreScope::Persistent);
        assert_eq!(record.best(), 0);
        assert!(!record.has_record());

        let outcome = record.record_game_end(3);
        assert!(outcome.improved);
        assert!(!outcome.had_prior_record);
        assert_eq!(outcome.new_best, 3);
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let record = ScoreRecord::open(MemoryStore::new(), BestScoreScope::Persistent);
        assert_eq!(record.best(), 0);
        assert!(!record.has_record());
    }

    #[test]
    fn test_session_scope_clears_previous_run() {
        let store = MemoryStore::with_value(STORAGE_KEY, 9);
        let record = ScoreRecord::open(store, BestScoreScope::Session);
        assert_eq!(record.best(), 0);
        assert!(!record.has_record());
    }

    #[test]
    fn test_persistent_scope_keeps_previous_run() {
        let store = MemoryStore::with_value(STORAGE_KEY, 9);
        let record = ScoreRecord::open(store, BestScoreScope::Persistent);
        assert_eq!(record.best(), 9);
        assert!(record.has_record());
    }

    #[test]
    fn test_first_game_has_no_prior_record() {
        let mut record = ScoreRecord::open(MemoryStore::new(), BestScoreScope::Session);
        let outcome = record.record_game_end(5);
        assert_eq!(
            outcome,
            BestScoreOutcome {
                new_best: 5,
                improved: true,
                had_prior_record: false,
            }
        );
        assert_eq!(record.store().writes(), 1);

        let second = record.record_game_end(3);
        assert_eq!(second.new_best, 5);
        assert!(!second.improved);
        assert!(second.had_prior_record);
        assert_eq!(record.store().writes(), 1);
    }

    #[test]
    fn test_zero_score_never_saves() {
        let mut record = ScoreRecord::open(MemoryStore::new(), BestScoreScope::Session);
        let outcome = record.record_game_end(0);
        assert!(!outcome.improved);
        assert!(!outcome.had_prior_record);
        assert_eq!(record.store().writes(), 0);
    }

    #[test]
    fn test_equal_score_is_not_improvement() {
        let store = MemoryStore::with_value(STORAGE_KEY, 6);
        let mut record = ScoreRecord::open(store, BestScoreScope::Persistent);
        let outcome = record.record_game_end(6);
        assert!(!outcome.improved);
        assert_eq!(outcome.new_best, 6);
        assert_eq!(record.store().writes(), 0);
    }

    #[test]
    fn test_failed_save_keeps_in_memory_best() {
        let mut record = ScoreRecord::open(
            ReadOnlyStore { value: Some(2) },
            BestScoreScope::Session,
        );
        assert_eq!(record.best(), 2);
        let outcome = record.record_game_end(4);
        assert!(outcome.improved);
        assert_eq!(record.best(), 4);
        assert_eq!(record.load(), 2);
    }

    #[test]
    fn test_label() {
        let store = MemoryStore::with_value(STORAGE_KEY, 7);
        let record = ScoreRecord::open(store, BestScoreScope::Persistent);
        assert_eq!(record.label(12), "Highscore: 7/12");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn record_game_end_tracks_max(prior in 0u32..50, score in 0u32..50) {
                let store = MemoryStore::with_value(STORAGE_KEY, prior);
                let mut record = ScoreRecord::open(store, BestScoreScope::Persistent);
                let outcome = record.record_game_end(score);
                prop_assert_eq!(outcome.improved, score > prior);
                prop_assert_eq!(outcome.new_best, prior.max(score));
                prop_assert!(outcome.had_prior_record);
                prop_assert_eq!(record.store().writes(), usize::from(score > prior));
            }
        }
    }
}
