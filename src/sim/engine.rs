//! Round engine
//!
//! Drives a game from round setup through scoring to the final verdict.
//! All entry points run to completion and queue their events on the bus;
//! the host drains them after each call.
//!
//! Round lifecycle: `Setup -> Active -> Locked -> Resolved`, then either the
//! next `Setup` or game end once `rounds_played == total_rounds`.

use super::asset::{Asset, AssetId};
use super::pool::OptionPool;
use super::sampler::{RoundOptions, RoundSampler};
use super::state::{EventBus, GameEvent, GameOutcome, GameSession, RoundResult, RoundState};
use super::timer::TimerStatus;
use crate::consts::SLOT_COUNT;
use crate::error::ConfigError;
use crate::highscores::ScoreRecord;
use crate::persistence::{MemoryStore, ScoreStore};
use crate::seconds_rounded_up;
use crate::settings::{GameRules, Settings};

pub struct RoundEngine<S: ScoreStore = MemoryStore> {
    rules: GameRules,
    sfx_volume: f32,
    pool: OptionPool,
    sampler: RoundSampler,
    session: GameSession,
    record: ScoreRecord<S>,
    events: EventBus,
    /// Last value sent in `TimeUpdated`
    shown_seconds: Option<u32>,
}

impl<S: ScoreStore> RoundEngine<S> {
    /// Validate the configuration, build the pool, open the best-score record
    /// and start round 1.
    pub fn new<I>(settings: &Settings, assets: I, store: S, seed: u64) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Option<Asset>>,
    {
        settings.rules.validate()?;
        let pool = OptionPool::build(assets)?;
        let record = ScoreRecord::open(store, settings.best_score_scope);

        log::info!(
            "Starting game: {} unique assets, {} rounds, win at {}, seed {}",
            pool.len(),
            settings.rules.total_rounds,
            settings.rules.win_at_least,
            seed
        );

        let mut engine = Self {
            rules: settings.rules,
            sfx_volume: settings.effective_sfx_volume(),
            pool,
            sampler: RoundSampler::new(seed),
            session: GameSession::new(settings.rules.time_per_round),
            record,
            events: EventBus::default(),
            shown_seconds: None,
        };
        engine.restart();
        Ok(engine)
    }

    /// Same as [`RoundEngine::new`] with a seed from the thread RNG
    pub fn with_entropy<I>(settings: &Settings, assets: I, store: S) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Option<Asset>>,
    {
        use rand::Rng;
        let seed: u64 = rand::rng().random();
        Self::new(settings, assets, store, seed)
    }

    /// Throw away the current session and start a fresh game.
    /// The best score survives.
    pub fn restart(&mut self) {
        if self.session.banner.is_visible() {
            self.events.push(GameEvent::ResultCleared);
        }
        if self.session.paused {
            self.events.push(GameEvent::Resumed);
        }
        self.session = GameSession::new(self.rules.time_per_round);
        self.shown_seconds = None;
        self.events.push(GameEvent::BestScoreHidden);
        self.start_round();
    }

    /// Advance clocks by `dt` seconds. Ignored while paused; the round clock
    /// only runs while a round is active.
    pub fn tick(&mut self, dt: f32) {
        if self.session.paused {
            return;
        }

        if self.session.banner.tick(dt) {
            self.events.push(GameEvent::ResultCleared);
        }

        if !self.session.accepts_input() {
            return;
        }

        match self.session.timer.tick(dt) {
            TimerStatus::Running => self.publish_time(),
            TimerStatus::Expired => {
                self.publish_time();
                self.session.round_state = RoundState::Locked;
                self.resolve(RoundResult::TimeUp, None);
            }
            TimerStatus::Stopped => {}
        }
    }

    /// Pick the option in `slot`. Returns false (and changes nothing) when
    /// the pick is out of range or no round is accepting input.
    pub fn pick(&mut self, slot: usize) -> bool {
        if !self.session.accepts_input() || slot >= SLOT_COUNT {
            return false;
        }
        let Some(options) = self.session.options.as_ref() else {
            return false;
        };

        let correct = match (options.get(slot), self.session.target.as_ref()) {
            (Some(asset), Some(target)) => asset.id() == target,
            _ => false,
        };

        self.session.round_state = RoundState::Locked;
        let result = if correct {
            RoundResult::Correct
        } else {
            RoundResult::Wrong
        };
        self.resolve(result, Some(slot));
        true
    }

    /// Freeze the round clock and banner and refuse picks
    pub fn pause(&mut self) -> bool {
        if self.session.ended || self.session.paused {
            return false;
        }
        self.session.paused = true;
        self.session.timer.pause();
        self.events.push(GameEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.session.paused {
            return false;
        }
        self.session.paused = false;
        self.session.timer.resume();
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Take all queued events in emission order
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Live state of the current game
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Rules fixed when the engine was built
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn pool(&self) -> &OptionPool {
        &self.pool
    }

    /// Best-score record, kept across restarts
    pub fn record(&self) -> &ScoreRecord<S> {
        &self.record
    }

    /// Best final score seen by this engine's record
    pub fn best_score(&self) -> u32 {
        self.record.best()
    }

    /// Seed the round sampler started from; replays the same rounds
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Asset the player must find this round
    pub fn target(&self) -> Option<&AssetId> {
        self.session.target.as_ref()
    }

    /// The nine options on the board this round
    pub fn options(&self) -> Option<&RoundOptions> {
        self.session.options.as_ref()
    }

    /// Slot holding the target in the current round
    pub fn target_slot(&self) -> Option<usize> {
        let options = self.session.options.as_ref()?;
        options.slot_of(self.session.target.as_ref()?)
    }

    pub fn is_ended(&self) -> bool {
        self.session.ended
    }

    /// Final verdict, `None` until the game ends
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.session.outcome
    }

    fn start_round(&mut self) {
        if self.session.ended {
            return;
        }
        if self.session.rounds_played >= self.rules.total_rounds {
            self.end_game();
            return;
        }

        self.session.round_state = RoundState::Setup;
        self.session.rounds_played += 1;
        self.session.timer.reset(self.rules.time_per_round);
        self.publish_score();

        let draw = self.sampler.sample(&self.pool);
        let target = draw.target().id().clone();
        if draw.options.slot_of(&target) != Some(draw.target_slot) {
            log::error!(
                "Internal error: target {} not found among round {} options",
                target,
                self.session.rounds_played
            );
            debug_assert!(false, "sampled target missing from its own round");
        }

        log::debug!(
            "Round {}/{}: target {} in slot {}",
            self.session.rounds_played,
            self.rules.total_rounds,
            target,
            draw.target_slot
        );

        self.session.options = Some(draw.options.clone());
        self.session.target = Some(target.clone());
        self.session.round_state = RoundState::Active;

        self.events.push(GameEvent::RoundStarted {
            round: self.session.rounds_played,
            target,
            options: draw.options,
        });
        self.shown_seconds = None;
        self.publish_time();
    }

    /// Score a locked round exactly once, then move on
    fn resolve(&mut self, result: RoundResult, picked: Option<usize>) {
        if self.session.round_state != RoundState::Locked {
            return;
        }
        if result.is_correct() {
            self.session.score += 1;
        }
        self.session.round_state = RoundState::Resolved;

        self.session
            .banner
            .show(result.message(), result.color(), self.rules.result_hide_seconds);
        self.events.push(GameEvent::RoundResolved {
            result,
            picked,
            message: result.message().to_string(),
            color: result.color(),
        });
        if let Some(effect) = result.sound() {
            self.events.push(GameEvent::Sound {
                effect,
                volume: self.sfx_volume,
            });
        }

        self.publish_score();
        if self.session.rounds_played >= self.rules.total_rounds {
            self.end_game();
        } else {
            self.start_round();
        }
    }

    fn end_game(&mut self) {
        if self.session.ended {
            return;
        }
        self.session.ended = true;

        let outcome = GameOutcome {
            won: self.session.score >= self.rules.win_at_least,
            score: self.session.score,
            total_rounds: self.rules.total_rounds,
        };
        self.session.outcome = Some(outcome);
        log::info!(
            "{}: {}/{}",
            outcome.headline(),
            outcome.score,
            outcome.total_rounds
        );

        self.events.push(GameEvent::GameEnded(outcome));
        self.events.push(GameEvent::Sound {
            effect: outcome.sound(),
            volume: self.sfx_volume,
        });

        let best = self.record.record_game_end(outcome.score);
        if best.improved {
            log::info!("New best score: {}", best.new_best);
        }
        self.events.push(GameEvent::BestScoreUpdated {
            best: best.new_best,
            had_prior_record: best.had_prior_record,
        });
    }

    fn publish_score(&mut self) {
        self.events.push(GameEvent::ScoreUpdated {
            score: self.session.score,
            rounds_played: self.session.rounds_played,
            total_rounds: self.rules.total_rounds,
        });
    }

    /// Emit the timer label only when the rounded-up value changes
    fn publish_time(&mut self) {
        let seconds = seconds_rounded_up(self.session.time_left());
        if self.shown_seconds != Some(seconds) {
            self.shown_seconds = Some(seconds);
            self.events.push(GameEvent::TimeUpdated { seconds });
        }
    }
}
