//! Session state and outbound events
//!
//! Everything the round engine mutates lives in `GameSession`; everything the
//! UI layer needs to hear about is a `GameEvent`.

use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::banner::ResultBanner;
use super::sampler::RoundOptions;
use super::timer::CountdownTimer;

/// Lifecycle of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundState {
    /// Options not drawn yet
    #[default]
    Setup,
    /// Accepting a pick, clock running
    Active,
    /// Pick or timeout received, no further input accepted
    Locked,
    /// Scored
    Resolved,
}

/// Banner/verdict colours understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerColor {
    White,
    Green,
    Red,
    Yellow,
}

/// Sound cues (playback is up to the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Correct pick
    Correct,
    /// Wrong pick
    Wrong,
    /// Game won
    Win,
    /// Game lost
    Lose,
}

/// How a round was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Correct,
    Wrong,
    TimeUp,
}

impl RoundResult {
    pub fn is_correct(&self) -> bool {
        matches!(self, RoundResult::Correct)
    }

    pub fn message(&self) -> &'static str {
        match self {
            RoundResult::Correct => "CORRECT!",
            RoundResult::Wrong => "WRONG!",
            RoundResult::TimeUp => "TIME UP!",
        }
    }

    pub fn color(&self) -> BannerColor {
        match self {
            RoundResult::Correct => BannerColor::Green,
            RoundResult::Wrong => BannerColor::Red,
            RoundResult::TimeUp => BannerColor::Yellow,
        }
    }

    /// No cue on timeout
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            RoundResult::Correct => Some(SoundEffect::Correct),
            RoundResult::Wrong => Some(SoundEffect::Wrong),
            RoundResult::TimeUp => None,
        }
    }
}

/// Final verdict of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub score: u32,
    pub total_rounds: u32,
}

impl GameOutcome {
    pub fn headline(&self) -> &'static str {
        if self.won { "GAME WON" } else { "GAME OVER" }
    }

    pub fn color(&self) -> BannerColor {
        if self.won {
            BannerColor::Green
        } else {
            BannerColor::Yellow
        }
    }

    pub fn sound(&self) -> SoundEffect {
        if self.won { SoundEffect::Win } else { SoundEffect::Lose }
    }

    /// Text for the final banner
    pub fn summary(&self) -> String {
        format!("{}\nScore: {}/{}", self.headline(), self.score, self.total_rounds)
    }
}

/// Events for the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        target: AssetId,
        options: RoundOptions,
    },
    /// Remaining seconds, rounded up
    TimeUpdated { seconds: u32 },
    RoundResolved {
        result: RoundResult,
        /// Slot the player picked; `None` on timeout
        picked: Option<usize>,
        message: String,
        color: BannerColor,
    },
    /// Result banner auto-cleared
    ResultCleared,
    ScoreUpdated {
        score: u32,
        rounds_played: u32,
        total_rounds: u32,
    },
    GameEnded(GameOutcome),
    BestScoreUpdated { best: u32, had_prior_record: bool },
    /// Best score readout should be hidden (new game started)
    BestScoreHidden,
    Sound { effect: SoundEffect, volume: f32 },
    Paused,
    Resumed,
}

/// Outbound event queue, drained by the host after each call
#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Mutable state of one game, owned by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u32,
    /// Rounds set up so far (counted at setup, not at resolution)
    pub rounds_played: u32,
    pub ended: bool,
    pub paused: bool,
    pub round_state: RoundState,
    pub timer: CountdownTimer,
    pub options: Option<RoundOptions>,
    pub target: Option<AssetId>,
    pub banner: ResultBanner,
    /// Set once the game ends
    pub outcome: Option<GameOutcome>,
}

impl GameSession {
    pub fn new(time_per_round: f32) -> Self {
        Self {
            score: 0,
            rounds_played: 0,
            ended: false,
            paused: false,
            round_state: RoundState::Setup,
            timer: CountdownTimer::new(time_per_round),
            options: None,
            target: None,
            banner: ResultBanner::default(),
            outcome: None,
        }
    }

    pub fn time_left(&self) -> f32 {
        self.timer.time_left()
    }

    /// Input is only taken while a round is live and the game is running
    pub fn accepts_input(&self) -> bool {
        !self.ended && !self.paused && self.round_state == RoundState::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_result_presentation() {
        assert_eq!(RoundResult::Correct.message(), "CORRECT!");
        assert_eq!(RoundResult::Wrong.color(), BannerColor::Red);
        assert_eq!(RoundResult::TimeUp.color(), BannerColor::Yellow);
        assert_eq!(RoundResult::TimeUp.sound(), None);
        assert!(RoundResult::Correct.is_correct());
        assert!(!RoundResult::TimeUp.is_correct());
    }

    #[test]
    fn test_outcome_summary() {
        let won = GameOutcome {
            won: true,
            score: 9,
            total_rounds: 12,
        };
        assert_eq!(won.summary(), "GAME WON\nScore: 9/12");
        assert_eq!(won.color(), BannerColor::Green);
        assert_eq!(won.sound(), SoundEffect::Win);

        let lost = GameOutcome { won: false, ..won };
        assert_eq!(lost.headline(), "GAME OVER");
        assert_eq!(lost.color(), BannerColor::Yellow);
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(30.0);
        assert_eq!(session.round_state, RoundState::Setup);
        assert_eq!(session.time_left(), 30.0);
        assert!(!session.accepts_input());
    }

    #[test]
    fn test_event_bus_drains_in_order() {
        let mut bus = EventBus::default();
        bus.push(GameEvent::Paused);
        bus.push(GameEvent::Resumed);
        assert_eq!(bus.len(), 2);
        let events: Vec<_> = bus.drain().collect();
        assert_eq!(events, vec![GameEvent::Paused, GameEvent::Resumed]);
        assert!(bus.is_empty());
    }
}
