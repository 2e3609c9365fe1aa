//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod asset;
pub mod banner;
pub mod engine;
pub mod pool;
pub mod sampler;
pub mod state;
pub mod timer;

pub use asset::{Asset, AssetId};
pub use banner::ResultBanner;
pub use engine::RoundEngine;
pub use pool::OptionPool;
pub use sampler::{RoundDraw, RoundOptions, RoundSampler};
pub use state::{
    BannerColor, EventBus, GameEvent, GameOutcome, GameSession, RoundResult, RoundState,
    SoundEffect,
};
pub use timer::{CountdownTimer, TimerStatus};
