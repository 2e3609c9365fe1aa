//! Nine Match entry point
//!
//! Native: plays one headless game with a bot and logs every event.
//! Web: exposes the engine to the page through `WebGame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Names of the bundled picture set
const DEFAULT_ASSETS: [&str; 12] = [
    "apple", "banana", "cherry", "grape", "lemon", "lime", "mango", "orange", "peach", "pear",
    "plum", "strawberry",
];

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use nine_match::persistence::LocalStorageStore;
    use nine_match::sim::{Asset, RoundEngine};
    use nine_match::{GameEvent, Settings};

    /// Engine handle for the page script
    #[wasm_bindgen]
    pub struct WebGame {
        engine: RoundEngine<LocalStorageStore>,
        pending: Vec<GameEvent>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(names: Vec<String>) -> Result<WebGame, JsValue> {
            let settings = Settings::load();
            let names = if names.is_empty() {
                super::DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect()
            } else {
                names
            };
            let assets = names.into_iter().map(|name| Some(Asset::load(name)));
            let engine = RoundEngine::with_entropy(&settings, assets, LocalStorageStore)
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            log::info!("Started new game with seed: {}", engine.seed());
            Ok(Self {
                engine,
                pending: Vec::new(),
            })
        }

        pub fn tick(&mut self, dt: f32) {
            self.engine.tick(dt);
            self.collect();
        }

        pub fn pick(&mut self, slot: usize) -> bool {
            let accepted = self.engine.pick(slot);
            self.collect();
            accepted
        }

        pub fn pause(&mut self) -> bool {
            let paused = self.engine.pause();
            self.collect();
            paused
        }

        pub fn resume(&mut self) -> bool {
            let resumed = self.engine.resume();
            self.collect();
            resumed
        }

        pub fn restart(&mut self) {
            self.engine.restart();
            self.collect();
        }

        /// Queued events as a JSON array; clears the queue
        pub fn take_events_json(&mut self) -> String {
            let events = std::mem::take(&mut self.pending);
            serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
        }

        fn collect(&mut self) {
            self.pending.extend(self.engine.drain_events());
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Nine Match (web) ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use nine_match::consts::FRAME_DT;
    use nine_match::persistence::{JsonFileStore, MemoryStore};
    use nine_match::sim::Asset;
    use nine_match::Settings;

    env_logger::init();
    log::info!("Nine Match (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let assets = DEFAULT_ASSETS.iter().map(|name| Some(Asset::load(*name)));

    let result = match JsonFileStore::default_path() {
        Some(path) => {
            log::info!("Best score file: {}", path.display());
            headless::play(&settings, assets, JsonFileStore::new(path), FRAME_DT)
        }
        None => headless::play(&settings, assets, MemoryStore::new(), FRAME_DT),
    };

    if let Err(err) = result {
        log::error!("Cannot start game: {}", err);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use nine_match::consts::SLOT_COUNT;
    use nine_match::sim::{Asset, RoundEngine};
    use nine_match::{ConfigError, GameEvent, ScoreStore, Settings};

    /// Chance the bot recognises the target
    const BOT_ACCURACY: f64 = 0.75;

    /// Play one game to the end with a bot that answers after a random delay
    pub fn play<I, S>(
        settings: &Settings,
        assets: I,
        store: S,
        dt: f32,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Option<Asset>>,
        S: ScoreStore,
    {
        let mut engine = RoundEngine::with_entropy(settings, assets, store)?;
        log::info!("Seed: {}", engine.seed());
        let mut bot = Pcg32::seed_from_u64(engine.seed() ^ 0x9E37_79B9_7F4A_7C15);
        let max_think = (settings.rules.time_per_round * 1.1).max(0.6);
        let mut think = bot.random_range(0.5..max_think);
        let mut round = engine.session().rounds_played;

        loop {
            for event in engine.drain_events() {
                report(&event);
            }
            if engine.is_ended() {
                break;
            }

            if engine.session().rounds_played != round {
                round = engine.session().rounds_played;
                think = bot.random_range(0.5..max_think);
            }

            think -= dt;
            if think <= 0.0 {
                if let Some(target) = engine.target_slot() {
                    let slot = if bot.random_bool(BOT_ACCURACY) {
                        target
                    } else {
                        (target + bot.random_range(1..SLOT_COUNT)) % SLOT_COUNT
                    };
                    engine.pick(slot);
                }
            } else {
                engine.tick(dt);
            }
        }

        log::info!("{}", engine.record().label(settings.rules.total_rounds));
        Ok(())
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::RoundStarted { round, target, .. } => {
                log::info!("Round {} - find {}", round, target);
            }
            GameEvent::TimeUpdated { seconds } => log::debug!("Time: {}", seconds),
            GameEvent::RoundResolved { message, picked, .. } => {
                log::info!("{} (picked {:?})", message, picked);
            }
            GameEvent::ScoreUpdated {
                score,
                rounds_played,
                total_rounds,
            } => log::debug!(
                "Score: {}/{}   Round: {}/{}",
                score,
                total_rounds,
                rounds_played,
                total_rounds
            ),
            GameEvent::GameEnded(outcome) => println!("{}", outcome.summary()),
            GameEvent::BestScoreUpdated {
                best,
                had_prior_record,
            } => {
                if *had_prior_record {
                    log::info!("Highscore: {}", best);
                }
            }
            other => log::trace!("{:?}", other),
        }
    }
}
