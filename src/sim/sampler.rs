//! Per-round option sampling
//!
//! Seeded PCG so a session can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetId};
use super::pool::OptionPool;
use crate::consts::SLOT_COUNT;

/// The nine options of one round, in slot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOptions {
    slots: [Asset; SLOT_COUNT],
}

impl RoundOptions {
    pub fn slots(&self) -> &[Asset; SLOT_COUNT] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Asset> {
        self.slots.get(slot)
    }

    /// Slot holding the given asset id, if any
    pub fn slot_of(&self, id: &AssetId) -> Option<usize> {
        self.slots.iter().position(|a| a.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.slots.iter().map(Asset::id)
    }
}

/// A sampled round: options plus the slot chosen as target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDraw {
    pub options: RoundOptions,
    pub target_slot: usize,
}

impl RoundDraw {
    pub fn target(&self) -> &Asset {
        &self.options.slots[self.target_slot]
    }
}

/// Draws round options without replacement from a pool
#[derive(Debug, Clone)]
pub struct RoundSampler {
    seed: u64,
    rng: Pcg32,
}

impl RoundSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle the pool indices (Fisher-Yates), take the first nine as slots
    /// 0..8, then pick the target slot uniformly.
    pub fn sample(&mut self, pool: &OptionPool) -> RoundDraw {
        let mut indices: Vec<usize> = (0..pool.len()).collect();
        for i in (1..indices.len()).rev() {
            let j = self.rng.random_range(0..=i);
            indices.swap(i, j);
        }

        let assets = pool.assets();
        let slots = std::array::from_fn(|slot| assets[indices[slot]].clone());
        let target_slot = self.rng.random_range(0..SLOT_COUNT);

        RoundDraw {
            options: RoundOptions { slots },
            target_slot,
        }
    }
}
