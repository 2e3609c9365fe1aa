//! Deduplicated pool of round options

use std::collections::HashSet;

use super::asset::Asset;
use crate::consts::SLOT_COUNT;
use crate::error::ConfigError;

/// Ordered, duplicate-free assets available to a session
#[derive(Debug, Clone)]
pub struct OptionPool {
    assets: Vec<Asset>,
}

impl OptionPool {
    /// Drop empty entries and repeated identities, keeping first-seen order.
    /// Fails when fewer than [`SLOT_COUNT`] unique assets remain.
    pub fn build<I>(assets: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Option<Asset>>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for asset in assets.into_iter().flatten() {
            if seen.insert(asset.id().clone()) {
                unique.push(asset);
            }
        }

        if unique.len() < SLOT_COUNT {
            log::error!(
                "Need >= {} unique assets, have {}. Remove duplicates from the asset list.",
                SLOT_COUNT,
                unique.len()
            );
            return Err(ConfigError::InsufficientAssets {
                found: unique.len(),
                required: SLOT_COUNT,
            });
        }

        Ok(Self { assets: unique })
    }

    /// Number of unique assets (at least `SLOT_COUNT`)
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false for a built pool
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Asset at a pool position
    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    /// All assets in first-seen order
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }
}
