//! Visual assets and their identities

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Source of process-unique instance tokens
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a loaded asset: `name#token`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// The `name#token` text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A picture eligible to appear as an option or target.
///
/// Every call to [`Asset::load`] yields a distinct asset, even for repeated
/// names. Clones share the identity of the asset they were cloned from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    id: AssetId,
    name: String,
}

impl Asset {
    /// Register a new asset instance under a display name
    pub fn load(name: impl Into<String>) -> Self {
        let name = name.into();
        let token = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self {
            id: AssetId(format!("{name}#{token}")),
            name,
        }
    }

    /// Identity used for dedup and pick matching
    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// Display name (not unique)
    pub fn name(&self) -> &str {
        &self.name
    }
}
