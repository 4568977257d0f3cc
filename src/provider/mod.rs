//! External collaborators of the duel engine
//!
//! Stats, loadouts, and hostage capture are owned by other layers. The
//! engine only reads snapshots from them and never lets their failures
//! stall a duel: every query falls back to documented defaults.

pub mod capture;
pub mod loadout;
pub mod memory;
pub mod stats;

pub use capture::{CaptureSink, NoCapture};
pub use loadout::{
    CombatKit, EmptyLoadout, KitMods, LoadoutProvider, LoadoutRange, WeaponClass, WeaponProfile,
    WeaponSlot,
};
pub use memory::{Capture, Roster};
pub use stats::{BaseAttributes, DefaultStats, StatsProvider};

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::types::CombatantId;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No record for {0}")]
    Unknown(CombatantId),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed data: {0}")]
    Malformed(String),
}

/// The collaborators a duel is constructed with
#[derive(Clone)]
pub struct Collaborators {
    pub stats: Arc<dyn StatsProvider>,
    pub loadout: Arc<dyn LoadoutProvider>,
    pub capture: Arc<dyn CaptureSink>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            stats: Arc::new(DefaultStats),
            loadout: Arc::new(EmptyLoadout),
            capture: Arc::new(NoCapture),
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

impl Collaborators {
    /// One provider serving all three roles
    pub fn from_roster(roster: Arc<Roster>) -> Self {
        Self {
            stats: roster.clone(),
            loadout: roster.clone(),
            capture: roster,
        }
    }

    /// Attribute snapshot, defaults on failure
    pub fn attributes(&self, id: CombatantId) -> BaseAttributes {
        let mut attributes = match self.stats.base_attributes(id) {
            Ok(attributes) => attributes,
            Err(e) => {
                tracing::warn!("Stats provider failed for {}: {}; using defaults", id, e);
                BaseAttributes::default()
            }
        };
        let replaced = attributes.sanitize();
        if !replaced.is_empty() {
            tracing::warn!("Malformed stats for {}: defaulted {:?}", id, replaced);
        }
        attributes
    }

    /// Kit snapshot, empty kit on failure
    pub fn kit(&self, id: CombatantId) -> CombatKit {
        self.loadout.combat_kit(id).unwrap_or_else(|e| {
            tracing::warn!("Loadout provider failed for {}: {}; fighting unarmed", id, e);
            CombatKit::default()
        })
    }
}
