//! Weapon loadouts as the engine sees them
//!
//! Weapons carry a class, the loadout ranges they work at, and base numbers.
//! The class table mirrors the inventory layer's defaults.

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;
use crate::provider::ProviderError;

/// Three-valued coarsening of the range gate used for weapon matching.
///
/// `Near` only appears in weapon range lists; `OutOfRange` never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadoutRange {
    Close,
    Near,
    Mid,
    Far,
    OutOfRange,
}

impl LoadoutRange {
    /// Accuracy modifier in percentage points
    pub fn accuracy_modifier(self) -> i32 {
        match self {
            LoadoutRange::Close => 10,
            LoadoutRange::Near => 0,
            LoadoutRange::Mid => -10,
            LoadoutRange::Far => -20,
            LoadoutRange::OutOfRange => -999,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadoutRange::Close => "Close",
            LoadoutRange::Near => "Near",
            LoadoutRange::Mid => "Mid",
            LoadoutRange::Far => "Far",
            LoadoutRange::OutOfRange => "Out-of-Range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Melee,
    Pistol,
    Smg,
    Shotgun,
    Rifle,
}

impl WeaponClass {
    /// Ranges this class is usable at
    pub fn ranges(self) -> &'static [LoadoutRange] {
        use LoadoutRange::*;
        match self {
            WeaponClass::Melee => &[Close],
            WeaponClass::Pistol => &[Close, Near, Mid],
            WeaponClass::Smg => &[Close, Near],
            WeaponClass::Shotgun => &[Close, Near],
            WeaponClass::Rifle => &[Near, Mid, Far],
        }
    }

    pub fn base_damage(self) -> i32 {
        match self {
            WeaponClass::Melee => 6,
            WeaponClass::Pistol => 5,
            WeaponClass::Smg => 6,
            WeaponClass::Shotgun => 9,
            WeaponClass::Rifle => 7,
        }
    }

    pub fn base_accuracy(self) -> i32 {
        match self {
            WeaponClass::Melee => 85,
            WeaponClass::Pistol => 70,
            WeaponClass::Smg => 65,
            WeaponClass::Shotgun => 60,
            WeaponClass::Rifle => 75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponSlot {
    Primary,
    Secondary,
    /// The implicit fists profile
    Unarmed,
}

impl WeaponSlot {
    pub fn other(self) -> Self {
        match self {
            WeaponSlot::Primary => WeaponSlot::Secondary,
            WeaponSlot::Secondary => WeaponSlot::Primary,
            WeaponSlot::Unarmed => WeaponSlot::Unarmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    pub class: WeaponClass,
    pub ranges: Vec<LoadoutRange>,
    pub base_accuracy: i32,
    pub base_damage: i32,
}

impl WeaponProfile {
    /// Weapon with its class defaults
    pub fn from_class(name: impl Into<String>, class: WeaponClass) -> Self {
        Self {
            name: name.into(),
            class,
            ranges: class.ranges().to_vec(),
            base_accuracy: class.base_accuracy(),
            base_damage: class.base_damage(),
        }
    }

    pub fn usable_at(&self, range: LoadoutRange) -> bool {
        self.ranges.contains(&range)
    }
}

/// Flat modifiers from equipped gear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitMods {
    pub accuracy: i32,
    pub damage: i32,
}

/// Everything a fighter brings to the duel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatKit {
    pub primary: Option<WeaponProfile>,
    pub secondary: Option<WeaponProfile>,
    pub preferred_slot: WeaponSlot,
    pub mods: KitMods,
    pub has_grenade: bool,
}

impl Default for CombatKit {
    fn default() -> Self {
        Self {
            primary: None,
            secondary: None,
            preferred_slot: WeaponSlot::Primary,
            mods: KitMods::default(),
            has_grenade: false,
        }
    }
}

impl CombatKit {
    pub fn slot(&self, slot: WeaponSlot) -> Option<&WeaponProfile> {
        match slot {
            WeaponSlot::Primary => self.primary.as_ref(),
            WeaponSlot::Secondary => self.secondary.as_ref(),
            WeaponSlot::Unarmed => None,
        }
    }

    /// Preferred slot first, then the other one; disarmed slots are skipped
    pub fn pick_for_range(
        &self,
        range: LoadoutRange,
        disarmed: &[WeaponSlot],
    ) -> Option<(WeaponSlot, &WeaponProfile)> {
        let preferred = match self.preferred_slot {
            WeaponSlot::Unarmed => WeaponSlot::Primary,
            slot => slot,
        };
        [preferred, preferred.other()]
            .into_iter()
            .filter(|slot| !disarmed.contains(slot))
            .find_map(|slot| {
                self.slot(slot)
                    .filter(|weapon| weapon.usable_at(range))
                    .map(|weapon| (slot, weapon))
            })
    }
}

/// Source of combat kits (equipped weapons and mods)
pub trait LoadoutProvider: Send + Sync {
    fn combat_kit(&self, id: CombatantId) -> Result<CombatKit, ProviderError>;
}

/// Everyone fights bare-handed
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLoadout;

impl LoadoutProvider for EmptyLoadout {
    fn combat_kit(&self, _id: CombatantId) -> Result<CombatKit, ProviderError> {
        Ok(CombatKit::default())
    }
}
