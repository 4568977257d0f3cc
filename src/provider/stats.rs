//! Base-attribute snapshots for fighters

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;
use crate::provider::ProviderError;

/// Character-sheet numbers the engine reads once per resolution call.
///
/// Any field a provider cannot fill keeps its documented default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseAttributes {
    pub hit_points: f64,
    pub melee_damage: f64,
    pub ranged_damage: f64,
    pub combat: f64,
    pub fitness: f64,
    pub armor: f64,
    pub crit_bonus: f64,
    pub crit_mult_bonus: f64,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            hit_points: 100.0,
            melee_damage: 10.0,
            ranged_damage: 10.0,
            combat: 10.0,
            fitness: 10.0,
            armor: 0.0,
            crit_bonus: 0.0,
            crit_mult_bonus: 0.0,
        }
    }
}

impl BaseAttributes {
    /// Replace non-finite or negative-armor values with defaults.
    ///
    /// Returns the names of the fields that were replaced.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut replaced = Vec::new();
        let fields: [(&'static str, &mut f64, f64); 8] = [
            ("hit_points", &mut self.hit_points, defaults.hit_points),
            ("melee_damage", &mut self.melee_damage, defaults.melee_damage),
            ("ranged_damage", &mut self.ranged_damage, defaults.ranged_damage),
            ("combat", &mut self.combat, defaults.combat),
            ("fitness", &mut self.fitness, defaults.fitness),
            ("armor", &mut self.armor, defaults.armor),
            ("crit_bonus", &mut self.crit_bonus, defaults.crit_bonus),
            ("crit_mult_bonus", &mut self.crit_mult_bonus, defaults.crit_mult_bonus),
        ];
        for (name, value, default) in fields {
            if !value.is_finite() {
                *value = default;
                replaced.push(name);
            }
        }
        if self.armor < 0.0 {
            self.armor = 0.0;
            replaced.push("armor");
        }
        replaced
    }
}

/// Source of base attributes (character sheet plus equipment mods)
pub trait StatsProvider: Send + Sync {
    fn base_attributes(&self, id: CombatantId) -> Result<BaseAttributes, ProviderError>;
}

/// Every fighter gets the default sheet
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStats;

impl StatsProvider for DefaultStats {
    fn base_attributes(&self, _id: CombatantId) -> Result<BaseAttributes, ProviderError> {
        Ok(BaseAttributes::default())
    }
}
