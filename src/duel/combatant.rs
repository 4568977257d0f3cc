//! Fighters and their hit points

use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_i, CombatantId};
use crate::duel::constants::MAX_HIT_POINTS;

/// One fighter as the duel sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub hp: i32,
    pub is_ai: bool,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hp: MAX_HIT_POINTS,
            is_ai: false,
        }
    }

    pub fn ai(id: CombatantId, name: impl Into<String>) -> Self {
        Self {
            is_ai: true,
            ..Self::new(id, name)
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }

    /// Subtract damage, flooring at zero. Returns hit points actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = clamp_i(self.hp - amount.max(0), 0, MAX_HIT_POINTS);
        before - self.hp
    }

    /// Name as shown in action lines; AI fighters get a robot tag
    pub fn tag(&self) -> String {
        if self.is_ai {
            format!("🤖 {}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut fighter = Combatant::new(CombatantId(1), "Rook");
        assert_eq!(fighter.take_damage(30), 30);
        assert_eq!(fighter.take_damage(500), 70);
        assert_eq!(fighter.hp, 0);
        assert!(fighter.is_down());
    }

    #[test]
    fn test_negative_damage_never_heals() {
        let mut fighter = Combatant::new(CombatantId(1), "Rook");
        fighter.hp = 40;
        assert_eq!(fighter.take_damage(-10), 0);
        assert_eq!(fighter.hp, 40);
    }

    #[test]
    fn test_ai_tag() {
        assert_eq!(Combatant::ai(CombatantId(2), "AI Defender").tag(), "🤖 AI Defender");
        assert_eq!(Combatant::new(CombatantId(3), "Vex").tag(), "Vex");
    }
}
