//! Duel constants - every number that encodes combat behavior
//!
//! Probabilities are in 0.0..=1.0; damage and meters are integer points.

// Hit points
pub const MAX_HIT_POINTS: i32 = 100;

// Attack resolution
pub const ACCURACY_MIN_PCT: i32 = 5;
pub const ACCURACY_MAX_PCT: i32 = 95;
pub const HIT_CHANCE_CAP: f64 = 0.98;
pub const COMBAT_EDGE_PER_POINT: f64 = 0.015;
pub const FITNESS_EDGE_PER_POINT: f64 = 0.010;
pub const UNARMED_NAME: &str = "Fists";
pub const UNARMED_ACCURACY: i32 = 70;
pub const UNARMED_DAMAGE: i32 = 6;

// Armor factors by damage kind
pub const ARMOR_FACTOR_MELEE: f64 = 0.60;
pub const ARMOR_FACTOR_SMALL_RANGED: f64 = 0.80;
pub const ARMOR_FACTOR_LARGE_RANGED: f64 = 0.80;
pub const ARMOR_FACTOR_GRENADE: f64 = 0.50;

// Critical hits (computed, not applied)
pub const CRIT_CHANCE_BASE: f64 = 0.10;
pub const CRIT_CHANCE_MIN: f64 = 0.05;
pub const CRIT_CHANCE_MAX: f64 = 0.40;
pub const CRIT_MULT_BASE: f64 = 1.50;
pub const CRIT_MULT_MAX: f64 = 2.25;

// Grenades
pub const GRENADE_BASE_CHANCE: f64 = 0.80;
pub const GRENADE_PENALTY_PER_GATE: f64 = 0.12;
pub const GRENADE_FITNESS_EDGE: f64 = 0.01;
pub const GRENADE_CHANCE_MIN: f64 = 0.10;
pub const GRENADE_CHANCE_MAX: f64 = 0.95;
pub const GRENADE_DAMAGE_MIN: i32 = 30;
pub const GRENADE_DAMAGE_MAX: i32 = 40;

// Movement (cells per action)
pub const ADVANCE_MIN: i32 = 1;
pub const ADVANCE_MAX: i32 = 2;
pub const DISENGAGE_MIN: i32 = 1;
pub const DISENGAGE_MAX: i32 = 3;
pub const MIN_EDGE_MARGIN: i32 = 3;

// Grapple positioning (0..=100, 50 is even footing)
pub const POSITIONING_START: i32 = 50;
pub const WRESTLE_SWING: i32 = 10;
pub const WRESTLE_SWING_CHANCE: f64 = 0.5;
pub const WRESTLE_DAMAGE_MIN: i32 = 1;
pub const WRESTLE_DAMAGE_MAX: i32 = 2;
pub const PUNCH_DAMAGE_MIN: i32 = 1;
pub const PUNCH_DAMAGE_MAX: i32 = 5;
pub const BREAK_FREE_BASE: f64 = 0.40;
pub const BREAK_FREE_MIN: f64 = 0.10;
pub const BREAK_FREE_MAX: f64 = 0.90;
pub const BREAK_FREE_FAIL_SWING: i32 = 5;
pub const POSITIONING_DIVISOR: f64 = 200.0;

// Choke
pub const CHOKE_BASE: f64 = 0.50;
pub const CHOKE_MIN: f64 = 0.20;
pub const CHOKE_MAX: f64 = 0.85;
pub const METER_START: i32 = 50;
pub const METER_MAX: i32 = 100;
pub const AMBIENT_BREATH_LOSS: (i32, i32) = (6, 10);
pub const AMBIENT_BLOOD_LOSS: (i32, i32) = (3, 7);
pub const SQUEEZE_BREATH_LOSS: (i32, i32) = (8, 12);
pub const SQUEEZE_BLOOD_LOSS: (i32, i32) = (4, 8);

// Finisher
pub const BEAT_DAMAGE_MIN: i32 = 1;
pub const BEAT_DAMAGE_MAX: i32 = 7;

// Initiative
pub const INITIATIVE_COMBAT_EDGE: f64 = 0.02;
pub const INITIATIVE_FITNESS_EDGE: f64 = 0.01;
pub const INITIATIVE_MIN: f64 = 0.10;
pub const INITIATIVE_MAX: f64 = 0.90;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_ordered() {
        assert!(GRENADE_DAMAGE_MIN < GRENADE_DAMAGE_MAX);
        assert!(AMBIENT_BREATH_LOSS.0 < AMBIENT_BREATH_LOSS.1);
        assert!(SQUEEZE_BREATH_LOSS.0 > AMBIENT_BREATH_LOSS.0);
        assert!(SQUEEZE_BLOOD_LOSS.1 > AMBIENT_BLOOD_LOSS.1);
    }

    #[test]
    fn test_probability_bounds_reasonable() {
        assert!(CHOKE_MIN < CHOKE_BASE && CHOKE_BASE < CHOKE_MAX);
        assert!(BREAK_FREE_MIN < BREAK_FREE_BASE && BREAK_FREE_BASE < BREAK_FREE_MAX);
        assert!(HIT_CHANCE_CAP < 1.0);
    }
}
