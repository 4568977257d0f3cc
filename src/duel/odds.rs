//! Pre-duel odds for the public announcement

use crate::provider::BaseAttributes;

/// Rough fighting strength from the sheet and current hit points
pub fn profile_score(attributes: &BaseAttributes, hp: i32) -> f64 {
    let score = 0.30 * (attributes.melee_damage + attributes.ranged_damage)
        + 0.25 * attributes.combat
        + 0.20 * attributes.fitness
        + 0.25 * hp as f64;
    score.max(1.0)
}

/// Phrase the chance that A wins
pub fn odds_phrase(p_a: f64, name_a: &str, name_b: &str) -> String {
    let diff = (p_a - 0.5).abs();
    let favorite = if p_a >= 0.5 { name_a } else { name_b };
    if diff < 0.02 {
        "Anyone's guess!".to_string()
    } else if diff < 0.08 {
        "It looks like it's going to be a close fight.".to_string()
    } else if diff < 0.15 {
        format!("Slight edge to {}.", favorite)
    } else if diff < 0.25 {
        format!("{} is favored.", favorite)
    } else {
        "This should be a beatdown...".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_score() {
        // 0.3*20 + 2.5 + 2 + 25
        assert!((profile_score(&BaseAttributes::default(), 100) - 35.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_floor() {
        let nothing = BaseAttributes {
            melee_damage: 0.0,
            ranged_damage: 0.0,
            combat: 0.0,
            fitness: 0.0,
            ..BaseAttributes::default()
        };
        assert_eq!(profile_score(&nothing, 0), 1.0);
    }

    #[test]
    fn test_phrases() {
        assert_eq!(odds_phrase(0.51, "A", "B"), "Anyone's guess!");
        assert_eq!(odds_phrase(0.45, "A", "B"), "It looks like it's going to be a close fight.");
        assert_eq!(odds_phrase(0.60, "A", "B"), "Slight edge to A.");
        assert_eq!(odds_phrase(0.30, "A", "B"), "B is favored.");
        assert_eq!(odds_phrase(0.90, "A", "B"), "This should be a beatdown...");
    }
}
