//! Property tests for the duel invariants

use proptest::prelude::*;

use lowlife_duel::core::{CombatantId, DuelConfig, SessionKey, Side};
use lowlife_duel::duel::{
    gap_for_gate, gate_for_gap, mitigate, Combatant, DamageKind, DuelState, RangeGate,
};
use lowlife_duel::provider::Collaborators;

fn duel(seed: u64) -> DuelState {
    DuelState::new(
        SessionKey::new(1, 1),
        Combatant::new(CombatantId(1), "Rook"),
        Combatant::new(CombatantId(2), "Vex"),
        DuelConfig::default(),
        Collaborators::default(),
        seed,
    )
    .unwrap()
}

fn damage_kind() -> impl Strategy<Value = DamageKind> {
    prop_oneof![
        Just(DamageKind::Melee),
        Just(DamageKind::SmallRanged),
        Just(DamageKind::LargeRanged),
        Just(DamageKind::Grenade),
    ]
}

proptest! {
    #[test]
    fn hit_points_stay_in_bounds(hits in prop::collection::vec(-50i32..150, 0..30)) {
        let mut fighter = Combatant::new(CombatantId(1), "Rook");
        for amount in hits {
            let before = fighter.hp;
            let lost = fighter.take_damage(amount);
            prop_assert!((0..=100).contains(&fighter.hp));
            prop_assert!(fighter.hp <= before);
            prop_assert_eq!(before - fighter.hp, lost);
        }
    }

    #[test]
    fn gaps_grow_with_gates(width in 8i32..80) {
        let gaps: Vec<i32> = RangeGate::ORDER.iter().map(|g| gap_for_gate(*g, width)).collect();
        prop_assert!(gaps.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(gaps.iter().all(|g| *g >= 1 && *g < width));
    }

    #[test]
    fn gates_survive_a_round_trip_on_wide_lines(width in 26i32..80) {
        for gate in RangeGate::ORDER {
            prop_assert_eq!(gate_for_gap(gap_for_gate(gate, width), width), gate);
        }
    }

    #[test]
    fn micro_moves_keep_fighters_ordered(
        seed in any::<u64>(),
        moves in prop::collection::vec((any::<bool>(), -3i32..=3), 1..40),
    ) {
        let mut state = duel(seed);
        let width = state.config.line_width;
        for (left, steps) in moves {
            let side = if left { Side::A } else { Side::B };
            state.micro_move(side, steps);
            let a = state.side(Side::A).position;
            let b = state.side(Side::B).position;
            prop_assert!(0 <= a && a < b && b < width);
            prop_assert_eq!(state.gate(), gate_for_gap(b - a, width));
        }
    }

    #[test]
    fn mitigation_always_lets_damage_through(
        armor in 0.0f64..200.0,
        damage in 1i32..200,
        kind in damage_kind(),
    ) {
        let (dealt, absorbed) = mitigate(armor, damage, kind);
        prop_assert!(dealt >= 1);
        prop_assert!(absorbed >= 0);
        prop_assert_eq!(dealt + absorbed, damage);
    }
}
