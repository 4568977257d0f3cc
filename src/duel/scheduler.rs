//! Turn sequencing
//!
//! end_turn: flip owner -> tick -> grapple flip -> stagger skip ->
//! ambient choke -> clearing expiry

use rand::Rng;

use crate::core::types::{clamp_f, Side};
use crate::duel::constants::{
    AMBIENT_BLOOD_LOSS, AMBIENT_BREATH_LOSS, INITIATIVE_COMBAT_EDGE, INITIATIVE_FITNESS_EDGE,
    INITIATIVE_MAX, INITIATIVE_MIN,
};
use crate::duel::state::{DuelPhase, DuelState};

/// Probability that side A moves first
pub fn initiative_chance(combat_a: f64, fitness_a: f64, combat_b: f64, fitness_b: f64) -> f64 {
    clamp_f(
        0.5 + INITIATIVE_COMBAT_EDGE * (combat_a - combat_b)
            + INITIATIVE_FITNESS_EDGE * (fitness_a - fitness_b),
        INITIATIVE_MIN,
        INITIATIVE_MAX,
    )
}

impl DuelState {
    pub(crate) fn roll_initiative(&mut self) {
        let a = self.collaborators.attributes(self.fighter(Side::A).id);
        let b = self.collaborators.attributes(self.fighter(Side::B).id);
        let p_a = initiative_chance(a.combat, a.fitness, b.combat, b.fitness);
        let roll: f64 = self.rng.gen();
        self.turn = if roll <= p_a { Side::A } else { Side::B };

        let pct_a = (p_a * 100.0).round_ties_even() as i32;
        let pct_b = 100 - pct_a;
        self.initiative_note = format!("a{}_[b{}]", pct_a, pct_b);
        let line = format!(
            "Initiative: {} {}% vs {} {}% → **{}** starts.",
            self.fighter(Side::A).name,
            pct_a,
            self.fighter(Side::B).name,
            pct_b,
            self.fighter(self.turn).name
        );
        self.log.push_raw(line);
    }

    fn flip_turn(&mut self) {
        self.turn = self.turn.other();
        if self.turn == Side::A {
            self.round += 1;
        }
        self.tick += 1;
    }

    /// Hand the turn over and run the between-turn status ticks
    pub fn end_turn(&mut self) {
        self.flip_turn();
        if self.is_grappling() {
            self.grapple_flip = !self.grapple_flip;
        }

        let current = self.turn;
        if self.side(current).skip_next_turn {
            self.side_mut(current).skip_next_turn = false;
            let line = format!("😵 {} is staggered and loses a turn.", self.fighter(current).name);
            self.log.push_raw(line);
            self.flip_turn();
        }

        self.apply_choke_tick();
        self.expire_clearing();
        self.touch();
        tracing::debug!(
            "Turn passed to {} (round {}, tick {})",
            self.fighter(self.turn).name,
            self.round,
            self.tick
        );
    }

    /// Ambient drain while a choke is held
    pub fn apply_choke_tick(&mut self) {
        if let DuelPhase::Choke { choker, target } = self.phase {
            if self.side(target).unconscious {
                return;
            }
            self.drain_choke(choker, target, AMBIENT_BREATH_LOSS, AMBIENT_BLOOD_LOSS);
        }
    }

    /// Expire clearing entries at or before the current tick
    pub fn expire_clearing(&mut self) {
        let now = self.tick;
        for side in &mut self.sides {
            let removed = side.clearing.expire(now);
            if removed > 0 {
                tracing::debug!("{} clearing stacks expired for {}", removed, side.fighter.name);
            }
        }
    }
}
