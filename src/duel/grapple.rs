//! Grapple and choke primitives
//!
//! Positioning is a 0-100 footing score per side contested by wrestling
//! and break-free attempts. Chokes drain breath and bloodflow; either
//! meter hitting zero knocks the target out without touching hit points.

use rand::Rng;

use crate::core::types::{clamp_f, clamp_i, Side};
use crate::duel::constants::*;
use crate::duel::state::{DuelPhase, DuelState, HitKind};

/// Chance a break-free attempt succeeds
pub fn break_free_chance(my_positioning: i32, their_positioning: i32) -> f64 {
    clamp_f(
        BREAK_FREE_BASE + (my_positioning - their_positioning) as f64 / POSITIONING_DIVISOR,
        BREAK_FREE_MIN,
        BREAK_FREE_MAX,
    )
}

/// Chance a choke attempt locks in
pub fn choke_chance(my_positioning: i32, their_positioning: i32) -> f64 {
    clamp_f(
        CHOKE_BASE + (my_positioning - their_positioning) as f64 / POSITIONING_DIVISOR,
        CHOKE_MIN,
        CHOKE_MAX,
    )
}

impl DuelState {
    /// Lock both fighters together. The starter keeps the turn.
    pub fn begin_grapple(&mut self, starter: Side) {
        self.phase = DuelPhase::Grapple;
        self.grapple_flip = false;
        let width = self.config.line_width;
        let gap = self.config.grapple_gap;
        let left = ((width - gap) / 2 - 1).max(0);
        self.set_positions(left, (left + gap).min(width - 1));
        self.turn = starter;
        self.log.push_raw("🤼 Grappling engaged!");
        tracing::debug!("{} starts a grapple", self.fighter(starter).name);
    }

    fn shift_positioning(&mut self, toward: Side, amount: i32) {
        let winner = self.side_mut(toward);
        winner.positioning = clamp_i(winner.positioning + amount, 0, 100);
        let loser = self.side_mut(toward.other());
        loser.positioning = clamp_i(loser.positioning - amount, 0, 100);
    }

    pub fn wrestle(&mut self, actor: Side) -> i32 {
        let foe = actor.other();
        let damage = self.rng.gen_range(WRESTLE_DAMAGE_MIN..=WRESTLE_DAMAGE_MAX);
        let dealt = self.fighter_mut(foe).take_damage(damage);
        let improved = self.rng.gen::<f64>() < WRESTLE_SWING_CHANCE;
        if improved {
            self.shift_positioning(actor, WRESTLE_SWING);
        }
        let line = format!(
            "{} **wrestles** {} for **{}**.{}",
            self.fighter(actor).tag(),
            self.fighter(foe).name,
            dealt,
            if improved { " Position improved." } else { "" }
        );
        self.log.push(line);
        self.record_hit(foe, actor, HitKind::Wrestle, "");
        dealt
    }

    pub fn punch(&mut self, actor: Side) -> i32 {
        let foe = actor.other();
        let damage = self.rng.gen_range(PUNCH_DAMAGE_MIN..=PUNCH_DAMAGE_MAX);
        let dealt = self.fighter_mut(foe).take_damage(damage);
        let line = format!(
            "{} **punches** {} for **{}**.",
            self.fighter(actor).tag(),
            self.fighter(foe).name,
            dealt
        );
        self.log.push(line);
        self.record_hit(foe, actor, HitKind::Punch, UNARMED_NAME);
        dealt
    }

    /// On success the breaker shoves out to Close, which ends the grapple
    pub fn break_free(&mut self, actor: Side) -> bool {
        let mine = self.side(actor).positioning;
        let theirs = self.side(actor.other()).positioning;
        let chance = break_free_chance(mine, theirs);
        if self.rng.gen::<f64>() <= chance {
            let line = format!("🧷 {} **breaks free** from the grapple!", self.fighter(actor).tag());
            self.log.push(line);
            self.step_range(1, Some(actor));
            true
        } else {
            self.shift_positioning(actor.other(), BREAK_FREE_FAIL_SWING);
            let line = format!("{} tries to break free but **fails**.", self.fighter(actor).tag());
            self.log.push(line);
            false
        }
    }

    /// Try to lock a choke; meters start full-ish if this is the first one
    pub fn attempt_choke(&mut self, actor: Side) -> bool {
        let foe = actor.other();
        let chance = choke_chance(self.side(actor).positioning, self.side(foe).positioning);
        if self.rng.gen::<f64>() <= chance {
            self.phase = DuelPhase::Choke {
                choker: actor,
                target: foe,
            };
            let target = self.side_mut(foe);
            target.breath.get_or_insert(METER_START);
            target.bloodflow.get_or_insert(METER_START);
            let line = format!(
                "🫵 {} secures a **choke** on {}!",
                self.fighter(actor).tag(),
                self.fighter(foe).name
            );
            self.log.push(line);
            true
        } else {
            let line = format!("{} reaches for a choke but **fails**.", self.fighter(actor).tag());
            self.log.push(line);
            false
        }
    }

    /// Active squeeze by the choker. Returns true if the target passed out.
    pub fn squeeze(&mut self, choker: Side) -> bool {
        let line = format!("🫀 {} **tightens the choke**.", self.fighter(choker).tag());
        self.log.push(line);
        self.drain_choke(choker, choker.other(), SQUEEZE_BREATH_LOSS, SQUEEZE_BLOOD_LOSS)
    }

    pub fn let_go(&mut self, choker: Side) {
        self.phase = DuelPhase::Grapple;
        let line = format!("🫁 {} **releases the choke**.", self.fighter(choker).tag());
        self.log.push(line);
    }

    /// The choke victim's only move
    pub fn struggle(&mut self, victim: Side) {
        let line = format!("{} struggles for air…", self.fighter(victim).tag());
        self.log.push(line);
    }

    /// Drain both meters by inclusive draws; knock out at zero
    pub(crate) fn drain_choke(
        &mut self,
        choker: Side,
        target: Side,
        breath_loss: (i32, i32),
        blood_loss: (i32, i32),
    ) -> bool {
        let breath_draw = self.rng.gen_range(breath_loss.0..=breath_loss.1);
        let blood_draw = self.rng.gen_range(blood_loss.0..=blood_loss.1);
        let state = self.side_mut(target);
        let breath = clamp_i(state.breath.unwrap_or(METER_START) - breath_draw, 0, METER_MAX);
        let blood = clamp_i(state.bloodflow.unwrap_or(METER_START) - blood_draw, 0, METER_MAX);
        state.breath = Some(breath);
        state.bloodflow = Some(blood);
        tracing::debug!("Choke drain on {}: breath {} blood {}", state.fighter.name, breath, blood);

        if breath > 0 && blood > 0 {
            return false;
        }
        state.unconscious = true;
        let line = format!("😵‍💫 {} passes out from the choke!", state.fighter.name);
        self.log.push_raw(line);
        self.record_hit(target, choker, HitKind::Strangled, "");
        true
    }
}
