//! Positioning on the distance line
//!
//! Fine moves shift one fighter by cells and derive the gate from the new
//! gap. Coarse steps change the gate and re-space the fighters to match.
//! Either way the grapple breaks the moment the gate leaves Hands On.

use crate::core::types::{clamp_i, Side};
use crate::duel::range::{gap_for_gate, gate_for_gap, step_gate, RangeGate};
use crate::duel::state::{DuelPhase, DuelState};

impl DuelState {
    /// Re-space both fighters so their gap matches the current gate.
    ///
    /// The mover is repositioned around the anchored opponent; with no
    /// mover both are recentered.
    pub fn resync_positions(&mut self, mover: Option<Side>) {
        if self.is_grappling() {
            return;
        }
        let width = self.config.line_width;
        let target = gap_for_gate(self.gate(), width);
        let mut a = self.sides[0].position;
        let mut b = self.sides[1].position;
        if a >= b {
            a = (b - 2).max(0);
        }

        if b - a != target {
            match mover {
                Some(Side::A) => a = clamp_i(b - target, 0, width - 1),
                Some(Side::B) => b = clamp_i(a + target, 0, width - 1),
                None => {
                    let left = ((width - target) / 2 - 1).max(0);
                    a = left;
                    b = clamp_i(left + target, 0, width - 1);
                }
            }
        }
        if a >= b {
            a = (b - 1).max(0);
        }
        self.set_positions(a, b);
    }

    /// Move `side` by `steps` cells: positive closes in, negative backs off.
    ///
    /// Never passes the opponent and never leaves the line. The gate is
    /// recomputed from the resulting gap. No-op while grappling.
    pub fn micro_move(&mut self, side: Side, steps: i32) {
        if self.is_grappling() {
            return;
        }
        let width = self.config.line_width;
        let me = self.side(side).position;
        let them = self.side(side.other()).position;
        let me_left = me < them;

        let moved = match (steps >= 0, me_left) {
            (true, true) => (me + steps).min(them - 1),
            (true, false) => (me - steps).max(them + 1),
            (false, true) => (me + steps).max(0),
            (false, false) => (me - steps).min(width - 1),
        };
        let moved = if me_left {
            moved.min(them - 1)
        } else {
            moved.max(them + 1)
        };

        self.side_mut(side).position = moved;
        let (a, b) = (self.sides[0].position, self.sides[1].position);
        self.set_positions(a, b);

        let prev = self.gate();
        let gap = (self.sides[1].position - self.sides[0].position).abs();
        self.range_idx = gate_for_gap(gap, width).index();
        self.check_grapple_transition(prev, self.gate(), Some(side));
    }

    /// Change the gate by whole steps and re-space around the mover
    pub fn step_range(&mut self, delta: i32, actor: Option<Side>) {
        let prev = self.gate();
        self.range_idx = step_gate(self.range_idx, delta);
        self.resync_positions(actor);
        self.check_grapple_transition(prev, self.gate(), actor);
    }

    /// Break the grapple (and any choke) once the gate is no longer Hands On
    pub fn check_grapple_transition(&mut self, prev: RangeGate, now: RangeGate, actor: Option<Side>) {
        if !self.is_grappling() || now == RangeGate::Hands {
            return;
        }
        let was_choking = matches!(self.phase, DuelPhase::Choke { .. });
        tracing::debug!("Grapple broken by range change {:?} -> {:?}", prev, now);
        self.log.push_raw("🧷 Grappling broken. Combat resumes.");
        self.leave_grapple();
        if was_choking {
            self.log.push_raw("🫁 Choke is released as distance opens.");
        }
        self.resync_positions(actor);
    }

    /// Back to the ranged phase with choke meters cleared
    pub(crate) fn leave_grapple(&mut self) {
        self.phase = DuelPhase::Ranged;
        for side in &mut self.sides {
            side.breath = None;
            side.bloodflow = None;
        }
    }

    pub(crate) fn set_positions(&mut self, a: i32, b: i32) {
        self.sides[0].position = a;
        self.sides[1].position = b;
        self.keep_apart();
        self.refresh_cover();
    }

    /// Side A stays strictly left of side B
    fn keep_apart(&mut self) {
        let width = self.config.line_width;
        let (a, b) = (self.sides[0].position, self.sides[1].position);
        if a < b {
            return;
        }
        tracing::warn!("Fighters overlapped at {} / {}; nudging apart", a, b);
        let b = (a + 1).min(width - 1);
        self.sides[1].position = b;
        self.sides[0].position = b - 1;
    }

    /// Re-read cover flags from the cells both fighters stand on
    pub fn refresh_cover(&mut self) {
        let percent = self.config.cover_percent;
        for side in Side::both() {
            let in_cover = self
                .battlefield
                .cover_at(self.side(side).position)
                .is_some();
            let state = self.side_mut(side);
            state.in_cover = in_cover;
            state.cover_percent = if in_cover { percent } else { 0 };
        }
    }

    /// Current cell separation
    pub fn gap(&self) -> i32 {
        (self.sides[1].position - self.sides[0].position).abs()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::types::Side;
    use crate::duel::battlefield::CoverKind;
    use crate::duel::range::RangeGate;
    use crate::duel::state::tests::duel;
    use crate::duel::state::DuelPhase;

    #[test]
    fn test_advance_never_passes_opponent() {
        let mut state = duel();
        for _ in 0..40 {
            state.micro_move(Side::A, 2);
        }
        assert_eq!(state.gap(), 1);
        assert_eq!(state.gate(), RangeGate::Hands);
        assert!(state.sides[0].position < state.sides[1].position);
    }

    #[test]
    fn test_retreat_clamps_to_line() {
        let mut state = duel();
        for _ in 0..40 {
            state.micro_move(Side::A, -3);
            state.micro_move(Side::B, -3);
        }
        assert_eq!(state.sides[0].position, 0);
        assert_eq!(state.sides[1].position, 25);
        assert_eq!(state.gate(), RangeGate::VeryFar);
    }

    #[test]
    fn test_gate_follows_gap() {
        let mut state = duel();
        state.sides[0].position = 0;
        state.sides[1].position = 20;
        state.micro_move(Side::B, 1);
        assert_eq!(state.gap(), 19);
        assert_eq!(state.gate(), RangeGate::Far);
    }

    #[test]
    fn test_step_range_resyncs_gap() {
        let mut state = duel();
        state.step_range(1, Some(Side::B));
        assert_eq!(state.gate(), RangeGate::Far);
        assert_eq!(state.gap(), 19);
        state.step_range(-3, None);
        assert_eq!(state.gate(), RangeGate::Hands);
        assert_eq!(state.gap(), 3);
    }

    #[test]
    fn test_grapple_breaks_on_coarse_step() {
        let mut state = duel();
        state.range_idx = 0;
        state.phase = DuelPhase::Choke {
            choker: Side::A,
            target: Side::B,
        };
        state.sides[1].breath = Some(20);
        state.step_range(1, Some(Side::B));
        assert_eq!(state.phase, DuelPhase::Ranged);
        assert_eq!(state.sides[1].breath, None);
        assert!(state.log.contains("Grappling broken"));
        assert!(state.log.contains("Choke is released"));
    }

    #[test]
    fn test_micro_move_is_noop_while_grappling() {
        let mut state = duel();
        state.phase = DuelPhase::Grapple;
        let before = state.sides[0].position;
        state.micro_move(Side::A, -3);
        assert_eq!(state.sides[0].position, before);
    }

    #[test]
    fn test_overlap_is_nudged_apart() {
        let mut state = duel();
        state.sides[0].position = 25;
        state.sides[1].position = 25;
        state.resync_positions(None);
        assert!(state.sides[0].position < state.sides[1].position);
    }

    #[test]
    fn test_cover_refreshes_after_move() {
        let mut state = duel();
        let target = state.sides[0].position + 1;
        state.battlefield.place(target as usize, Some(CoverKind::Barrel));
        state.micro_move(Side::A, 1);
        assert!(state.side(Side::A).in_cover);
        assert_eq!(state.side(Side::A).cover_percent, 40);
        state.micro_move(Side::A, 1);
        assert!(!state.side(Side::A).in_cover);
    }
}
