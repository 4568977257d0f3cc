//! Scripted opponent
//!
//! The policy only picks an `Action`; the action then runs through the
//! same resolution path a player's would.

use rand::seq::SliceRandom;

use crate::core::types::Side;
use crate::duel::state::{DuelPhase, DuelState};
use crate::duel::Action;

const GRAPPLE_MOVES: [Action; 3] = [Action::Wrestle, Action::Punch, Action::BreakFree];

/// Decide what the computer-controlled `side` does now
pub fn choose_action(state: &mut DuelState, side: Side) -> Action {
    match state.phase {
        DuelPhase::Finisher { .. } => Action::Finisher(state.config.ai_finisher),
        DuelPhase::Choke { choker, .. } if choker == side => Action::Choke,
        DuelPhase::Choke { .. } => Action::Struggle,
        DuelPhase::Grapple => *GRAPPLE_MOVES
            .choose(&mut state.rng)
            .unwrap_or(&Action::Wrestle),
        DuelPhase::Ranged | DuelPhase::Ended(_) => match state.attack_plan(side) {
            // Close the distance instead of wasting the turn
            Some(plan) if plan.is_unarmed() && state.fists_too_far() => Action::Advance,
            Some(_) => Action::Attack,
            None => Action::Advance,
        },
    }
}
