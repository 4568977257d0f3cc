//! Turn-based duel engine
//!
//! Two fighters trade actions across a discretized distance line. The
//! phase enum decides which actions exist; everything else is bookkeeping
//! on the two fixed per-side records.

pub mod actions;
pub mod ai;
pub mod attack;
pub mod battlefield;
pub mod combatant;
pub mod constants;
pub mod grapple;
pub mod log;
pub mod movement;
pub mod odds;
pub mod outcome;
pub mod range;
pub mod scheduler;
pub mod state;

pub use attack::{
    compute_attack_numbers, crit_params, grenade_chance, hit_probability, mitigate,
    AttackNumbers, AttackOutcome, DamageKind,
};
pub use battlefield::{Battlefield, CoverKind, TimeOfDay};
pub use combatant::Combatant;
pub use log::EventLog;
pub use odds::{odds_phrase, profile_score};
pub use range::{gap_for_gate, gate_for_gap, step_gate, RangeGate, GATE_COUNT};
pub use scheduler::initiative_chance;
pub use state::{ClearingLedger, DuelPhase, DuelState, HitKind, LastHit, PendingGrenade, SideState};

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;

/// What the victor does with an unconscious opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinisherChoice {
    /// End the duel, no further damage
    Mercy,
    /// 1-7 damage per use; ends the duel at zero hit points
    Beat,
    /// End the duel and hand a capture token to the capture sink
    Kidnap,
}

/// A player or AI action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Advance,
    Disengage,
    Attack,
    ThrowGrenade,
    Grapple,
    Wrestle,
    Punch,
    BreakFree,
    /// Attempt in the grapple phase, squeeze in the choke phase
    Choke,
    LetGo,
    Struggle,
    Finisher(FinisherChoice),
}

/// Payload-free action tag for errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Advance,
    Disengage,
    Attack,
    ThrowGrenade,
    Grapple,
    Wrestle,
    Punch,
    BreakFree,
    Choke,
    LetGo,
    Struggle,
    Finisher,
}

impl Action {
    pub fn kind(self) -> ActionKind {
        match self {
            Action::Advance => ActionKind::Advance,
            Action::Disengage => ActionKind::Disengage,
            Action::Attack => ActionKind::Attack,
            Action::ThrowGrenade => ActionKind::ThrowGrenade,
            Action::Grapple => ActionKind::Grapple,
            Action::Wrestle => ActionKind::Wrestle,
            Action::Punch => ActionKind::Punch,
            Action::BreakFree => ActionKind::BreakFree,
            Action::Choke => ActionKind::Choke,
            Action::LetGo => ActionKind::LetGo,
            Action::Struggle => ActionKind::Struggle,
            Action::Finisher(_) => ActionKind::Finisher,
        }
    }
}

/// Payload-free phase tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Ranged,
    Grapple,
    Choke,
    Finisher,
    Ended,
}

/// How a duel ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelEnd {
    Victory { winner: CombatantId, summary: String },
    Draw,
    Aborted,
    TimedOut,
}

/// What the caller sees after each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelStatus {
    Ongoing,
    Finisher {
        victor: CombatantId,
        target: CombatantId,
    },
    Ended(DuelEnd),
}

impl DuelStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, DuelStatus::Ended(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_drops_payload() {
        assert_eq!(
            Action::Finisher(FinisherChoice::Kidnap).kind(),
            ActionKind::Finisher
        );
        assert_eq!(Action::Choke.kind(), ActionKind::Choke);
    }

    #[test]
    fn test_status_is_over() {
        assert!(!DuelStatus::Ongoing.is_over());
        assert!(DuelStatus::Ended(DuelEnd::Draw).is_over());
    }
}
