//! Action entry point
//!
//! validate (no mutation) -> pending grenade -> effect -> end turn ->
//! outcome -> inline AI

use rand::Rng;

use crate::core::error::{DuelError, Result};
use crate::core::types::{CombatantId, Side};
use crate::duel::ai::choose_action;
use crate::duel::constants::{ADVANCE_MAX, ADVANCE_MIN, DISENGAGE_MAX, DISENGAGE_MIN};
use crate::duel::range::RangeGate;
use crate::duel::state::{DuelPhase, DuelState};
use crate::duel::{Action, ActionKind, DuelStatus, PhaseKind};

impl DuelState {
    /// Perform `action` for `actor`, then let an AI opponent respond.
    ///
    /// Illegal actions are rejected before anything changes.
    pub fn act(&mut self, actor: CombatantId, action: Action) -> Result<DuelStatus> {
        let side = self.validate(actor, action)?;
        self.perform(side, action);
        self.settle_ai();
        Ok(self.status())
    }

    /// Step a computer fighter once. For drivers of AI-vs-AI duels.
    pub fn take_ai_turn(&mut self) -> Result<DuelStatus> {
        let side = self.acting_side().ok_or(DuelError::DuelEnded)?;
        if !self.fighter(side).is_ai {
            return Err(DuelError::NotAi(self.fighter(side).id));
        }
        let action = choose_action(self, side);
        self.perform(side, action);
        Ok(self.status())
    }

    /// Check turn ownership and phase legality; returns the actor's side
    pub fn validate(&self, actor: CombatantId, action: Action) -> Result<Side> {
        if !self.is_active() {
            return Err(DuelError::DuelEnded);
        }
        let side = self
            .side_of(actor)
            .ok_or(DuelError::NotParticipant(actor))?;
        let kind = action.kind();

        if let DuelPhase::Finisher { victor, .. } = self.phase {
            if kind != ActionKind::Finisher {
                return Err(DuelError::WrongPhase {
                    action: kind,
                    phase: PhaseKind::Finisher,
                });
            }
            if side != victor {
                return Err(DuelError::NotVictor);
            }
            return Ok(side);
        }

        if side != self.turn {
            return Err(DuelError::NotYourTurn {
                actor,
                expected: self.fighter(self.turn).id,
            });
        }

        let wrong_phase = DuelError::WrongPhase {
            action: kind,
            phase: self.phase.kind(),
        };
        match (&self.phase, kind) {
            (
                DuelPhase::Ranged,
                ActionKind::Advance
                | ActionKind::Disengage
                | ActionKind::Attack
                | ActionKind::ThrowGrenade,
            ) => Ok(side),
            (DuelPhase::Ranged, ActionKind::Grapple) => {
                if self.gate() == RangeGate::Hands {
                    Ok(side)
                } else {
                    Err(DuelError::NotAtHands)
                }
            }
            (
                DuelPhase::Grapple,
                ActionKind::Wrestle | ActionKind::Punch | ActionKind::BreakFree | ActionKind::Choke,
            ) => Ok(side),
            (DuelPhase::Choke { choker, .. }, ActionKind::Choke | ActionKind::LetGo) => {
                if side == *choker {
                    Ok(side)
                } else {
                    Err(DuelError::NotChoker)
                }
            }
            (DuelPhase::Choke { target, .. }, ActionKind::Struggle) if side == *target => Ok(side),
            _ => Err(wrong_phase),
        }
    }

    /// Resolve an already-validated action
    fn perform(&mut self, side: Side, action: Action) {
        self.touch();
        tracing::debug!("{} performs {:?}", self.fighter(side).name, action);

        if let Action::Finisher(choice) = action {
            self.resolve_finisher(choice);
            self.resolve_outcome();
            return;
        }

        if self.detonate_pending_grenade(side).is_some() && self.fighter(side).is_down() {
            self.resolve_outcome();
            return;
        }

        let ends_turn = match action {
            Action::Advance => {
                let steps = self.rng.gen_range(ADVANCE_MIN..=ADVANCE_MAX);
                self.micro_move(side, steps);
                let line = format!("{} advances **{} meters**.", self.fighter(side).tag(), steps);
                self.log.push(line);
                true
            }
            Action::Disengage => {
                let steps = self.rng.gen_range(DISENGAGE_MIN..=DISENGAGE_MAX);
                self.micro_move(side, -steps);
                let line = format!("{} retreats **{} meters**.", self.fighter(side).tag(), steps);
                self.log.push(line);
                true
            }
            Action::Attack => {
                self.attack(side);
                true
            }
            Action::ThrowGrenade => {
                self.throw_grenade(side);
                true
            }
            Action::Grapple => {
                self.begin_grapple(side);
                false
            }
            Action::Wrestle => {
                self.wrestle(side);
                true
            }
            Action::Punch => {
                self.punch(side);
                true
            }
            Action::BreakFree => {
                self.break_free(side);
                true
            }
            Action::Choke => {
                if matches!(self.phase, DuelPhase::Choke { .. }) {
                    self.squeeze(side);
                } else {
                    self.attempt_choke(side);
                }
                true
            }
            Action::LetGo => {
                self.let_go(side);
                true
            }
            Action::Struggle => {
                self.struggle(side);
                true
            }
            Action::Finisher(_) => false,
        };

        if ends_turn {
            self.end_turn();
        }
        self.resolve_outcome();
    }

    /// Run AI turns inline while a computer fighter holds the initiative
    /// against a human
    pub fn settle_ai(&mut self) {
        while let Some(side) = self.acting_side() {
            if !self.fighter(side).is_ai || self.fighter(side.other()).is_ai {
                break;
            }
            let action = choose_action(self, side);
            self.perform(side, action);
        }
    }
}
