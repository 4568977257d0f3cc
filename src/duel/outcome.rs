//! Draw, victory, and finisher resolution

use rand::Rng;

use crate::core::types::Side;
use crate::duel::constants::{BEAT_DAMAGE_MAX, BEAT_DAMAGE_MIN, UNARMED_NAME};
use crate::duel::state::{DuelPhase, DuelState, HitKind};
use crate::duel::{DuelEnd, FinisherChoice};

pub const FINISHER_PROMPT: &str = "☠️ Your opponent is **unconscious**. Choose their fate.";

impl DuelState {
    /// Hit-point defeat takes precedence over unconsciousness
    pub fn winner(&self) -> Option<Side> {
        let [a, b] = &self.sides;
        if a.fighter.is_down() && !b.fighter.is_down() {
            return Some(Side::B);
        }
        if b.fighter.is_down() && !a.fighter.is_down() {
            return Some(Side::A);
        }
        if a.unconscious && !b.unconscious {
            return Some(Side::B);
        }
        if b.unconscious && !a.unconscious {
            return Some(Side::A);
        }
        None
    }

    pub fn is_draw(&self) -> bool {
        self.sides.iter().all(|side| side.is_incapacitated())
    }

    /// Settle the duel after an action: draw, finisher lock, or victory
    pub fn resolve_outcome(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.is_draw() {
            self.log.push("Both fighters fall! It's a draw.");
            tracing::info!("Duel {} ended in a draw", self.id);
            self.phase = DuelPhase::Ended(DuelEnd::Draw);
            return;
        }
        let Some(winner) = self.winner() else {
            return;
        };
        let loser = winner.other();
        let down = self.side(loser);
        if down.unconscious && !down.fighter.is_down() {
            if !matches!(self.phase, DuelPhase::Finisher { .. }) {
                self.phase = DuelPhase::Finisher {
                    victor: winner,
                    target: loser,
                };
                self.log.push_raw(FINISHER_PROMPT);
                tracing::debug!("Finisher armed for {}", self.fighter(winner).name);
            }
            return;
        }
        self.finalize_victory(winner);
    }

    fn finalize_victory(&mut self, winner: Side) {
        let summary = self.summary(winner);
        let line = format!("🏆 {} wins!", self.fighter(winner).name);
        self.log.push(line);
        tracing::info!("Duel {} over: {}", self.id, summary);
        self.phase = DuelPhase::Ended(DuelEnd::Victory {
            winner: self.fighter(winner).id,
            summary,
        });
    }

    /// One-line result phrased from how the loser last got hurt
    pub fn summary(&self, winner: Side) -> String {
        let loser = winner.other();
        let w = &self.fighter(winner).name;
        let l = &self.fighter(loser).name;
        let Some(hit) = &self.side(loser).last_hit else {
            return format!("{} defeated {}.", w, l);
        };
        match hit.kind {
            HitKind::Shot if hit.weapon.is_empty() => format!("{} shot {}.", w, l),
            HitKind::Shot => format!("{} shot {} with {}.", w, l, hit.weapon),
            HitKind::Grenade => format!("{} blew up {} with a grenade.", w, l),
            HitKind::Punch => format!("{} Beat {} to Death.", w, l),
            HitKind::Wrestle => format!("{} beat {} (wrestle).", w, l),
            HitKind::Strangled => format!("{} choked out {}.", w, l),
            HitKind::Kidnap => format!("{} kidnapped {}.", w, l),
            HitKind::Mercy => format!("{} spared {}.", w, l),
        }
    }

    /// Apply the victor's choice. Only meaningful in the finisher phase.
    pub fn resolve_finisher(&mut self, choice: FinisherChoice) {
        let DuelPhase::Finisher { victor, target } = self.phase else {
            return;
        };
        let victor_tag = self.fighter(victor).tag();
        let target_name = self.fighter(target).name.clone();

        match choice {
            FinisherChoice::Mercy => {
                self.log
                    .push_raw(format!("🕊️ {} shows **mercy** to {}.", victor_tag, target_name));
                self.record_hit(target, victor, HitKind::Mercy, "");
                self.finalize_victory(victor);
            }
            FinisherChoice::Beat => {
                let damage = self.rng.gen_range(BEAT_DAMAGE_MIN..=BEAT_DAMAGE_MAX);
                let dealt = self.fighter_mut(target).take_damage(damage);
                self.log.push(format!(
                    "👊 {} **beats** the unconscious {} for **{}**.",
                    victor_tag, target_name, dealt
                ));
                self.record_hit(target, victor, HitKind::Punch, UNARMED_NAME);
                if self.fighter(target).is_down() {
                    self.finalize_victory(victor);
                }
            }
            FinisherChoice::Kidnap => {
                let victor_id = self.fighter(victor).id;
                let target_id = self.fighter(target).id;
                let stored = match self.collaborators.capture.capture(victor_id, target_id, &target_name) {
                    Ok(stored) => stored,
                    Err(e) => {
                        tracing::warn!("Kidnap capture failed for {}: {}", target_id, e);
                        false
                    }
                };
                let note = if stored { " (added to inventory)" } else { "" };
                self.log.push_raw(format!(
                    "🧿 {} **kidnaps** {}.{}",
                    victor_tag, target_name, note
                ));
                self.record_hit(target, victor, HitKind::Kidnap, "");
                self.finalize_victory(victor);
            }
        }
        self.touch();
    }
}
