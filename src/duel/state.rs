//! The duel aggregate
//!
//! Two fixed per-side records, a tagged phase, turn bookkeeping, and the
//! event log. Resolution logic lives in the sibling modules as `impl`
//! blocks on `DuelState`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::core::config::DuelConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::{CombatantId, DuelId, SessionKey, Side, Tick};
use crate::duel::battlefield::Battlefield;
use crate::duel::combatant::Combatant;
use crate::duel::constants::{MAX_HIT_POINTS, POSITIONING_START};
use crate::duel::log::EventLog;
use crate::duel::odds::{odds_phrase, profile_score};
use crate::duel::range::{gap_for_gate, RangeGate};
use crate::duel::{DuelEnd, DuelStatus, PhaseKind};
use crate::provider::{Collaborators, WeaponSlot};

/// Combat phase with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelPhase {
    /// Movement, shooting, grenades
    Ranged,
    /// Locked together at Hands On
    Grapple,
    /// Grapple with a choke on; implies grappling
    Choke { choker: Side, target: Side },
    /// Victor decides the fate of an unconscious opponent
    Finisher { victor: Side, target: Side },
    Ended(DuelEnd),
}

impl DuelPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            DuelPhase::Ranged => PhaseKind::Ranged,
            DuelPhase::Grapple => PhaseKind::Grapple,
            DuelPhase::Choke { .. } => PhaseKind::Choke,
            DuelPhase::Finisher { .. } => PhaseKind::Finisher,
            DuelPhase::Ended(_) => PhaseKind::Ended,
        }
    }

    pub fn is_grappling(&self) -> bool {
        matches!(self, DuelPhase::Grapple | DuelPhase::Choke { .. })
    }
}

/// How a fighter last took damage or went down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Shot,
    Grenade,
    Punch,
    Wrestle,
    Strangled,
    Kidnap,
    Mercy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastHit {
    pub by: Side,
    pub kind: HitKind,
    pub weapon: String,
}

/// Armed grenade waiting for its target's next turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingGrenade {
    pub from: Side,
    pub damage: i32,
}

/// Timed debuff stacks, expired by absolute tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearingLedger {
    pub stacks: u32,
    pub attacks_left: u32,
    pub expiries: Vec<Tick>,
}

impl ClearingLedger {
    pub fn add(&mut self, now: Tick, duration: Tick, attacks: u32) {
        self.stacks = self.stacks.saturating_add(1);
        self.attacks_left = self.attacks_left.saturating_add(attacks);
        self.expiries.push(now.saturating_add(duration));
    }

    /// Drop every entry whose expiry tick is not after `now`.
    ///
    /// Returns how many entries expired.
    pub fn expire(&mut self, now: Tick) -> u32 {
        let before = self.expiries.len();
        self.expiries.retain(|&tick| tick > now);
        let removed = (before - self.expiries.len()) as u32;
        self.stacks = self.stacks.saturating_sub(removed);
        removed
    }
}

/// Everything the duel tracks about one side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideState {
    pub fighter: Combatant,
    /// Cell on the distance line
    pub position: i32,
    /// Grapple footing, 0-100
    pub positioning: i32,
    pub breath: Option<i32>,
    pub bloodflow: Option<i32>,
    pub unconscious: bool,
    pub disarmed: Vec<WeaponSlot>,
    pub clearing: ClearingLedger,
    pub pending_grenade: Option<PendingGrenade>,
    pub hidden: bool,
    pub in_cover: bool,
    pub cover_percent: u8,
    pub skip_next_turn: bool,
    pub last_hit: Option<LastHit>,
}

impl SideState {
    fn new(fighter: Combatant) -> Self {
        Self {
            fighter,
            position: 0,
            positioning: POSITIONING_START,
            breath: None,
            bloodflow: None,
            unconscious: false,
            disarmed: Vec::new(),
            clearing: ClearingLedger::default(),
            pending_grenade: None,
            hidden: false,
            in_cover: false,
            cover_percent: 0,
            skip_next_turn: false,
            last_hit: None,
        }
    }

    /// Out by hit points or unconsciousness
    pub fn is_incapacitated(&self) -> bool {
        self.fighter.is_down() || self.unconscious
    }
}

#[derive(Debug)]
pub struct DuelState {
    pub id: DuelId,
    pub session: SessionKey,
    pub sides: [SideState; 2],
    pub phase: DuelPhase,
    pub turn: Side,
    pub round: u32,
    pub tick: Tick,
    pub grapple_flip: bool,
    pub range_idx: usize,
    pub battlefield: Battlefield,
    pub log: EventLog,
    pub odds_phrase: String,
    pub initiative_note: String,
    pub config: DuelConfig,
    pub last_activity: Instant,
    pub(crate) collaborators: Collaborators,
    pub(crate) rng: ChaCha8Rng,
}

impl DuelState {
    /// Set up a duel: hit points from stats, battlefield, odds, initiative.
    pub fn new(
        session: SessionKey,
        a: Combatant,
        b: Combatant,
        config: DuelConfig,
        collaborators: Collaborators,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if a.id == b.id {
            return Err(DuelError::SameCombatant(a.id));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let battlefield = Battlefield::generate(
            &mut rng,
            config.line_width as usize,
            config.cover_min,
            config.cover_max,
        );
        let log = EventLog::new(config.log_window, config.anim_frames.clone());

        let mut state = Self {
            id: DuelId::new(),
            session,
            sides: [SideState::new(a), SideState::new(b)],
            phase: DuelPhase::Ranged,
            turn: Side::A,
            round: 1,
            tick: 0,
            grapple_flip: false,
            range_idx: config.starting_gate.index(),
            battlefield,
            log,
            odds_phrase: String::new(),
            initiative_note: String::new(),
            config,
            last_activity: Instant::now(),
            collaborators,
            rng,
        };

        for side in Side::both() {
            let id = state.fighter(side).id;
            let hp = state.collaborators.attributes(id).hit_points.round_ties_even() as i32;
            state.fighter_mut(side).hp = hp.clamp(1, MAX_HIT_POINTS);
        }

        state.place_fighters();
        state.roll_odds();
        state.roll_initiative();

        tracing::info!(
            "Duel {} started: {} vs {} at {}",
            state.id,
            state.fighter(Side::A).name,
            state.fighter(Side::B).name,
            state.gate().name()
        );
        Ok(state)
    }

    /// Initial symmetric placement around the line's center
    fn place_fighters(&mut self) {
        let width = self.config.line_width;
        let gap = gap_for_gate(self.gate(), width);
        let left = ((width - gap) / 2 - 1).max(0);
        self.sides[0].position = left;
        self.sides[1].position = (left + gap).min(width - 1);
        self.refresh_cover();
    }

    fn roll_odds(&mut self) {
        let [a, b] = Side::both().map(|side| {
            let fighter = self.fighter(side);
            profile_score(&self.collaborators.attributes(fighter.id), fighter.hp)
        });
        let p_a = a / (a + b);
        self.odds_phrase = odds_phrase(
            p_a,
            &self.fighter(Side::A).name,
            &self.fighter(Side::B).name,
        );
    }

    // ---- accessors ----

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    pub fn fighter(&self, side: Side) -> &Combatant {
        &self.side(side).fighter
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.side_mut(side).fighter
    }

    /// Which side a combatant is on, if they are in this duel
    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        Side::both().into_iter().find(|&side| self.fighter(side).id == id)
    }

    pub fn gate(&self) -> RangeGate {
        RangeGate::of_index(self.range_idx)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, DuelPhase::Ended(_))
    }

    pub fn is_grappling(&self) -> bool {
        self.phase.is_grappling()
    }

    /// Who gets to act next: the finisher victor, else the turn owner
    pub fn acting_side(&self) -> Option<Side> {
        match self.phase {
            DuelPhase::Ended(_) => None,
            DuelPhase::Finisher { victor, .. } => Some(victor),
            _ => Some(self.turn),
        }
    }

    pub fn status(&self) -> DuelStatus {
        match &self.phase {
            DuelPhase::Ended(end) => DuelStatus::Ended(end.clone()),
            DuelPhase::Finisher { victor, target } => DuelStatus::Finisher {
                victor: self.fighter(*victor).id,
                target: self.fighter(*target).id,
            },
            _ => DuelStatus::Ongoing,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub(crate) fn record_hit(&mut self, target: Side, by: Side, kind: HitKind, weapon: &str) {
        self.side_mut(target).last_hit = Some(LastHit {
            by,
            kind,
            weapon: weapon.to_string(),
        });
    }

    // ---- extension hooks ----

    /// Make a weapon slot unusable for the rest of the duel
    pub fn disarm(&mut self, side: Side, slot: WeaponSlot) {
        let disarmed = &mut self.side_mut(side).disarmed;
        if !disarmed.contains(&slot) {
            disarmed.push(slot);
        }
    }

    /// The side loses its next turn
    pub fn stagger(&mut self, side: Side) {
        self.side_mut(side).skip_next_turn = true;
    }

    /// Hidden fighters cannot be hit
    pub fn set_hidden(&mut self, side: Side, hidden: bool) {
        self.side_mut(side).hidden = hidden;
    }

    pub fn add_clearing_stack(&mut self, side: Side, duration: Tick, attacks: u32) {
        let now = self.tick;
        self.side_mut(side).clearing.add(now, duration, attacks);
    }

    // ---- external finalization ----

    /// Force-end from outside. Returns false if already over.
    pub fn abort(&mut self) -> bool {
        self.finalize_externally(DuelEnd::Aborted, "⛔ Duel reset.")
    }

    /// Idle timeout from outside. Returns false if already over.
    pub fn time_out(&mut self) -> bool {
        self.finalize_externally(DuelEnd::TimedOut, "⏱️ Duel timed out due to inactivity.")
    }

    fn finalize_externally(&mut self, end: DuelEnd, line: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        self.log.push(line);
        tracing::info!("Duel {} finalized externally: {:?}", self.id, end);
        self.phase = DuelPhase::Ended(end);
        true
    }
}
