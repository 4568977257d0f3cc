//! Session registry
//!
//! One live duel per (guild, channel). Duels are independent of each
//! other; the registry only owns them and seeds their RNGs.

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

use crate::core::config::DuelConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::{CombatantId, SessionKey};
use crate::duel::{Action, Combatant, DuelState, DuelStatus};
use crate::provider::Collaborators;

/// Base of the synthetic id space used for AI defenders
pub const AI_ID_BASE: u64 = 10_000_000_000;
pub const AI_DEFENDER_NAME: &str = "AI Defender";

/// Stable AI opponent id for a challenging user
pub fn ai_defender_id(user: CombatantId) -> CombatantId {
    CombatantId(AI_ID_BASE + user.0 % 1_000_000_000)
}

pub struct DuelRegistry {
    duels: AHashMap<SessionKey, DuelState>,
    config: DuelConfig,
    collaborators: Collaborators,
    rng: ChaCha8Rng,
}

impl DuelRegistry {
    pub fn new(config: DuelConfig, collaborators: Collaborators, seed: u64) -> Self {
        Self {
            duels: AHashMap::new(),
            config,
            collaborators,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.duels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.duels.is_empty()
    }

    /// Start a duel between two fighters in `key`.
    ///
    /// A finished duel still parked in the slot is replaced.
    pub fn start(&mut self, key: SessionKey, a: Combatant, b: Combatant) -> Result<&mut DuelState> {
        if self.duels.get(&key).is_some_and(DuelState::is_active) {
            return Err(DuelError::SessionBusy(key));
        }
        let seed = self.rng.gen::<u64>();
        let state = DuelState::new(
            key,
            a,
            b,
            self.config.clone(),
            self.collaborators.clone(),
            seed,
        )?;
        tracing::debug!("Session {:?} now hosts duel {}", key, state.id);
        self.duels.insert(key, state);
        self.get_mut(key).ok_or(DuelError::SessionNotFound(key))
    }

    /// Challenge the house AI. If the AI wins initiative it opens at once.
    pub fn start_vs_ai(
        &mut self,
        key: SessionKey,
        user: CombatantId,
        name: impl Into<String>,
    ) -> Result<&mut DuelState> {
        let human = Combatant::new(user, name);
        let ai = Combatant::ai(ai_defender_id(user), AI_DEFENDER_NAME);
        let state = self.start(key, human, ai)?;
        state.settle_ai();
        Ok(state)
    }

    pub fn get(&self, key: SessionKey) -> Option<&DuelState> {
        self.duels.get(&key)
    }

    pub fn get_mut(&mut self, key: SessionKey) -> Option<&mut DuelState> {
        self.duels.get_mut(&key)
    }

    /// Route an action to the duel in `key`
    pub fn act(&mut self, key: SessionKey, actor: CombatantId, action: Action) -> Result<DuelStatus> {
        self.get_mut(key)
            .ok_or(DuelError::SessionNotFound(key))?
            .act(actor, action)
    }

    /// Abort and drop the duel in `key`
    pub fn reset(&mut self, key: SessionKey) -> Result<DuelState> {
        let mut state = self.duels.remove(&key).ok_or(DuelError::SessionNotFound(key))?;
        state.abort();
        Ok(state)
    }

    /// Remove every duel that is over and hand them back
    pub fn retire_finished(&mut self) -> Vec<DuelState> {
        let done: Vec<SessionKey> = self
            .duels
            .iter()
            .filter(|(_, state)| !state.is_active())
            .map(|(key, _)| *key)
            .collect();
        done.into_iter()
            .filter_map(|key| self.duels.remove(&key))
            .collect()
    }

    /// Time out and remove duels idle for at least `timeout`
    pub fn expire_idle(&mut self, now: Instant, timeout: Duration) -> Vec<SessionKey> {
        let stale: Vec<SessionKey> = self
            .duels
            .iter()
            .filter(|(_, state)| {
                state.is_active() && now.saturating_duration_since(state.last_activity) >= timeout
            })
            .map(|(key, _)| *key)
            .collect();
        for key in &stale {
            if let Some(mut state) = self.duels.remove(key) {
                state.time_out();
                tracing::info!("Duel {} in {:?} expired after inactivity", state.id, key);
            }
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::DuelEnd;

    fn registry() -> DuelRegistry {
        DuelRegistry::new(DuelConfig::default(), Collaborators::default(), 7)
    }

    fn pair() -> (Combatant, Combatant) {
        (
            Combatant::new(CombatantId(1), "Rook"),
            Combatant::new(CombatantId(2), "Vex"),
        )
    }

    #[test]
    fn test_ai_defender_id() {
        assert_eq!(ai_defender_id(CombatantId(42)), CombatantId(10_000_000_042));
        assert_eq!(
            ai_defender_id(CombatantId(3_000_000_005)),
            CombatantId(10_000_000_005)
        );
    }

    #[test]
    fn test_one_active_duel_per_session() {
        let mut reg = registry();
        let key = SessionKey::new(1, 1);
        let (a, b) = pair();
        reg.start(key, a.clone(), b.clone()).unwrap();
        assert!(matches!(reg.start(key, a.clone(), b.clone()), Err(DuelError::SessionBusy(_))));
        // Another channel is independent
        assert!(reg.start(SessionKey::new(1, 2), a, b).is_ok());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_same_fighter_rejected() {
        let mut reg = registry();
        let a = Combatant::new(CombatantId(1), "Rook");
        let err = reg.start(SessionKey::new(1, 1), a.clone(), a).err().unwrap();
        assert!(matches!(err, DuelError::SameCombatant(CombatantId(1))));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_vs_ai_waits_on_human() {
        let mut reg = registry();
        let key = SessionKey::new(9, 9);
        let state = reg.start_vs_ai(key, CombatantId(5), "Rook").unwrap();
        assert!(state.fighter(state.side_of(ai_defender_id(CombatantId(5))).unwrap()).is_ai);
        assert!(!state.is_active() || !state.fighter(state.turn).is_ai);
    }

    #[test]
    fn test_unknown_session() {
        let mut reg = registry();
        let key = SessionKey::new(3, 3);
        assert!(matches!(
            reg.act(key, CombatantId(1), Action::Advance),
            Err(DuelError::SessionNotFound(_))
        ));
        assert!(reg.reset(key).is_err());
    }

    #[test]
    fn test_reset_aborts_and_removes() {
        let mut reg = registry();
        let key = SessionKey::new(1, 1);
        let (a, b) = pair();
        reg.start(key, a, b).unwrap();
        let state = reg.reset(key).unwrap();
        assert_eq!(state.phase, crate::duel::DuelPhase::Ended(DuelEnd::Aborted));
        assert!(reg.get(key).is_none());
    }

    #[test]
    fn test_retire_finished_keeps_live_duels() {
        let mut reg = registry();
        let (a, b) = pair();
        reg.start(SessionKey::new(1, 1), a.clone(), b.clone()).unwrap();
        reg.start(SessionKey::new(1, 2), a, b).unwrap();
        reg.get_mut(SessionKey::new(1, 1)).unwrap().abort();
        let retired = reg.retire_finished();
        assert_eq!(retired.len(), 1);
        assert_eq!(reg.len(), 1);
        assert!(reg.get(SessionKey::new(1, 2)).is_some());
    }

    #[test]
    fn test_expire_idle() {
        let mut reg = registry();
        let key = SessionKey::new(1, 1);
        let (a, b) = pair();
        reg.start(key, a, b).unwrap();
        let now = Instant::now();
        assert!(reg.expire_idle(now, Duration::from_secs(300)).is_empty());
        let later = now + Duration::from_secs(301);
        assert_eq!(reg.expire_idle(later, Duration::from_secs(300)), vec![key]);
        assert!(reg.is_empty());
    }
}
