use thiserror::Error;

use crate::core::types::{CombatantId, SessionKey};
use crate::duel::{ActionKind, PhaseKind};

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Duel has ended")]
    DuelEnded,

    #[error("{0} is not part of this duel")]
    NotParticipant(CombatantId),

    #[error("{0} can't duel themselves")]
    SameCombatant(CombatantId),

    #[error("{0} is not computer-controlled")]
    NotAi(CombatantId),

    #[error("Not your turn: {actor} acted, {expected} is up")]
    NotYourTurn {
        actor: CombatantId,
        expected: CombatantId,
    },

    #[error("{action:?} is unavailable during the {phase:?} phase")]
    WrongPhase { action: ActionKind, phase: PhaseKind },

    #[error("Grapples can only start at Hands On range")]
    NotAtHands,

    #[error("Only the choker can act here")]
    NotChoker,

    #[error("Only the victor can choose")]
    NotVictor,

    #[error("There is already an active duel in session {0:?}")]
    SessionBusy(SessionKey),

    #[error("No duel in session {0:?}")]
    SessionNotFound(SessionKey),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DuelError>;
