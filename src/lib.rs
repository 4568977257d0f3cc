//! Lowlife Duel - turn-based one-on-one combat for the Lowlife chat game

pub mod core;
pub mod duel;
pub mod provider;
pub mod session;

pub use crate::core::{CombatantId, DuelConfig, DuelError, Result, SessionKey, Side};
pub use crate::duel::{Action, Combatant, DuelEnd, DuelState, DuelStatus, FinisherChoice};
pub use crate::session::DuelRegistry;
