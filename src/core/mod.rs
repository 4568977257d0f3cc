pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, DuelConfig};
pub use error::{DuelError, Result};
pub use types::{CombatantId, DuelId, SessionKey, Side, Tick};
