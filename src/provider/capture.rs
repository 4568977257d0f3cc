//! Hostage hand-off for the kidnap finisher

use crate::core::types::CombatantId;
use crate::provider::ProviderError;

/// Receives the capture token when a victor kidnaps their opponent.
///
/// `Ok(true)` means the token was stored, `Ok(false)` that no inventory
/// is wired up.
pub trait CaptureSink: Send + Sync {
    fn capture(
        &self,
        victor: CombatantId,
        target: CombatantId,
        target_name: &str,
    ) -> Result<bool, ProviderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl CaptureSink for NoCapture {
    fn capture(
        &self,
        _victor: CombatantId,
        _target: CombatantId,
        _target_name: &str,
    ) -> Result<bool, ProviderError> {
        Ok(false)
    }
}
