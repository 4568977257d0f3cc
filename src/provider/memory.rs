//! In-memory roster used by the runner binary and tests

use ahash::AHashMap;
use std::sync::Mutex;

use crate::core::types::CombatantId;
use crate::provider::{
    BaseAttributes, CaptureSink, CombatKit, LoadoutProvider, ProviderError, StatsProvider,
};

/// A captured hostage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub victor: CombatantId,
    pub target: CombatantId,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct Roster {
    attributes: AHashMap<CombatantId, BaseAttributes>,
    kits: AHashMap<CombatantId, CombatKit>,
    captures: Mutex<Vec<Capture>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fighter(mut self, id: CombatantId, attributes: BaseAttributes, kit: CombatKit) -> Self {
        self.attributes.insert(id, attributes);
        self.kits.insert(id, kit);
        self
    }

    pub fn captures(&self) -> Vec<Capture> {
        self.captures
            .lock()
            .map(|captures| captures.clone())
            .unwrap_or_default()
    }
}

impl StatsProvider for Roster {
    fn base_attributes(&self, id: CombatantId) -> Result<BaseAttributes, ProviderError> {
        self.attributes
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::Unknown(id))
    }
}

impl LoadoutProvider for Roster {
    fn combat_kit(&self, id: CombatantId) -> Result<CombatKit, ProviderError> {
        self.kits
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::Unknown(id))
    }
}

impl CaptureSink for Roster {
    fn capture(
        &self,
        victor: CombatantId,
        target: CombatantId,
        target_name: &str,
    ) -> Result<bool, ProviderError> {
        let mut captures = self
            .captures
            .lock()
            .map_err(|_| ProviderError::Unavailable("capture ledger poisoned".into()))?;
        captures.push(Capture {
            victor,
            target,
            label: format!("Hostage: {}", target_name),
        });
        Ok(true)
    }
}
