//! Duel configuration
//!
//! Layout and presentation knobs. The numbers that encode combat behavior
//! (probability curves, damage ranges, armor factors) are fixed in
//! `duel::constants` and are not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{DuelError, Result};
use crate::duel::{FinisherChoice, RangeGate};

/// Environment variable holding comma-separated log animation frames
pub const ANIM_FRAMES_ENV: &str = "LOWLIFE_ANIM_FRAMES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Number of cells on the distance line
    pub line_width: i32,

    /// How many recent log lines the visible window keeps
    pub log_window: usize,

    /// Range gate both fighters start at
    pub starting_gate: RangeGate,

    /// Cell separation forced while grappling
    pub grapple_gap: i32,

    /// Accuracy reduction (percent) against a fighter standing in cover
    pub cover_percent: u8,

    /// Fewest cover objects scattered on the line
    pub cover_min: usize,

    /// Most cover objects scattered on the line
    pub cover_max: usize,

    /// Frames rotated in front of decorated log lines
    pub anim_frames: Vec<String>,

    /// What a computer-controlled victor picks in the finisher phase
    pub ai_finisher: FinisherChoice,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            line_width: 26,
            log_window: 6,
            starting_gate: RangeGate::Mid,
            grapple_gap: 2,
            cover_percent: 40,
            cover_min: 5,
            cover_max: 8,
            anim_frames: ["◐", "◓", "◑", "◒"].iter().map(|s| s.to_string()).collect(),
            ai_finisher: FinisherChoice::Mercy,
        }
    }
}

impl DuelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.line_width < 8 {
            return Err(DuelError::InvalidConfig(format!(
                "line_width ({}) must be at least 8",
                self.line_width
            )));
        }

        if self.log_window == 0 {
            return Err(DuelError::InvalidConfig("log_window must be positive".into()));
        }

        if self.grapple_gap < 1 || self.grapple_gap >= self.line_width {
            return Err(DuelError::InvalidConfig(format!(
                "grapple_gap ({}) must be within 1..{}",
                self.grapple_gap, self.line_width
            )));
        }

        if self.cover_percent > 100 {
            return Err(DuelError::InvalidConfig(format!(
                "cover_percent ({}) exceeds 100",
                self.cover_percent
            )));
        }

        if self.cover_min > self.cover_max {
            return Err(DuelError::InvalidConfig(format!(
                "cover_min ({}) should be <= cover_max ({})",
                self.cover_min, self.cover_max
            )));
        }

        Ok(())
    }

    /// Apply `LOWLIFE_ANIM_FRAMES` if it is set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(ANIM_FRAMES_ENV) {
            self.anim_frames = parse_frames(&raw);
        }
        self
    }
}

fn parse_frames(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load and validate a config from a TOML file
pub fn load_config(path: &Path) -> Result<DuelConfig> {
    let contents = fs::read_to_string(path)?;
    let config: DuelConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
