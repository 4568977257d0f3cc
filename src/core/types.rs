//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Chat-platform user id of a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u64);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for a duel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuelId(pub Uuid);

impl DuelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DuelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server/channel pair a duel lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub guild: u64,
    pub channel: u64,
}

impl SessionKey {
    pub fn new(guild: u64, channel: u64) -> Self {
        Self { guild, channel }
    }
}

/// Turn counter, incremented on every completed turn
pub type Tick = u64;

/// Which of the two duel slots a fighter occupies.
///
/// `A` always starts on the left of the distance line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Side::A
        } else {
            Side::B
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn both() -> [Side; 2] {
        [Side::A, Side::B]
    }
}

pub fn clamp_f(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

pub fn clamp_i(value: i32, lo: i32, hi: i32) -> i32 {
    value.max(lo).min(hi)
}
