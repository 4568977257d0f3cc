//! Range gates and the distance line
//!
//! Five discrete gates sit over a finer 1-D line of cells. Fine movement
//! on the line is the source of truth; the gate is derived from the gap.

use serde::{Deserialize, Serialize};

use crate::core::types::clamp_i;
use crate::duel::constants::MIN_EDGE_MARGIN;
use crate::provider::LoadoutRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeGate {
    /// 1-3m
    Hands,
    /// 4-10m
    Close,
    /// 11-30m
    Mid,
    /// 31-50m
    Far,
    /// 51m+
    VeryFar,
}

pub const GATE_COUNT: usize = 5;

impl RangeGate {
    pub const ORDER: [RangeGate; GATE_COUNT] = [
        RangeGate::Hands,
        RangeGate::Close,
        RangeGate::Mid,
        RangeGate::Far,
        RangeGate::VeryFar,
    ];

    /// Gate at an index; out-of-range indices clamp to the ends
    pub fn of_index(index: usize) -> Self {
        Self::ORDER[index.min(GATE_COUNT - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RangeGate::Hands => "Hands On",
            RangeGate::Close => "Close",
            RangeGate::Mid => "Mid",
            RangeGate::Far => "Far",
            RangeGate::VeryFar => "Very Far",
        }
    }

    /// Closed meter interval covered by this gate
    pub fn meters(self) -> (f64, f64) {
        match self {
            RangeGate::Hands => (1.0, 3.0),
            RangeGate::Close => (4.0, 10.0),
            RangeGate::Mid => (11.0, 30.0),
            RangeGate::Far => (31.0, 50.0),
            RangeGate::VeryFar => (51.0, 999.0),
        }
    }

    /// Representative distance for display, midpoint rounded half to even
    pub fn approx_meters(self) -> i32 {
        let (lo, hi) = self.meters();
        let hi = hi.min(lo + (hi - lo).max(2.0));
        ((lo + hi) / 2.0).round_ties_even() as i32
    }

    /// e.g. `Mid 11–30m (≈20m)`
    pub fn label(self) -> String {
        let (lo, hi) = self.meters();
        let hi_text = match self {
            RangeGate::VeryFar => "50m+".to_string(),
            _ => format!("{}m", hi as i32),
        };
        format!(
            "{} {}–{} (≈{}m)",
            self.name(),
            lo as i32,
            hi_text,
            self.approx_meters()
        )
    }

    pub fn loadout_range(self) -> LoadoutRange {
        match self {
            RangeGate::Hands | RangeGate::Close => LoadoutRange::Close,
            RangeGate::Mid => LoadoutRange::Mid,
            RangeGate::Far | RangeGate::VeryFar => LoadoutRange::Far,
        }
    }
}

/// Step a gate index by `delta`, clamped to valid gates
pub fn step_gate(current: usize, delta: i32) -> usize {
    clamp_i(current as i32 + delta, 0, GATE_COUNT as i32 - 1) as usize
}

/// Target cell separation for a gate on a line of `line_width` cells
pub fn gap_for_gate(gate: RangeGate, line_width: i32) -> i32 {
    let ratio = gate.index() as f64 / (GATE_COUNT - 1) as f64;
    let gap = (ratio * (line_width - 1) as f64).round_ties_even() as i32;
    clamp_i(gap, MIN_EDGE_MARGIN, line_width - MIN_EDGE_MARGIN)
}

/// Gate implied by an observed cell gap
pub fn gate_for_gap(gap: i32, line_width: i32) -> RangeGate {
    let ratio = gap.abs() as f64 / (line_width - 1).max(1) as f64;
    let index = (ratio * (GATE_COUNT - 1) as f64).round_ties_even() as i32;
    RangeGate::of_index(clamp_i(index, 0, GATE_COUNT as i32 - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_order() {
        assert!(RangeGate::Hands < RangeGate::Close);
        assert!(RangeGate::Far < RangeGate::VeryFar);
        assert_eq!(RangeGate::of_index(2), RangeGate::Mid);
        assert_eq!(RangeGate::of_index(99), RangeGate::VeryFar);
    }

    #[test]
    fn test_step_gate_clamps() {
        assert_eq!(step_gate(0, -1), 0);
        assert_eq!(step_gate(2, 1), 3);
        assert_eq!(step_gate(4, 3), 4);
    }

    #[test]
    fn test_gap_for_gate_default_line() {
        assert_eq!(gap_for_gate(RangeGate::Hands, 26), 3);
        assert_eq!(gap_for_gate(RangeGate::Close, 26), 6);
        // 12.5 rounds to even
        assert_eq!(gap_for_gate(RangeGate::Mid, 26), 12);
        assert_eq!(gap_for_gate(RangeGate::Far, 26), 19);
        assert_eq!(gap_for_gate(RangeGate::VeryFar, 26), 23);
    }

    #[test]
    fn test_gate_for_gap_recovers_hands() {
        assert_eq!(gate_for_gap(2, 26), RangeGate::Hands);
        assert_eq!(gate_for_gap(3, 26), RangeGate::Hands);
        assert_eq!(gate_for_gap(12, 26), RangeGate::Mid);
        assert_eq!(gate_for_gap(19, 26), RangeGate::Far);
    }

    #[test]
    fn test_loadout_coarsening() {
        assert_eq!(RangeGate::Hands.loadout_range(), LoadoutRange::Close);
        assert_eq!(RangeGate::Close.loadout_range(), LoadoutRange::Close);
        assert_eq!(RangeGate::Mid.loadout_range(), LoadoutRange::Mid);
        assert_eq!(RangeGate::VeryFar.loadout_range(), LoadoutRange::Far);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RangeGate::Hands.label(), "Hands On 1–3m (≈2m)");
        assert_eq!(RangeGate::Mid.label(), "Mid 11–30m (≈20m)");
        assert_eq!(RangeGate::Far.approx_meters(), 40);
        assert_eq!(RangeGate::VeryFar.label(), "Very Far 51–50m+ (≈525m)");
    }
}
