//! Cover line and time of day
//!
//! Cover sits on the same cells as the distance line. A fighter standing
//! on a cover cell is harder to hit.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverKind {
    Barricade,
    Barrel,
    Door,
}

impl CoverKind {
    pub fn glyph(self) -> &'static str {
        match self {
            CoverKind::Barricade => "🚧",
            CoverKind::Barrel => "🛢️",
            CoverKind::Door => "🚪",
        }
    }
}

/// Barricades are twice as common as the rest
const COVER_POOL: [CoverKind; 4] = [
    CoverKind::Barricade,
    CoverKind::Barricade,
    CoverKind::Barrel,
    CoverKind::Door,
];

/// Placement attempts per cell before giving up on the target count
const ATTEMPTS_PER_CELL: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield {
    pub time: TimeOfDay,
    cells: Vec<Option<CoverKind>>,
}

impl Battlefield {
    /// Open ground, no cover
    pub fn open(width: usize, time: TimeOfDay) -> Self {
        Self {
            time,
            cells: vec![None; width],
        }
    }

    /// Scatter `min..=max` cover objects, never on neighbouring cells
    pub fn generate<R: Rng>(rng: &mut R, width: usize, min: usize, max: usize) -> Self {
        let time = if rng.gen_bool(0.5) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        };
        let mut field = Self::open(width, time);
        if width == 0 {
            return field;
        }

        let target = rng.gen_range(min..=max.max(min));
        let mut placed = 0;
        for _ in 0..width * ATTEMPTS_PER_CELL {
            if placed >= target {
                break;
            }
            let cell = rng.gen_range(0..width);
            if field.has_cover_near(cell) {
                continue;
            }
            let kind = *COVER_POOL.choose(rng).unwrap_or(&CoverKind::Barricade);
            field.cells[cell] = Some(kind);
            placed += 1;
        }
        field
    }

    fn has_cover_near(&self, cell: usize) -> bool {
        let lo = cell.saturating_sub(1);
        let hi = (cell + 1).min(self.cells.len() - 1);
        self.cells[lo..=hi].iter().any(Option::is_some)
    }

    /// Cover at a cell; off-line positions clamp to the ends
    pub fn cover_at(&self, position: i32) -> Option<CoverKind> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = position.clamp(0, self.cells.len() as i32 - 1) as usize;
        self.cells[idx]
    }

    pub fn place(&mut self, cell: usize, kind: Option<CoverKind>) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = kind;
        }
    }

    pub fn cells(&self) -> &[Option<CoverKind>] {
        &self.cells
    }

    pub fn cover_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_cover_is_never_adjacent() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let field = Battlefield::generate(&mut rng, 26, 5, 8);
            let count = field.cover_count();
            assert!((5..=8).contains(&count), "seed {} placed {}", seed, count);
            for pair in field.cells().windows(2) {
                assert!(!(pair[0].is_some() && pair[1].is_some()));
            }
        }
    }

    #[test]
    fn test_cover_lookup_clamps() {
        let mut field = Battlefield::open(10, TimeOfDay::Night);
        field.place(0, Some(CoverKind::Door));
        field.place(9, Some(CoverKind::Barrel));
        assert_eq!(field.cover_at(-4), Some(CoverKind::Door));
        assert_eq!(field.cover_at(42), Some(CoverKind::Barrel));
        assert_eq!(field.cover_at(5), None);
    }

    #[test]
    fn test_generation_is_seeded() {
        let a = Battlefield::generate(&mut ChaCha8Rng::seed_from_u64(7), 26, 5, 8);
        let b = Battlefield::generate(&mut ChaCha8Rng::seed_from_u64(7), 26, 5, 8);
        assert_eq!(a, b);
    }
}
