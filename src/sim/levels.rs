//! Level catalog
//!
//! Thirty levels, generated once at startup. Speeds and pickup chance follow
//! closed-form curves; brick layouts come from one generator per level.
//!
//! Layout generators are tiered by the strength cap (`max_strength`). Within
//! the run the total number of hits needed to clear a level never decreases,
//! whatever the random draws: randomized levels only fill cells that the next
//! deterministic layout already requires.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::{BRICK_COLS, BRICK_ROWS, LEVEL_COUNT};

/// Brick strengths by row then column (0 = empty)
pub type BrickGrid = [[u8; BRICK_COLS]; BRICK_ROWS];

/// Static parameters for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number
    pub index: u32,
    pub ball_speed: f32,
    pub paddle_speed: f32,
    /// Highest strength any brick may have on this level
    pub max_strength: u8,
    /// Probability that a destroyed brick drops a pickup
    pub powerup_chance: f32,
    pub brick_grid: BrickGrid,
}

impl LevelConfig {
    /// Total ball hits needed to clear every brick
    pub fn total_strength(&self) -> u32 {
        self.brick_grid
            .iter()
            .flatten()
            .map(|&s| u32::from(s))
            .sum()
    }

    /// Number of non-empty cells
    pub fn brick_count(&self) -> usize {
        self.brick_grid.iter().flatten().filter(|&&s| s > 0).count()
    }
}

/// Ball speed (units per tick) for a 1-based level
pub fn ball_speed(level: u32) -> f32 {
    4.0 + (level.saturating_sub(1)) as f32 * 0.2
}

/// Paddle speed (units per tick) for a 1-based level
pub fn paddle_speed(level: u32) -> f32 {
    8.0 + (level.saturating_sub(1)) as f32 * 0.1
}

/// Brick strength cap: 1 for levels 1-5, 2 for 6-10, 3 afterwards
pub fn max_strength(level: u32) -> u8 {
    (1 + level.saturating_sub(1) / 5).min(3) as u8
}

/// Pickup drop probability, 0.05 rising to a 0.1 cap
pub fn powerup_chance(level: u32) -> f32 {
    (0.05 + (level.saturating_sub(1)) as f32 * 0.001).min(0.1)
}

/// All level configurations for a run
///
/// Fixed-size so a catalog (freshly generated or deserialized) always holds
/// every level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: [LevelConfig; LEVEL_COUNT as usize],
}

impl LevelCatalog {
    /// Generate every level, drawing randomized layouts from `rng`
    pub fn generate(rng: &mut impl RandomSource) -> Self {
        let levels = std::array::from_fn(|i| {
            let index = i as u32 + 1;
            let cap = max_strength(index);
            let mut brick_grid = pattern(index, rng);
            for cell in brick_grid.iter_mut().flatten() {
                *cell = (*cell).min(cap);
            }
            LevelConfig {
                index,
                ball_speed: ball_speed(index),
                paddle_speed: paddle_speed(index),
                max_strength: cap,
                powerup_chance: powerup_chance(index),
                brick_grid,
            }
        });
        Self { levels }
    }

    /// Configuration for a 1-based level; out-of-range indices clamp into `1..=30`
    pub fn config(&self, level: u32) -> &LevelConfig {
        let idx = level.clamp(1, LEVEL_COUNT) as usize - 1;
        &self.levels[idx]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

/// Cells eligible for a random +1 and the per-cell probability
type Bump = Option<(fn(usize, usize) -> bool, f32)>;

/// Sine checkerboard used by several layouts
fn sine_cell(row: usize, col: usize) -> bool {
    ((row * col) as f64).sin() > 0.0
}

/// Fill a grid from a deterministic base plus optional Bernoulli bumps
///
/// Cells where `bump` returns true gain one strength with probability `density`.
fn build(
    rng: &mut impl RandomSource,
    base: impl Fn(usize, usize) -> u8,
    bump: Bump,
) -> BrickGrid {
    let mut grid = [[0u8; BRICK_COLS]; BRICK_ROWS];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let mut value = base(row, col);
            if let Some((mask, density)) = bump
                && mask(row, col)
                && rng.chance(density)
            {
                value += 1;
            }
            *cell = value;
        }
    }
    grid
}

/// Random bump mask and its per-cell density
fn bumps(mask: fn(usize, usize) -> bool, density: f32) -> Bump {
    Some((mask, density))
}

/// Raw (uncapped) layout for a level
fn pattern(level: u32, rng: &mut impl RandomSource) -> BrickGrid {
    let flag = |b: bool| u8::from(b);
    match level {
        // Levels 1-5: single hit bricks, growing coverage
        1 => build(rng, |r, _| flag(r < 3), None),
        2 => build(rng, |r, c| flag(r < 3 || (r == 3 && (r + c) % 2 == 0)), None),
        3 => build(rng, |r, _| flag(r < 4), None),
        4 => build(rng, |r, _| flag(r < 4), bumps(|r: usize, _: usize| r == 4, 0.5)),
        5 => build(rng, |_, _| 1, None),

        // Levels 6-10: two hit bricks appear
        6 => build(rng, |r, _| 1 + flag(r == 0), None),
        7 => build(rng, |r, c| 1 + flag(sine_cell(r, c)), None),
        8 => build(rng, |r, c| 1 + flag((r + c) % 2 == 0), None),
        9 => build(rng, |r, _| 1 + flag(r % 2 == 0), None),
        10 => build(rng, |r, _| 1 + flag(r % 2 == 0), bumps(|r: usize, _: usize| r % 2 == 1, 0.6)),

        // Levels 11-15: three hit bricks scattered over a two hit floor
        11 => build(rng, |r, _| 2 + flag(r == 0), None),
        12 => build(rng, |r, c| 2 + flag((r * c) % 3 == 1), None),
        13 => build(rng, |r, c| 2 + flag((r + c) % 3 == 0), None),
        14 => build(rng, |r, c| 2 + flag(sine_cell(r, c)), None),
        15 => build(
            rng,
            |r, c| 2 + flag(sine_cell(r, c)),
            bumps(|r: usize, c: usize| r == 0 && c < 3, 0.65),
        ),

        // Levels 16-20: half the wall is armored
        16 => build(rng, |r, c| 2 + flag((r + c) % 2 == 0), None),
        17 => build(rng, |r, c| 2 + flag(sine_cell(r, c) || r == 0), None),
        18 => build(rng, |r, _| 2 + flag(r % 2 == 0), None),
        19 => build(rng, |r, c| 2 + flag((r * c) % 2 == 0), None),
        20 => build(
            rng,
            |r, c| 2 + flag((r * c) % 2 == 0),
            bumps(|r: usize, _: usize| r == 1, 0.7),
        ),

        // Levels 21-30: nearly solid three hit walls with shrinking gaps
        21 => build(rng, |r, c| 2 + flag((r * c) % 2 == 0 || r == 1), None),
        22 => build(rng, |r, c| 3 - flag((r * c) % 4 == 3), None),
        23 => build(
            rng,
            |r, c| 3 - flag((r * c) % 4 == 3),
            bumps(|r: usize, c: usize| (r * c) % 8 == 7, 0.8),
        ),
        24 => build(rng, |r, c| 3 - flag((r * c) % 8 == 7), None),
        25 => build(rng, |r, c| 3 - flag(r == 4 && c % 4 == 1), None),
        26 => build(
            rng,
            |r, c| 3 - flag(r == 4 && c % 4 == 1),
            bumps(|r: usize, c: usize| r == 4 && c == 1, 0.9),
        ),
        27 => build(rng, |r, c| 3 - flag(r == 4 && c == 3), None),
        28 => build(rng, |r, c| 3 - flag(r == 0 && c == 0), None),
        29 => build(
            rng,
            |r, c| 3 - flag(r == 0 && c == 0),
            bumps(|_: usize, _: usize| true, 0.95),
        ),
        _ => build(rng, |_, _| 3, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SeededRng};
    use proptest::prelude::*;

    #[test]
    fn test_deserialized_catalog_is_never_short() {
        let catalog = LevelCatalog::generate(&mut SeededRng::new(4));
        let json = serde_json::to_value(&catalog).unwrap();
        let back: LevelCatalog = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back.config(0).index, 1);
        assert_eq!(back.config(99).index, 30);

        // An empty level list is rejected at load time instead of panicking on lookup
        let mut empty = json;
        empty["levels"] = serde_json::json!([]);
        assert!(serde_json::from_value::<LevelCatalog>(empty).is_err());
    }

    #[test]
    fn test_catalog_has_all_levels() {
        let catalog = LevelCatalog::generate(&mut SeededRng::new(1));
        assert_eq!(catalog.len(), LEVEL_COUNT as usize);
        for (i, level) in catalog.iter().enumerate() {
            assert_eq!(level.index, i as u32 + 1);
            assert!(level.brick_count() > 0, "level {} is empty", level.index);
        }
    }

    #[test]
    fn test_curves() {
        assert_eq!(ball_speed(1), 4.0);
        assert!((ball_speed(30) - 9.8).abs() < 1e-4);
        assert_eq!(paddle_speed(1), 8.0);
        assert!((paddle_speed(30) - 10.9).abs() < 1e-4);
        assert_eq!(max_strength(1), 1);
        assert_eq!(max_strength(5), 1);
        assert_eq!(max_strength(6), 2);
        assert_eq!(max_strength(11), 3);
        assert_eq!(max_strength(30), 3);
        assert_eq!(powerup_chance(1), 0.05);
        assert!((powerup_chance(30) - 0.079).abs() < 1e-4);
    }

    #[test]
    fn test_speeds_monotonic() {
        let catalog = LevelCatalog::generate(&mut SeededRng::new(3));
        let levels: Vec<_> = catalog.iter().collect();
        for pair in levels.windows(2) {
            assert!(pair[1].ball_speed >= pair[0].ball_speed);
            assert!(pair[1].paddle_speed >= pair[0].paddle_speed);
            assert!(pair[1].max_strength >= pair[0].max_strength);
        }
        for level in &levels {
            assert!((0.05..=0.1).contains(&level.powerup_chance));
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        let catalog = LevelCatalog::generate(&mut SeededRng::new(3));
        assert_eq!(catalog.config(0).index, 1);
        assert_eq!(catalog.config(31).index, 30);
        assert_eq!(catalog.config(999).index, 30);
    }

    #[test]
    fn test_extreme_draws_keep_progression() {
        // Every bump taken, and none taken
        for sample in [0.0, 0.999] {
            let catalog = LevelCatalog::generate(&mut ScriptedRng::constant(sample));
            let totals: Vec<u32> = catalog.iter().map(LevelConfig::total_strength).collect();
            for pair in totals.windows(2) {
                assert!(pair[1] >= pair[0], "totals not monotonic: {totals:?}");
            }
        }
    }

    #[test]
    fn test_first_and_last_layouts() {
        let catalog = LevelCatalog::generate(&mut SeededRng::new(9));
        assert_eq!(catalog.config(1).total_strength(), 24);
        assert_eq!(catalog.config(5).total_strength(), 40);
        assert_eq!(catalog.config(30).total_strength(), 120);
    }

    proptest! {
        #[test]
        fn prop_strength_within_cap(seed in any::<u64>()) {
            let catalog = LevelCatalog::generate(&mut SeededRng::new(seed));
            for level in catalog.iter() {
                for &cell in level.brick_grid.iter().flatten() {
                    prop_assert!(cell <= level.max_strength);
                }
            }
        }

        #[test]
        fn prop_difficulty_non_decreasing(seed in any::<u64>()) {
            let catalog = LevelCatalog::generate(&mut SeededRng::new(seed));
            let levels: Vec<_> = catalog.iter().collect();
            for pair in levels.windows(2) {
                prop_assert!(pair[1].total_strength() >= pair[0].total_strength());
            }
        }
    }
}
