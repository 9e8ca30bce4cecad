#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded board generation for Escape Room.
//!
//! Every wall, trap, and prize picks its cell independently and uniformly, so
//! entities may overlap and a trap may hide a prize. Layouts are not checked
//! for solvability.

use escape_room_core::{
    BoardLayout, CellCoord, FinishSide, GridGeometry, WallOrientation, WallPlacement,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of walls placed on a default board.
pub const DEFAULT_WALLS: u32 = 20;
/// Number of traps placed on a default board.
pub const DEFAULT_TRAPS: u32 = 8;
/// Number of prizes placed on a default board.
pub const DEFAULT_PRIZES: u32 = 3;

/// Configuration parameters required to construct the board generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    walls: u32,
    traps: u32,
    prizes: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with explicit entity counts and seed.
    #[must_use]
    pub const fn new(walls: u32, traps: u32, prizes: u32, rng_seed: u64) -> Self {
        Self {
            walls,
            traps,
            prizes,
            rng_seed,
        }
    }

    /// Creates the default 20 wall, 8 trap, 3 prize configuration.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self::new(DEFAULT_WALLS, DEFAULT_TRAPS, DEFAULT_PRIZES, rng_seed)
    }

    /// Number of walls placed per board.
    #[must_use]
    pub const fn walls(&self) -> u32 {
        self.walls
    }

    /// Number of traps placed per board.
    #[must_use]
    pub const fn traps(&self) -> u32 {
        self.traps
    }

    /// Number of prizes placed per board.
    #[must_use]
    pub const fn prizes(&self) -> u32 {
        self.prizes
    }

    /// Seed feeding the generator's random stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Pure system that produces board layouts and exit sides.
#[derive(Debug)]
pub struct BoardGenerator {
    config: Config,
    rng: ChaCha8Rng,
}

impl BoardGenerator {
    /// Creates a generator whose output is fully determined by the config.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Draws a new layout. Traps are placed first, then prizes, then walls.
    pub fn generate(&mut self, geometry: &GridGeometry) -> BoardLayout {
        let traps = (0..self.config.traps)
            .map(|_| self.random_cell(geometry))
            .collect();
        let prizes = (0..self.config.prizes)
            .map(|_| self.random_cell(geometry))
            .collect();
        let walls = (0..self.config.walls)
            .map(|_| {
                let cell = self.random_cell(geometry);
                let orientation = if self.rng.gen_bool(0.5) {
                    WallOrientation::Vertical
                } else {
                    WallOrientation::Horizontal
                };
                WallPlacement { cell, orientation }
            })
            .collect();

        let layout = BoardLayout {
            walls,
            traps,
            prizes,
        };
        log::debug!("generated layout {layout:?}");
        layout
    }

    /// Picks the exit side with equal probability.
    pub fn roll_finish_side(&mut self) -> FinishSide {
        if self.rng.gen_bool(0.5) {
            FinishSide::Top
        } else {
            FinishSide::Bottom
        }
    }

    fn random_cell(&mut self, geometry: &GridGeometry) -> CellCoord {
        let row = self.rng.gen_range(0..geometry.rows());
        let column = self.rng.gen_range(0..geometry.columns());
        CellCoord::new(column, row)
    }
}
