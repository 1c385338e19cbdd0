/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Seeded random map generation.

use rand::{Rng as _, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Cell, FrozenLake, FrozenLakeError, Grid, Rng, Tile};

/// Each placement may make this many draws per grid tile before giving up.
pub const MAX_PLACEMENT_ATTEMPTS_PER_TILE: usize = 64;

/// Parameters of a random map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// The grid is `size` x `size`.
    pub size: usize,

    /// Probability that a tile is frozen rather than a hole.
    pub p_frozen: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 100,
            p_frozen: 0.92,
        }
    }
}

/// Generate a random square map.
///
/// Every tile is independently frozen with probability `p_frozen`. Start and goal are then drawn
/// uniformly from the frozen tiles, redrawing the goal until it differs from the start. The same
/// `seed` always produces the same map.
///
/// Fails instead of looping forever when there are fewer than two frozen tiles.
pub fn generate(config: &MapConfig, seed: u64) -> Result<FrozenLake, FrozenLakeError> {
    let size = config.size;
    if size == 0 {
        return Err(FrozenLakeError::InvalidSize);
    }
    if !(0.0..=1.0).contains(&config.p_frozen) {
        return Err(FrozenLakeError::InvalidProbability(config.p_frozen));
    }

    let mut rng = Rng::seed_from_u64(seed);
    let tiles = (0..size * size)
        .map(|_| {
            if rng.gen::<f64>() < config.p_frozen {
                Tile::Frozen
            } else {
                Tile::Hole
            }
        })
        .collect();
    let mut grid = Grid::from_tiles(size, size, tiles)?;

    let passable = grid.passable_count();
    if passable < 2 {
        return Err(FrozenLakeError::NotEnoughPassableCells(passable));
    }

    let max_attempts = grid.area().saturating_mul(MAX_PLACEMENT_ATTEMPTS_PER_TILE);
    let start = sample_frozen(&grid, &mut rng, None, Tile::Start, max_attempts)?;
    let goal = sample_frozen(&grid, &mut rng, Some(start), Tile::Goal, max_attempts)?;
    grid.set(start, Tile::Start);
    grid.set(goal, Tile::Goal);

    Ok(FrozenLake::from_generated(grid, start, goal, seed))
}

// Rejection sampling over uniformly drawn (row, col) pairs.
fn sample_frozen(
    grid: &Grid,
    rng: &mut Rng,
    exclude: Option<Cell>,
    tile: Tile,
    max_attempts: usize,
) -> Result<Cell, FrozenLakeError> {
    for _ in 0..max_attempts {
        let cell = Cell::new(rng.gen_range(0..grid.height()), rng.gen_range(0..grid.width()));
        if grid.get(cell) == Some(Tile::Frozen) && Some(cell) != exclude {
            return Ok(cell);
        }
    }
    Err(FrozenLakeError::PlacementAttemptsExhausted {
        tile,
        attempts: max_attempts,
    })
}
