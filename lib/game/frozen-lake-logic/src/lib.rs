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

#![warn(missing_docs)]

//! Frozen Lake grid-world logic.
//!
//! A frozen lake is a square grid of frozen (walkable) tiles and holes. An agent starts on the
//! start tile and has to walk to the goal tile using the four moves Left, Down, Right and Up.
//! This crate holds the grid, the moves and their costs, and a seeded random map generator. It
//! knows nothing about search; see the `graph-search` crate for that.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod cost;
pub mod generator;

pub use cost::{actions_cost, heuristic, step_cost, Cost, CostMode};
pub use generator::{generate, MapConfig};

/// Random number generator used for map generation.
pub type Rng = rand_pcg::Pcg64;

/// Frozen Lake error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrozenLakeError {
    /// Grid size must be at least one.
    #[error("grid size must be positive")]
    InvalidSize,

    /// The probability of a tile being frozen must be in [0, 1].
    #[error("frozen tile probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Start and goal need two distinct passable cells.
    #[error("need at least two passable cells to place start and goal, found {0}")]
    NotEnoughPassableCells(usize),

    /// Random placement of a tile kept landing on unusable cells.
    #[error("could not place the {tile} tile after {attempts} attempts")]
    PlacementAttemptsExhausted {
        /// The tile being placed.
        tile: Tile,
        /// How many draws were made.
        attempts: usize,
    },

    /// Character that isn't one of `F`, `H`, `S`, `G`.
    #[error("unknown tile character: {0:?}")]
    UnknownTile(char),

    /// Grid text has no rows.
    #[error("grid has no rows")]
    EmptyGrid,

    /// All rows of a grid must have the same width.
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        /// Row index.
        row: usize,
        /// Width of this row.
        found: usize,
        /// Width of the first row.
        expected: usize,
    },

    /// Number of tiles does not match the grid dimensions.
    #[error("expected {expected} tiles, got {found}")]
    TileCountMismatch {
        /// width * height.
        expected: usize,
        /// Tiles supplied.
        found: usize,
    },

    /// A map needs exactly one start and one goal.
    #[error("grid has no {0} tile")]
    MissingTile(Tile),

    /// A map needs exactly one start and one goal.
    #[error("grid has more than one {0} tile")]
    DuplicateTile(Tile),
}

/// Kind of a single grid tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable ice.
    Frozen,

    /// Impassable hole.
    Hole,

    /// Where the agent starts. Walkable.
    Start,

    /// Where the agent wants to go. Walkable.
    Goal,
}

impl Tile {
    /// Whether an agent may stand on this tile.
    pub fn is_passable(self) -> bool {
        self != Tile::Hole
    }

    /// Single character used in the text form of a grid.
    pub fn as_char(self) -> char {
        match self {
            Tile::Frozen => 'F',
            Tile::Hole => 'H',
            Tile::Start => 'S',
            Tile::Goal => 'G',
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = FrozenLakeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'F' => Ok(Tile::Frozen),
            'H' => Ok(Tile::Hole),
            'S' => Ok(Tile::Start),
            'G' => Ok(Tile::Goal),
            other => Err(FrozenLakeError::UnknownTile(other)),
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Frozen => write!(f, "frozen"),
            Tile::Hole => write!(f, "hole"),
            Tile::Start => write!(f, "start"),
            Tile::Goal => write!(f, "goal"),
        }
    }
}

/// A `(row, col)` coordinate. Row 0 is the top row, col 0 the leftmost column.
///
/// Cells order by row first and then column, which search algorithms use to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index.
    pub row: usize,

    /// Column index.
    pub col: usize,
}

impl Cell {
    /// Create a new cell.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one move away in the direction of `action`, or `None` if that would go below row
    /// or column zero. The upper bounds are not checked here; see [`Grid::in_bounds`].
    pub fn step(self, action: Action) -> Option<Cell> {
        let (d_row, d_col) = action.delta();
        Some(Cell {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Column - 1.
    Left,

    /// Row + 1.
    Down,

    /// Column + 1.
    Right,

    /// Row - 1.
    Up,
}

impl Action {
    /// All actions, in the fixed order that neighbors are enumerated in. Depth-first searches
    /// depend on this order, so changing it changes their results.
    pub const ALL: [Action; 4] = [Action::Left, Action::Down, Action::Right, Action::Up];

    /// `(d_row, d_col)` applied to a cell by this action.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Left => (0, -1),
            Action::Down => (1, 0),
            Action::Right => (0, 1),
            Action::Up => (-1, 0),
        }
    }

    /// Numeric code of the action: 0 = Left, 1 = Down, 2 = Right, 3 = Up.
    pub fn code(self) -> u8 {
        match self {
            Action::Left => 0,
            Action::Down => 1,
            Action::Right => 2,
            Action::Up => 3,
        }
    }

    /// Whether the action moves along a row.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Action::Left | Action::Right)
    }

    /// The action whose delta is exactly `(d_row, d_col)`, if any.
    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| action.delta() == (d_row, d_col))
    }

    /// The action that moves from `from` to `to`, if the two cells are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Action> {
        let d_row = isize::try_from(to.row).ok()? - isize::try_from(from.row).ok()?;
        let d_col = isize::try_from(to.col).ok()? - isize::try_from(from.col).ok()?;
        Action::from_delta(d_row, d_col)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Left => write!(f, "Left"),
            Action::Down => write!(f, "Down"),
            Action::Right => write!(f, "Right"),
            Action::Up => write!(f, "Up"),
        }
    }
}

/// An immutable rectangular grid of tiles, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid from row-major tiles.
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
    ) -> Result<Self, FrozenLakeError> {
        if width == 0 || height == 0 {
            return Err(FrozenLakeError::InvalidSize);
        }
        let expected = width * height;
        if tiles.len() != expected {
            return Err(FrozenLakeError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }
        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles.
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Whether a cell lies within the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// The tile at a cell, or `None` if the cell is out of bounds.
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        if self.in_bounds(cell) {
            Some(self.tiles[cell.row * self.width + cell.col])
        } else {
            None
        }
    }

    // Only the generator and parser place start and goal; after that grids are read-only.
    pub(crate) fn set(&mut self, cell: Cell, tile: Tile) {
        if self.in_bounds(cell) {
            self.tiles[cell.row * self.width + cell.col] = tile;
        }
    }

    /// Whether a cell is in bounds and not a hole.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.get(cell).map_or(false, Tile::is_passable)
    }

    /// Number of passable tiles.
    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_passable()).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }

    /// Passable neighbors of a cell together with the action that reaches each of them, in
    /// [`Action::ALL`] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Cell, Action)> + '_ {
        Action::ALL.into_iter().filter_map(move |action| {
            let next = cell.step(action)?;
            self.is_passable(next).then_some((next, action))
        })
    }
}

// One line per row, e.g. "SFH\nFFG".
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                s.push(self.tiles[row * self.width + col].as_char());
            }
            if row < self.height - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}

impl FromStr for Grid {
    type Err = FrozenLakeError;

    /// Parse rows of `F`, `H`, `S`, `G`. Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(FrozenLakeError::EmptyGrid),
        };

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(FrozenLakeError::RaggedRow {
                    row,
                    found,
                    expected: width,
                });
            }
            for c in line.chars() {
                tiles.push(Tile::try_from(c)?);
            }
        }
        Grid::from_tiles(width, rows.len(), tiles)
    }
}

/// A grid together with its start and goal cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrozenLake {
    grid: Grid,
    start: Cell,
    goal: Cell,
    seed: Option<u64>,
}

impl FrozenLake {
    /// Wrap a grid that contains exactly one start and one goal tile.
    pub fn new(grid: Grid) -> Result<Self, FrozenLakeError> {
        let start = find_unique(&grid, Tile::Start)?;
        let goal = find_unique(&grid, Tile::Goal)?;
        Ok(Self {
            grid,
            start,
            goal,
            seed: None,
        })
    }

    pub(crate) fn from_generated(grid: Grid, start: Cell, goal: Cell, seed: u64) -> Self {
        Self {
            grid,
            start,
            goal,
            seed: Some(seed),
        }
    }

    /// The tiles.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Start cell.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Goal cell.
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Seed the map was generated from, `None` for hand-written maps.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl std::fmt::Display for FrozenLake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl FromStr for FrozenLake {
    type Err = FrozenLakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrozenLake::new(s.parse()?)
    }
}

fn find_unique(grid: &Grid, tile: Tile) -> Result<Cell, FrozenLakeError> {
    let mut found = grid.cells().filter(|cell| grid.get(*cell) == Some(tile));
    let first = found.next().ok_or(FrozenLakeError::MissingTile(tile))?;
    if found.next().is_some() {
        return Err(FrozenLakeError::DuplicateTile(tile));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lake(s: &str) -> FrozenLake {
        s.parse().expect("valid lake")
    }

    #[test]
    fn test_parse_finds_start_and_goal() {
        let lake = lake("SF\nFG");
        assert_eq!(lake.start(), Cell::new(0, 0));
        assert_eq!(lake.goal(), Cell::new(1, 1));
        assert_eq!(lake.seed(), None);
        assert_eq!(lake.grid().width(), 2);
        assert_eq!(lake.grid().height(), 2);
    }

    #[test]
    fn test_display_matches_parsed_text() {
        let text = "SFFH\nHFHF\nFFFG";
        assert_eq!(format!("{}", lake(text)), text);
    }

    #[test]
    fn test_parse_ignores_indentation_and_blank_lines() {
        let lake = lake(
            "
            SH
            FG
            ",
        );
        assert_eq!(lake.grid().get(Cell::new(0, 1)), Some(Tile::Hole));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(FrozenLakeError::EmptyGrid));
        assert_eq!("SX".parse::<Grid>(), Err(FrozenLakeError::UnknownTile('X')));
        assert_eq!(
            "SF\nG".parse::<Grid>(),
            Err(FrozenLakeError::RaggedRow {
                row: 1,
                found: 1,
                expected: 2
            })
        );
        assert_eq!(
            "FF\nFG".parse::<FrozenLake>(),
            Err(FrozenLakeError::MissingTile(Tile::Start))
        );
        assert_eq!(
            "SS\nFG".parse::<FrozenLake>(),
            Err(FrozenLakeError::DuplicateTile(Tile::Start))
        );
    }

    #[test]
    fn test_from_tiles_checks_dimensions() {
        assert_eq!(
            Grid::from_tiles(2, 2, vec![Tile::Frozen; 3]),
            Err(FrozenLakeError::TileCountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Grid::from_tiles(0, 2, vec![]),
            Err(FrozenLakeError::InvalidSize)
        );
    }

    #[test]
    fn test_neighbors_follow_fixed_action_order() {
        let lake = lake("FFF\nFSF\nFFG");
        let neighbors: Vec<(Cell, Action)> = lake.grid().neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            neighbors,
            vec![
                (Cell::new(1, 0), Action::Left),
                (Cell::new(2, 1), Action::Down),
                (Cell::new(1, 2), Action::Right),
                (Cell::new(0, 1), Action::Up),
            ]
        );
    }

    #[test]
    fn test_neighbors_skip_holes_and_edges() {
        let lake = lake("SH\nFG");
        let neighbors: Vec<(Cell, Action)> = lake.grid().neighbors(Cell::new(0, 0)).collect();
        assert_eq!(neighbors, vec![(Cell::new(1, 0), Action::Down)]);

        let neighbors: Vec<(Cell, Action)> = lake.grid().neighbors(Cell::new(1, 1)).collect();
        assert_eq!(neighbors, vec![(Cell::new(1, 0), Action::Left)]);
    }

    #[test]
    fn test_action_codes_and_deltas() {
        let codes: Vec<u8> = Action::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
        for action in Action::ALL {
            let (d_row, d_col) = action.delta();
            assert_eq!(Action::from_delta(d_row, d_col), Some(action));
        }
        assert_eq!(Action::from_delta(1, 1), None);
        assert_eq!(Action::from_delta(0, 0), None);
    }

    #[test]
    fn test_action_between_adjacent_cells() {
        let cell = Cell::new(3, 3);
        for action in Action::ALL {
            let next = cell.step(action).expect("in range");
            assert_eq!(Action::between(cell, next), Some(action));
        }
        assert_eq!(Action::between(cell, Cell::new(5, 3)), None);
        assert_eq!(Action::between(cell, cell), None);
    }

    #[test]
    fn test_step_does_not_underflow() {
        assert_eq!(Cell::new(0, 0).step(Action::Left), None);
        assert_eq!(Cell::new(0, 0).step(Action::Up), None);
        assert_eq!(Cell::new(0, 0).step(Action::Down), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_passable_count() {
        let lake = lake("SHH\nFFG");
        assert_eq!(lake.grid().passable_count(), 4);
        assert!(!lake.grid().is_passable(Cell::new(0, 1)));
        assert!(!lake.grid().is_passable(Cell::new(9, 9)));
        assert!(lake.grid().is_passable(lake.start()));
        assert!(lake.grid().is_passable(lake.goal()));
    }
}
