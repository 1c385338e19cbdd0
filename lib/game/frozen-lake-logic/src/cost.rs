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

//! Move costs and the matching distance heuristic.

use serde::{Deserialize, Serialize};

use crate::{Action, Cell};

/// Cost of a move or a sequence of moves.
pub type Cost = u32;

const HORIZONTAL_COST: Cost = 1;
const VERTICAL_COST: Cost = 10;

/// How much a move costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Every move costs 1.
    Uniform,

    /// Left and Right cost 1, Down and Up cost 10.
    Directional,
}

impl CostMode {
    /// Both modes, in the order experiments run them.
    pub const ALL: [CostMode; 2] = [CostMode::Uniform, CostMode::Directional];
}

impl std::fmt::Display for CostMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostMode::Uniform => write!(f, "uniform"),
            CostMode::Directional => write!(f, "directional"),
        }
    }
}

/// Cost of a single move.
pub fn step_cost(action: Action, mode: CostMode) -> Cost {
    match mode {
        CostMode::Uniform => 1,
        CostMode::Directional if action.is_horizontal() => HORIZONTAL_COST,
        CostMode::Directional => VERTICAL_COST,
    }
}

/// Manhattan distance from `cell` to `goal`, with each axis weighted by what a move along it
/// costs in `mode`. Never more than the true remaining cost, and it drops by at most the cost of
/// any single move, so it is both admissible and consistent.
pub fn heuristic(cell: Cell, goal: Cell, mode: CostMode) -> Cost {
    let d_row = cell.row.abs_diff(goal.row) as Cost;
    let d_col = cell.col.abs_diff(goal.col) as Cost;
    match mode {
        CostMode::Uniform => d_row + d_col,
        CostMode::Directional => d_col * HORIZONTAL_COST + d_row * VERTICAL_COST,
    }
}

/// Total cost of a sequence of moves.
pub fn actions_cost(actions: &[Action], mode: CostMode) -> Cost {
    actions.iter().map(|action| step_cost(*action, mode)).sum()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_uniform_costs_one_per_move() {
        for action in Action::ALL {
            assert_eq!(step_cost(action, CostMode::Uniform), 1);
        }
    }

    #[test]
    fn test_directional_costs() {
        assert_eq!(step_cost(Action::Left, CostMode::Directional), 1);
        assert_eq!(step_cost(Action::Right, CostMode::Directional), 1);
        assert_eq!(step_cost(Action::Down, CostMode::Directional), 10);
        assert_eq!(step_cost(Action::Up, CostMode::Directional), 10);
    }

    #[test]
    fn test_heuristic_values() {
        let cell = Cell::new(2, 7);
        let goal = Cell::new(5, 3);
        assert_eq!(heuristic(cell, goal, CostMode::Uniform), 7);
        assert_eq!(heuristic(cell, goal, CostMode::Directional), 4 + 30);
        assert_eq!(heuristic(goal, goal, CostMode::Directional), 0);
    }

    #[test]
    fn test_actions_cost() {
        let actions = [Action::Right, Action::Down, Action::Down, Action::Left];
        assert_eq!(actions_cost(&actions, CostMode::Uniform), 4);
        assert_eq!(actions_cost(&actions, CostMode::Directional), 22);
        assert_eq!(actions_cost(&[], CostMode::Directional), 0);
    }

    fn cost_mode() -> impl Strategy<Value = CostMode> {
        prop_oneof![Just(CostMode::Uniform), Just(CostMode::Directional)]
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Left),
            Just(Action::Down),
            Just(Action::Right),
            Just(Action::Up)
        ]
    }

    proptest! {
        // h(n) <= c(n, a, n') + h(n') for every move.
        #[test]
        fn test_heuristic_is_consistent(
            row in 1..50usize,
            col in 1..50usize,
            goal_row in 0..50usize,
            goal_col in 0..50usize,
            action in action(),
            mode in cost_mode(),
        ) {
            let cell = Cell::new(row, col);
            let goal = Cell::new(goal_row, goal_col);
            let next = cell.step(action).expect("row and col are at least 1");
            prop_assert!(
                heuristic(cell, goal, mode) <= step_cost(action, mode) + heuristic(next, goal, mode)
            );
        }
    }
}
