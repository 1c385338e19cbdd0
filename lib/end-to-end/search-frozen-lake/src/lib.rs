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

//! Runs the `graph-search` algorithms on Frozen Lake maps and compares them.

use frozen_lake_logic::{Action, Cell, CostMode, FrozenLake, FrozenLakeError};
use graph_search::{Algorithm, SearchConfig, SearchError, SearchOutcome, Solution};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod experiment;

pub use config::ExperimentConfig;
pub use experiment::{
    evaluate_instance, evaluate_lake, run_experiment, ExperimentSummary, InstanceReport,
    ResultRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("could not generate map for seed {seed}: {source}")]
    Map {
        seed: u64,
        source: FrozenLakeError,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("could not parse config: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("could not write results: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A cell as a search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub Cell);

impl graph_search::State for Position {}

/// A move as a search action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move(pub Action);

impl graph_search::Action for Move {}

/// A Frozen Lake map seen as a search problem under one cost mode.
pub struct FrozenLakeProblem<'a> {
    lake: &'a FrozenLake,
    mode: CostMode,
}

impl<'a> FrozenLakeProblem<'a> {
    pub fn new(lake: &'a FrozenLake, mode: CostMode) -> Self {
        Self { lake, mode }
    }
}

impl graph_search::Problem for FrozenLakeProblem<'_> {
    type State = Position;
    type Action = Move;

    fn initial_state(&self) -> Position {
        Position(self.lake.start())
    }

    fn is_goal(&self, state: &Position) -> bool {
        state.0 == self.lake.goal()
    }

    fn successors(&self, state: &Position) -> Vec<(Position, Move)> {
        self.lake
            .grid()
            .neighbors(state.0)
            .map(|(cell, action)| (Position(cell), Move(action)))
            .collect()
    }

    fn step_cost(&self, _state: &Position, action: &Move) -> graph_search::Cost {
        graph_search::Cost::from(frozen_lake_logic::step_cost(action.0, self.mode))
    }

    fn heuristic(&self, state: &Position) -> graph_search::Cost {
        graph_search::Cost::from(frozen_lake_logic::heuristic(
            state.0,
            self.lake.goal(),
            self.mode,
        ))
    }

    fn action_between(&self, from: &Position, to: &Position) -> Option<Move> {
        Action::between(from.0, to.0).map(Move)
    }
}

/// Run one algorithm on one map under one cost mode. `rng` is only used by random search.
pub fn run_algorithm(
    lake: &FrozenLake,
    algorithm: Algorithm,
    mode: CostMode,
    config: &SearchConfig,
    rng: &mut graph_search::Rng,
) -> Result<SearchOutcome<Cell, Action>, SearchError> {
    let problem = FrozenLakeProblem::new(lake, mode);
    let outcome = graph_search::search(&problem, algorithm, config, rng)?;
    Ok(SearchOutcome {
        expansions: outcome.expansions,
        solution: outcome.solution.map(|solution| Solution {
            path: solution.path.into_iter().map(|p| p.0).collect(),
            actions: solution.actions.into_iter().map(|m| m.0).collect(),
            cost: solution.cost,
        }),
    })
}
