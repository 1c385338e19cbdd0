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

//! Classical graph search: uninformed (random, breadth-first, depth-first, depth-limited) and
//! cost based (uniform-cost, A*).
//!
//! See Chapter 3 Solving Problems by Searching. Every algorithm works on anything implementing
//! [`Problem`] and returns the same [`SearchOutcome`], so they can be compared side by side.

use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

mod informed;
mod uninformed;

#[cfg(test)]
mod romania;

pub use informed::{a_star_search, uniform_cost_search};
pub use uninformed::{
    breadth_first_search, depth_first_search, depth_limited_search, random_search,
};

/// Path cost. Costs add up along a path, so this is wider than a single step's cost.
pub type Cost = u64;

/// Random number generator used by random search.
pub type Rng = rand_pcg::Pcg64;

/// Hash map used for parent maps and best-cost tables.
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Expansion cap for the algorithms that need one (random and depth-first search).
pub const DEFAULT_MAX_EXPANSIONS: usize = 200_000;

/// A search state. `Ord` gives the cost-ordered searches a deterministic tie-break.
pub trait State: Clone + Copy + PartialEq + Eq + Hash + Ord + Debug {}

/// An action leading from one state to the next.
pub trait Action: Clone + Copy + PartialEq + Eq + Hash + Debug {}

/// A search problem, see Chapter 3 page 65: initial state, actions and transition model
/// (`successors`), goal test, and action cost. `heuristic` is only used by A* and must never
/// overestimate the remaining cost for A* to return optimal solutions.
pub trait Problem {
    type State: State;
    type Action: Action;

    fn initial_state(&self) -> Self::State;
    fn is_goal(&self, state: &Self::State) -> bool;

    /// States reachable in one step, with the action leading to each. Depth-first algorithms
    /// visit them in this order.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Self::Action)>;
    fn step_cost(&self, state: &Self::State, action: &Self::Action) -> Cost;
    fn heuristic(&self, state: &Self::State) -> Cost;

    /// The action that moves from `from` to the adjacent state `to`. Used to turn a path of
    /// states back into a sequence of actions.
    fn action_between(&self, from: &Self::State, to: &Self::State) -> Option<Self::Action>;
}

/// Internal consistency failures. Not finding a goal is never one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no action matches the move from {from} to {to}")]
    NoActionBetween { from: String, to: String },

    #[error("parent chain is broken at {0}")]
    MissingParent(String),

    #[error("parent chain does not lead back to the start")]
    ParentCycle,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// The algorithms being compared. `Display` gives the name used in result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Random,
    BreadthFirst,
    DepthFirst,
    DepthLimited(usize),
    UniformCost,
    AStar,
}

impl Algorithm {
    /// The usual line-up: random, bfs, dfs, one dls per limit, ucs, astar.
    pub fn lineup(dls_limits: &[usize]) -> Vec<Algorithm> {
        let mut algorithms = vec![
            Algorithm::Random,
            Algorithm::BreadthFirst,
            Algorithm::DepthFirst,
        ];
        algorithms.extend(dls_limits.iter().map(|limit| Algorithm::DepthLimited(*limit)));
        algorithms.push(Algorithm::UniformCost);
        algorithms.push(Algorithm::AStar);
        algorithms
    }

    /// Whether the algorithm orders its frontier by path cost.
    pub fn is_cost_aware(&self) -> bool {
        matches!(self, Algorithm::UniformCost | Algorithm::AStar)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Random => write!(f, "random"),
            Algorithm::BreadthFirst => write!(f, "bfs"),
            Algorithm::DepthFirst => write!(f, "dfs"),
            Algorithm::DepthLimited(limit) => write!(f, "dls{}", limit),
            Algorithm::UniformCost => write!(f, "ucs"),
            Algorithm::AStar => write!(f, "astar"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Algorithm::Random),
            "bfs" => Ok(Algorithm::BreadthFirst),
            "dfs" => Ok(Algorithm::DepthFirst),
            "ucs" => Ok(Algorithm::UniformCost),
            "astar" => Ok(Algorithm::AStar),
            _ => s
                .strip_prefix("dls")
                .and_then(|limit| limit.parse::<usize>().ok())
                .map(Algorithm::DepthLimited)
                .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cap for random and depth-first search.
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// A path from the start to a goal and the actions taken along it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<_State, _Action> {
    /// Start to goal, inclusive.
    pub path: Vec<_State>,
    pub actions: Vec<_Action>,

    /// Path cost, only reported by cost-aware algorithms.
    pub cost: Option<Cost>,
}

/// What a search run produced. Not finding a solution is a normal outcome, not an error: the
/// frontier ran dry or the expansion cap was hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<_State, _Action> {
    pub expansions: usize,
    pub solution: Option<Solution<_State, _Action>>,
}

impl<_State, _Action> SearchOutcome<_State, _Action> {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// The outcome type of a search on `P`.
pub type Outcome<P> = SearchOutcome<<P as Problem>::State, <P as Problem>::Action>;

/// Run `algorithm` on `problem`. `rng` is only drawn from by random search.
pub fn search<P: Problem>(
    problem: &P,
    algorithm: Algorithm,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<Outcome<P>, SearchError> {
    match algorithm {
        Algorithm::Random => random_search(problem, config.max_expansions, rng),
        Algorithm::BreadthFirst => breadth_first_search(problem),
        Algorithm::DepthFirst => depth_first_search(problem, config.max_expansions),
        Algorithm::DepthLimited(limit) => depth_limited_search(problem, limit),
        Algorithm::UniformCost => uniform_cost_search(problem),
        Algorithm::AStar => a_star_search(problem),
    }
}

/// Per-run bookkeeping: the parent map and the expansion counter. Each search call owns exactly
/// one and drops it when it returns.
struct SearchContext<'a, P: Problem> {
    problem: &'a P,
    start: P::State,
    parents: HashMap<P::State, (P::State, P::Action)>,
    expansions: usize,
}

impl<'a, P: Problem> SearchContext<'a, P> {
    fn new(problem: &'a P) -> Self {
        Self {
            problem,
            start: problem.initial_state(),
            parents: HashMap::default(),
            expansions: 0,
        }
    }

    fn is_discovered(&self, state: &P::State) -> bool {
        *state == self.start || self.parents.contains_key(state)
    }

    /// Record `parent` as the parent of `state` if `state` hasn't been seen yet. Returns whether
    /// it was new.
    fn discover(&mut self, state: P::State, parent: P::State, action: P::Action) -> bool {
        if self.is_discovered(&state) {
            return false;
        }
        self.parents.insert(state, (parent, action));
        true
    }

    /// Overwrite the parent of `state`, for algorithms that can find better routes later.
    fn set_parent(&mut self, state: P::State, parent: P::State, action: P::Action) {
        self.parents.insert(state, (parent, action));
    }

    fn solved(self, goal: P::State, cost: Option<Cost>) -> Result<Outcome<P>, SearchError> {
        let (path, actions) = self.reconstruct(goal)?;
        Ok(SearchOutcome {
            expansions: self.expansions,
            solution: Some(Solution {
                path,
                actions,
                cost,
            }),
        })
    }

    fn exhausted(self) -> Outcome<P> {
        SearchOutcome {
            expansions: self.expansions,
            solution: None,
        }
    }

    // Walk back from goal to start, then derive each action from consecutive states and check it
    // against the action recorded when the state was discovered.
    fn reconstruct(&self, goal: P::State) -> Result<(Vec<P::State>, Vec<P::Action>), SearchError> {
        let mut path = vec![goal];
        let mut current = goal;
        while current != self.start {
            let (parent, _) = self
                .parents
                .get(&current)
                .ok_or_else(|| SearchError::MissingParent(format!("{:?}", current)))?;
            current = *parent;
            path.push(current);
            if path.len() > self.parents.len() + 1 {
                return Err(SearchError::ParentCycle);
            }
        }
        path.reverse();

        let actions = path
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                let recorded = self.parents.get(to).map(|(_, action)| *action);
                match self.problem.action_between(from, to) {
                    Some(action) if Some(action) == recorded => Ok(action),
                    _ => Err(SearchError::NoActionBetween {
                        from: format!("{:?}", from),
                        to: format!("{:?}", to),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((path, actions))
    }
}
