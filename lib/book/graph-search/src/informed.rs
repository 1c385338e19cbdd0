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

// Cost-ordered best-first searches: uniform-cost (section 3.4.2) and A* (section 3.5.2).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{Cost, HashMap, Outcome, Problem, SearchContext, SearchError};

/// Expand the cheapest frontier state first. Ties go to the smaller state.
pub fn uniform_cost_search<P: Problem>(problem: &P) -> Result<Outcome<P>, SearchError> {
    let start = problem.initial_state();
    let mut context = SearchContext::new(problem);
    let mut best_cost: HashMap<P::State, Cost> = HashMap::default();
    best_cost.insert(start, 0);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0, start)));

    while let Some(Reverse((cost, state))) = frontier.pop() {
        if is_stale(&best_cost, &state, cost) {
            continue;
        }
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, Some(cost));
        }
        for (next, action) in problem.successors(&state) {
            let next_cost = cost.saturating_add(problem.step_cost(&state, &action));
            if improves(&best_cost, &next, next_cost) {
                best_cost.insert(next, next_cost);
                context.set_parent(next, state, action);
                frontier.push(Reverse((next_cost, next)));
            }
        }
    }
    Ok(context.exhausted())
}

/// Expand the frontier state with the smallest `cost + heuristic` first, breaking ties by the
/// smaller cost and then the smaller state.
pub fn a_star_search<P: Problem>(problem: &P) -> Result<Outcome<P>, SearchError> {
    let start = problem.initial_state();
    let mut context = SearchContext::new(problem);
    let mut best_cost: HashMap<P::State, Cost> = HashMap::default();
    best_cost.insert(start, 0);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((problem.heuristic(&start), 0, start)));

    while let Some(Reverse((_, cost, state))) = frontier.pop() {
        if is_stale(&best_cost, &state, cost) {
            continue;
        }
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, Some(cost));
        }
        for (next, action) in problem.successors(&state) {
            let next_cost = cost.saturating_add(problem.step_cost(&state, &action));
            if improves(&best_cost, &next, next_cost) {
                best_cost.insert(next, next_cost);
                context.set_parent(next, state, action);
                let estimate = next_cost.saturating_add(problem.heuristic(&next));
                frontier.push(Reverse((estimate, next_cost, next)));
            }
        }
    }
    Ok(context.exhausted())
}

// A cheaper route to the state was pushed after this entry; the entry is dropped without
// counting as an expansion.
fn is_stale<S: std::hash::Hash + Eq>(best_cost: &HashMap<S, Cost>, state: &S, cost: Cost) -> bool {
    best_cost.get(state).map_or(false, |best| cost > *best)
}

fn improves<S: std::hash::Hash + Eq>(best_cost: &HashMap<S, Cost>, state: &S, cost: Cost) -> bool {
    best_cost.get(state).map_or(true, |best| cost < *best)
}
