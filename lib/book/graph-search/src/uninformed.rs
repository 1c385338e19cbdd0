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

// Uninformed search strategies, see section 3.4 page 94. None of these look at action costs.

use std::collections::VecDeque;

use rand::Rng as _;

use crate::{HashMap, Outcome, Problem, Rng, SearchContext, SearchError};

/// Expand a uniformly random frontier state each step, up to `max_expansions` expansions.
pub fn random_search<P: Problem>(
    problem: &P,
    max_expansions: usize,
    rng: &mut Rng,
) -> Result<Outcome<P>, SearchError> {
    let mut context = SearchContext::new(problem);
    let mut frontier = vec![problem.initial_state()];
    while !frontier.is_empty() && context.expansions < max_expansions {
        let index = rng.gen_range(0..frontier.len());
        let state = frontier.swap_remove(index);
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, None);
        }
        for (next, action) in problem.successors(&state) {
            if context.discover(next, state, action) {
                frontier.push(next);
            }
        }
    }
    if !frontier.is_empty() {
        tracing::debug!(max_expansions, "random search hit the expansion cap");
    }
    Ok(context.exhausted())
}

/// FIFO frontier. Finds a path with the fewest actions.
pub fn breadth_first_search<P: Problem>(problem: &P) -> Result<Outcome<P>, SearchError> {
    let mut context = SearchContext::new(problem);
    let mut frontier = VecDeque::from([problem.initial_state()]);
    while let Some(state) = frontier.pop_front() {
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, None);
        }
        for (next, action) in problem.successors(&state) {
            if context.discover(next, state, action) {
                frontier.push_back(next);
            }
        }
    }
    Ok(context.exhausted())
}

/// LIFO frontier, up to `max_expansions` expansions. Successors are pushed in reverse so the
/// first successor is expanded first.
pub fn depth_first_search<P: Problem>(
    problem: &P,
    max_expansions: usize,
) -> Result<Outcome<P>, SearchError> {
    let mut context = SearchContext::new(problem);
    let mut frontier = vec![problem.initial_state()];
    while context.expansions < max_expansions {
        let Some(state) = frontier.pop() else {
            break;
        };
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, None);
        }
        for (next, action) in problem.successors(&state).into_iter().rev() {
            if context.discover(next, state, action) {
                frontier.push(next);
            }
        }
    }
    if !frontier.is_empty() {
        tracing::debug!(max_expansions, "depth-first search hit the expansion cap");
    }
    Ok(context.exhausted())
}

/// Depth-first search that stops going deeper once a branch is `limit` actions long. A state is
/// pushed again only when reached at a strictly smaller depth than before, so a solution, if
/// returned, has at most `limit` actions.
pub fn depth_limited_search<P: Problem>(
    problem: &P,
    limit: usize,
) -> Result<Outcome<P>, SearchError> {
    let start = problem.initial_state();
    let mut context = SearchContext::new(problem);
    let mut best_depth: HashMap<P::State, usize> = HashMap::default();
    best_depth.insert(start, 0);
    let mut frontier = vec![(start, 0)];
    while let Some((state, depth)) = frontier.pop() {
        context.expansions += 1;
        if problem.is_goal(&state) {
            return context.solved(state, None);
        }
        if depth >= limit {
            continue;
        }
        let next_depth = depth + 1;
        for (next, action) in problem.successors(&state) {
            let improves = best_depth
                .get(&next)
                .map_or(true, |known| next_depth < *known);
            if improves {
                best_depth.insert(next, next_depth);
                context.set_parent(next, state, action);
                frontier.push((next, next_depth));
            }
        }
    }
    Ok(context.exhausted())
}
