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

// The road map of Romania from Chapter 3, Figure 3.1, and the straight-line distances to
// Bucharest from Figure 3.16. Test fixture only.

use crate::{Action, Cost, Problem, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Arad,
    Bucharest,
    Craiova,
    Drobeta,
    Eforie,
    Fagaras,
    Giurgiu,
    Hirsova,
    Iasi,
    Lugoj,
    Mehadia,
    Neamt,
    Oradea,
    Pitesti,
    RimnicuVilcea,
    Sibiu,
    Timisoara,
    Urziceni,
    Vaslui,
    Zerind,

    // Not on the map, so never reachable.
    Nowhere,
}

pub const CITIES: [City; 20] = [
    City::Arad,
    City::Bucharest,
    City::Craiova,
    City::Drobeta,
    City::Eforie,
    City::Fagaras,
    City::Giurgiu,
    City::Hirsova,
    City::Iasi,
    City::Lugoj,
    City::Mehadia,
    City::Neamt,
    City::Oradea,
    City::Pitesti,
    City::RimnicuVilcea,
    City::Sibiu,
    City::Timisoara,
    City::Urziceni,
    City::Vaslui,
    City::Zerind,
];

// The action "go to city X" is just X.
impl State for City {}
impl Action for City {}

const ROADS: [(City, City, Cost); 23] = [
    (City::Arad, City::Zerind, 75),
    (City::Arad, City::Sibiu, 140),
    (City::Arad, City::Timisoara, 118),
    (City::Zerind, City::Oradea, 71),
    (City::Oradea, City::Sibiu, 151),
    (City::Timisoara, City::Lugoj, 111),
    (City::Lugoj, City::Mehadia, 70),
    (City::Mehadia, City::Drobeta, 75),
    (City::Drobeta, City::Craiova, 120),
    (City::Craiova, City::RimnicuVilcea, 146),
    (City::Craiova, City::Pitesti, 138),
    (City::Sibiu, City::Fagaras, 99),
    (City::Sibiu, City::RimnicuVilcea, 80),
    (City::RimnicuVilcea, City::Pitesti, 97),
    (City::Fagaras, City::Bucharest, 211),
    (City::Pitesti, City::Bucharest, 101),
    (City::Bucharest, City::Giurgiu, 90),
    (City::Bucharest, City::Urziceni, 85),
    (City::Urziceni, City::Hirsova, 98),
    (City::Hirsova, City::Eforie, 86),
    (City::Urziceni, City::Vaslui, 142),
    (City::Vaslui, City::Iasi, 92),
    (City::Iasi, City::Neamt, 87),
];

fn straight_line_to_bucharest(city: City) -> Cost {
    match city {
        City::Arad => 366,
        City::Bucharest => 0,
        City::Craiova => 160,
        City::Drobeta => 242,
        City::Eforie => 161,
        City::Fagaras => 176,
        City::Giurgiu => 77,
        City::Hirsova => 151,
        City::Iasi => 226,
        City::Lugoj => 244,
        City::Mehadia => 241,
        City::Neamt => 234,
        City::Oradea => 380,
        City::Pitesti => 100,
        City::RimnicuVilcea => 193,
        City::Sibiu => 253,
        City::Timisoara => 329,
        City::Urziceni => 80,
        City::Vaslui => 199,
        City::Zerind => 374,
        City::Nowhere => 0,
    }
}

pub fn road_cost(a: City, b: City) -> Option<Cost> {
    ROADS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, cost)| *cost)
}

pub struct Romania {
    start: City,
    goal: City,
}

impl Romania {
    pub fn new(start: City, goal: City) -> Self {
        Self { start, goal }
    }
}

impl Problem for Romania {
    type State = City;
    type Action = City;

    fn initial_state(&self) -> City {
        self.start
    }

    fn is_goal(&self, state: &City) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &City) -> Vec<(City, City)> {
        ROADS
            .iter()
            .filter_map(|(a, b, _)| {
                if a == state {
                    Some((*b, *b))
                } else if b == state {
                    Some((*a, *a))
                } else {
                    None
                }
            })
            .collect()
    }

    fn step_cost(&self, state: &City, action: &City) -> Cost {
        road_cost(*state, *action).unwrap_or(Cost::MAX)
    }

    // Only admissible for Bucharest; zero is always admissible.
    fn heuristic(&self, state: &City) -> Cost {
        if self.goal == City::Bucharest {
            straight_line_to_bucharest(*state)
        } else {
            0
        }
    }

    fn action_between(&self, from: &City, to: &City) -> Option<City> {
        road_cost(*from, *to).map(|_| *to)
    }
}
