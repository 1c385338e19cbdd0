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

use std::ops::Range;
use std::path::Path;

use frozen_lake_logic::MapConfig;
use graph_search::{Algorithm, SearchConfig, DEFAULT_MAX_EXPANSIONS};
use serde::{Deserialize, Serialize};

use crate::ExperimentError;

/// Parameters of a whole experiment. Every field has a default, so a TOML file only needs to
/// list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Maps are `size` x `size`.
    pub size: usize,

    /// Probability that a tile is frozen.
    pub p_frozen: f64,

    /// Number of maps, seeded `seed_start`, `seed_start + 1`, ...
    pub instances: usize,
    pub seed_start: u64,

    /// Expansion cap for random and depth-first search.
    pub max_expansions: usize,

    /// One depth-limited search per limit.
    pub dls_limits: Vec<usize>,

    /// Every random search run starts from a generator seeded with this.
    pub random_search_seed: u64,

    /// Evaluate maps on a rayon thread pool.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let map = MapConfig::default();
        Self {
            size: map.size,
            p_frozen: map.p_frozen,
            instances: 30,
            seed_start: 0,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            dls_limits: vec![50, 75, 100],
            random_search_seed: 0,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ExperimentError> {
        let config: ExperimentConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ExperimentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Catch settings that would make every single map fail.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.size == 0 {
            return Err(ExperimentError::InvalidConfig(
                "size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.p_frozen) {
            return Err(ExperimentError::InvalidConfig(format!(
                "p_frozen must be within [0, 1], got {}",
                self.p_frozen
            )));
        }
        if self.seed_start.checked_add(self.instances as u64).is_none() {
            return Err(ExperimentError::InvalidConfig(
                "seed_start + instances overflows".to_string(),
            ));
        }
        Ok(())
    }

    pub fn map_config(&self) -> MapConfig {
        MapConfig {
            size: self.size,
            p_frozen: self.p_frozen,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_expansions: self.max_expansions,
        }
    }

    pub fn algorithms(&self) -> Vec<Algorithm> {
        Algorithm::lineup(&self.dls_limits)
    }

    pub fn seeds(&self) -> Range<u64> {
        self.seed_start..self.seed_start.saturating_add(self.instances as u64)
    }
}
