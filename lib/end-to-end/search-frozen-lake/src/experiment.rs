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

//! The experiment: every algorithm on every map, under both cost modes, one CSV row per
//! (algorithm, map).

use std::io::Write;
use std::time::{Duration, Instant};

use frozen_lake_logic::{actions_cost, generate, Action, Cell, Cost, CostMode, FrozenLake};
use graph_search::{Algorithm, SearchError, SearchOutcome};
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{run_algorithm, ExperimentConfig, ExperimentError};

/// One CSV row. Field names are the column names and their order is the column order; plotting
/// scripts depend on both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub algorithm_name: String,

    /// Seed of the map.
    pub env_n: u64,

    /// Expansions of the uniform-cost run.
    pub states_n: usize,

    /// Number of actions found by the uniform-cost run.
    pub actions_count: Option<usize>,

    /// Directional cost of the actions found by the directional-cost run.
    pub actions_cost: Option<Cost>,

    /// Wall time of the uniform-cost run, in seconds.
    pub time: f64,

    pub solution_found: bool,
}

impl ResultRecord {
    pub const COLUMNS: [&'static str; 7] = [
        "algorithm_name",
        "env_n",
        "states_n",
        "actions_count",
        "actions_cost",
        "time",
        "solution_found",
    ];

    fn from_runs(
        algorithm: Algorithm,
        env_n: u64,
        uniform: &SearchOutcome<Cell, Action>,
        directional: &SearchOutcome<Cell, Action>,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm_name: algorithm.to_string(),
            env_n,
            states_n: uniform.expansions,
            actions_count: uniform.solution.as_ref().map(|s| s.actions.len()),
            actions_cost: directional
                .solution
                .as_ref()
                .map(|s| actions_cost(&s.actions, CostMode::Directional)),
            time: elapsed.as_secs_f64(),
            solution_found: uniform.is_solved() && directional.is_solved(),
        }
    }

    // A `SearchError` carries no expansion count, so `states_n` 0 marks an internal error
    // rather than a search that expanded nothing.
    fn failed(algorithm: Algorithm, env_n: u64, elapsed: Duration) -> Self {
        Self {
            algorithm_name: algorithm.to_string(),
            env_n,
            states_n: 0,
            actions_count: None,
            actions_cost: None,
            time: elapsed.as_secs_f64(),
            solution_found: false,
        }
    }
}

/// Rows for one map plus what went wrong while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceReport {
    pub env_n: u64,
    pub records: Vec<ResultRecord>,

    /// Algorithms whose uniform and directional runs disagreed on whether the goal is reachable.
    pub inconsistencies: usize,

    /// Algorithms whose run returned an error.
    pub failed_runs: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentSummary {
    pub instances: usize,
    pub failed_instances: usize,
    pub records: usize,
    pub solved: usize,
    pub inconsistencies: usize,
    pub failed_runs: usize,
}

impl ExperimentSummary {
    fn add(&mut self, report: &InstanceReport) {
        self.records += report.records.len();
        self.solved += report
            .records
            .iter()
            .filter(|record| record.solution_found)
            .count();
        self.inconsistencies += report.inconsistencies;
        self.failed_runs += report.failed_runs;
    }
}

/// Generate the map for `seed` and run every algorithm on it.
pub fn evaluate_instance(
    seed: u64,
    config: &ExperimentConfig,
) -> Result<InstanceReport, ExperimentError> {
    let lake = generate(&config.map_config(), seed)
        .map_err(|source| ExperimentError::Map { seed, source })?;
    Ok(evaluate_lake(&lake, seed, config))
}

/// Run every algorithm on an existing map. `env_n` is only used to label the rows.
pub fn evaluate_lake(lake: &FrozenLake, env_n: u64, config: &ExperimentConfig) -> InstanceReport {
    let mut report = InstanceReport {
        env_n,
        ..InstanceReport::default()
    };
    for algorithm in config.algorithms() {
        let record = evaluate_algorithm(lake, env_n, algorithm, config, &mut report);
        report.records.push(record);
    }
    tracing::info!(
        env_n,
        solved = report.records.iter().filter(|r| r.solution_found).count(),
        algorithms = report.records.len(),
        "evaluated map"
    );
    report
}

// Expansions, action count, existence and time come from the uniform run; the cost comes from
// the directional run. Both search the same cells, so they have to agree on existence.
fn evaluate_algorithm(
    lake: &FrozenLake,
    env_n: u64,
    algorithm: Algorithm,
    config: &ExperimentConfig,
    report: &mut InstanceReport,
) -> ResultRecord {
    let search_config = config.search_config();

    let mut rng = graph_search::Rng::seed_from_u64(config.random_search_seed);
    let started = Instant::now();
    let uniform = run_algorithm(lake, algorithm, CostMode::Uniform, &search_config, &mut rng);
    let elapsed = started.elapsed();

    let mut rng = graph_search::Rng::seed_from_u64(config.random_search_seed);
    let directional = run_algorithm(
        lake,
        algorithm,
        CostMode::Directional,
        &search_config,
        &mut rng,
    );

    combine_runs(env_n, algorithm, uniform, directional, elapsed, report)
}

// Turn the two runs of one algorithm into a row, counting disagreements and failures in
// `report`.
fn combine_runs(
    env_n: u64,
    algorithm: Algorithm,
    uniform: Result<SearchOutcome<Cell, Action>, SearchError>,
    directional: Result<SearchOutcome<Cell, Action>, SearchError>,
    elapsed: Duration,
    report: &mut InstanceReport,
) -> ResultRecord {
    match (uniform, directional) {
        (Ok(uniform), Ok(directional)) => {
            if uniform.is_solved() != directional.is_solved() {
                tracing::warn!(
                    env_n,
                    %algorithm,
                    uniform = uniform.is_solved(),
                    directional = directional.is_solved(),
                    "cost modes disagree on whether the goal is reachable"
                );
                report.inconsistencies += 1;
            }
            tracing::debug!(
                env_n,
                %algorithm,
                expansions = uniform.expansions,
                solved = uniform.is_solved(),
                elapsed = ?elapsed,
                "search finished"
            );
            ResultRecord::from_runs(algorithm, env_n, &uniform, &directional, elapsed)
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(env_n, %algorithm, error = %e, "search run failed");
            report.failed_runs += 1;
            ResultRecord::failed(algorithm, env_n, elapsed)
        }
    }
}

/// Evaluate every map in `config.seeds()` and write the rows to `sink` as CSV, header first.
///
/// A map that can't be generated is logged and skipped; only writing to `sink` can abort the
/// run. Rows come out in seed order even when maps are evaluated in parallel.
pub fn run_experiment<W: Write>(
    config: &ExperimentConfig,
    sink: W,
) -> Result<ExperimentSummary, ExperimentError> {
    config.validate()?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(ResultRecord::COLUMNS)?;

    let mut summary = ExperimentSummary::default();
    if config.parallel {
        let seeds: Vec<u64> = config.seeds().collect();
        let reports: Vec<(u64, Result<InstanceReport, ExperimentError>)> = seeds
            .par_iter()
            .map(|seed| (*seed, evaluate_instance(*seed, config)))
            .collect();
        for (seed, report) in reports {
            emit(&mut writer, &mut summary, seed, report)?;
        }
    } else {
        for seed in config.seeds() {
            let report = evaluate_instance(seed, config);
            emit(&mut writer, &mut summary, seed, report)?;
        }
    }
    writer.flush()?;

    tracing::info!(
        instances = summary.instances,
        failed_instances = summary.failed_instances,
        records = summary.records,
        solved = summary.solved,
        inconsistencies = summary.inconsistencies,
        "experiment finished"
    );
    Ok(summary)
}

fn emit<W: Write>(
    writer: &mut csv::Writer<W>,
    summary: &mut ExperimentSummary,
    seed: u64,
    report: Result<InstanceReport, ExperimentError>,
) -> Result<(), ExperimentError> {
    summary.instances += 1;
    match report {
        Ok(report) => {
            for record in &report.records {
                writer.serialize(record)?;
            }
            summary.add(&report);
        }
        Err(e) => {
            tracing::error!(seed, error = %e, "skipping map");
            summary.failed_instances += 1;
        }
    }
    Ok(())
}
