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

//! Chapter 3, compare search algorithms on Frozen Lake maps.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use search_frozen_lake::ExperimentConfig;
use tracing_subscriber::EnvFilter;

// Chapter 3 Solving Problems by Searching.
//
// Generate 30 random 100x100 Frozen Lake maps and run random, breadth-first, depth-first,
// depth-limited (50, 75, 100), uniform-cost and A* search on each of them, once where every move
// costs 1 and once where vertical moves cost 10. Write expansions, solution length, solution
// cost and time per algorithm and map to a CSV file for plotting.
#[derive(Debug, Parser)]
#[command(about = "Compare graph search algorithms on random Frozen Lake maps")]
struct Args {
    /// TOML file with experiment settings. Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the CSV results.
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Number of maps.
    #[arg(long)]
    instances: Option<usize>,

    /// Maps are SIZE x SIZE.
    #[arg(long)]
    size: Option<usize>,

    /// Probability that a tile is frozen.
    #[arg(long)]
    p_frozen: Option<f64>,

    /// Seed of the first map.
    #[arg(long)]
    seed_start: Option<u64>,

    /// Evaluate maps in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print the map generated from SEED and exit.
    #[arg(long, value_name = "SEED")]
    show_map: Option<u64>,
}

impl Args {
    fn experiment_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_toml_file(path)
                .with_context(|| format!("could not load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };
        if let Some(instances) = self.instances {
            config.instances = instances;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(p_frozen) = self.p_frozen {
            config.p_frozen = p_frozen;
        }
        if let Some(seed_start) = self.seed_start {
            config.seed_start = seed_start;
        }
        if self.parallel {
            config.parallel = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.experiment_config()?;

    if let Some(seed) = args.show_map {
        let lake = frozen_lake_logic::generate(&config.map_config(), seed)
            .with_context(|| format!("could not generate map for seed {}", seed))?;
        println!("{}", lake);
        println!("start: {}, goal: {}", lake.start(), lake.goal());
        return Ok(());
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
    }
    let file = File::create(&args.output)
        .with_context(|| format!("could not create {}", args.output.display()))?;

    tracing::info!(
        instances = config.instances,
        size = config.size,
        p_frozen = config.p_frozen,
        parallel = config.parallel,
        "starting"
    );
    let summary = search_frozen_lake::run_experiment(&config, BufWriter::new(file))?;
    if summary.inconsistencies > 0 || summary.failed_runs > 0 {
        tracing::warn!(
            inconsistencies = summary.inconsistencies,
            failed_runs = summary.failed_runs,
            "some rows need a closer look"
        );
    }
    println!("results written to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::try_parse_from(["ch03"]).expect("valid args");
        let config = args.experiment_config().expect("valid config");
        assert_eq!(config, ExperimentConfig::default());
        assert_eq!(args.output, PathBuf::from("results.csv"));
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "ch03",
            "--instances",
            "5",
            "--size",
            "20",
            "--p-frozen",
            "0.8",
            "--seed-start",
            "10",
            "--parallel",
        ])
        .expect("valid args");
        let config = args.experiment_config().expect("valid config");
        assert_eq!(config.instances, 5);
        assert_eq!(config.size, 20);
        assert_eq!(config.p_frozen, 0.8);
        assert_eq!(config.seeds(), 10..15);
        assert!(config.parallel);
    }

    #[test]
    fn test_bad_probability_is_rejected() {
        let args = Args::try_parse_from(["ch03", "--p-frozen", "2.0"]).expect("valid args");
        assert!(args.experiment_config().is_err());
    }
}
