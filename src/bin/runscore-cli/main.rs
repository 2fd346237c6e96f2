// ABOUTME: Runscore CLI - score device logs, run synthetic demos, replay stored records
// ABOUTME: Thin clap front-end over the library's ingest pipeline and scoring engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Runscore command line interface.
//!
//! Usage:
//! ```bash
//! # Score a watch-export JSON file
//! runscore-cli score workout.json --weight-kg 72 --age 34
//!
//! # Score and save the record for later replay
//! runscore-cli score workout.json --save scored.json
//!
//! # Synthetic training block through the full pipeline
//! runscore-cli demo --runs 12 --seed 42
//!
//! # Re-score a saved record under the current formula revision
//! runscore-cli replay scored.json
//! ```

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use runscore::logging::LoggingConfig;
use runscore_core::constants::athlete_defaults;
use runscore_core::Sex;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "runscore-cli",
    about = "Power-based running performance scoring",
    long_about = "Scores runs from watch-export device logs or a synthetic activity source, \
                  and replays stored records under the current formula revision."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Score a watch-export device log
    Score {
        /// Path to the DeviceLog JSON file
        file: PathBuf,

        #[command(flatten)]
        athlete: AthleteArgs,

        /// Write the scored record as JSON for later replay
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Run a synthetic training block through the full pipeline
    Demo {
        /// Number of synthetic runs to generate
        #[arg(long, default_value = "12")]
        runs: usize,

        /// Seed for the deterministic generator
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Re-score a saved record under the current formula revision
    Replay {
        /// Path to a record JSON written by `score --save`
        file: PathBuf,
    },
}

/// Athlete context a device log cannot supply
#[derive(Args)]
struct AthleteArgs {
    /// Body weight in kilograms
    #[arg(long, default_value_t = athlete_defaults::WEIGHT_KG)]
    weight_kg: f64,

    /// Maximal heart rate in bpm; overrides the device header when set
    #[arg(long)]
    hr_max: Option<u32>,

    /// Resting heart rate in bpm
    #[arg(long, default_value_t = athlete_defaults::HR_REST)]
    hr_rest: u32,

    /// Age in years
    #[arg(long, default_value_t = athlete_defaults::AGE_YEARS)]
    age: u32,

    /// Biological sex for the reference tables (M or F)
    #[arg(long, default_value = "M")]
    sex: String,

    /// Functional threshold power in watts, for the zone table
    #[arg(long, default_value_t = athlete_defaults::FTP_WATTS)]
    ftp_watts: f64,
}

impl AthleteArgs {
    fn sex(&self) -> Sex {
        match self.sex.as_str() {
            "F" | "f" | "female" | "Female" => Sex::Female,
            _ => Sex::Male,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    match cli.command {
        Command::Score {
            file,
            athlete,
            save,
        } => commands::score::run(&file, &athlete, save.as_deref()),
        Command::Demo { runs, seed } => commands::demo::run(runs, seed).await,
        Command::Replay { file } => commands::replay::run(&file),
    }
}
