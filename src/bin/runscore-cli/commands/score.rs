// ABOUTME: Score command: import a device log, run the engine, print the breakdown
// ABOUTME: Optionally saves the scored record as JSON for the replay command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use anyhow::{Context, Result};
use runscore::ingest::devicelog;
use runscore_core::RunRecord;
use runscore_engine::ScoreEngine;
use std::path::Path;
use tracing::info;

use crate::AthleteArgs;

/// Import, score, and display one device log
pub fn run(file: &Path, athlete: &AthleteArgs, save: Option<&Path>) -> Result<()> {
    let import = devicelog::import_device_log(file)
        .with_context(|| format!("importing {}", file.display()))?;
    info!(
        file = %file.display(),
        samples = import.streams.watts.len(),
        "device log imported"
    );

    let mut metrics = import.metrics.clone();
    metrics.weight_kg = athlete.weight_kg;
    metrics.hr_rest = athlete.hr_rest;
    metrics.age = athlete.age;
    metrics.sex = athlete.sex();
    if let Some(hr_max) = athlete.hr_max {
        metrics.hr_max = hr_max;
    }

    let engine = ScoreEngine::new();
    let decoupling = engine.calculate_decoupling(&import.streams.watts, &import.streams.heart_rate);
    let result = engine.compute_score(&metrics, decoupling);
    let rank = engine.get_rank(result.score);

    println!("\nRun scored: {}", file.display());
    println!("{}", "=".repeat(60));
    println!("   Score:       {:.2} / 100", result.score);
    println!("   Rank:        {}", rank.label());
    println!("   Quality:     {}", result.quality.label());
    println!(
        "   Percentile:  faster than {:.1}% of reference runners",
        result.relative_performance_pct
    );
    println!("   Target time: {}", result.details.target_time);
    println!("   Weather:     x{:.3}", result.weather_factor);
    println!("   Decoupling:  {:+.2}%", decoupling * 100.0);

    println!("\nContribution breakdown:");
    for (term, value) in &result.details.contributions {
        println!("   {term:<10} {value:.4}");
    }
    if result.details.efficiency_malus {
        println!("   (efficiency malus: drift above the warning threshold)");
    }

    let zones = engine.calculate_zones(&import.streams.watts, athlete.ftp_watts);
    if !zones.is_empty() {
        println!("\nPower zones (FTP {:.0} W):", athlete.ftp_watts);
        for (zone, share) in &zones {
            println!("   {} {:<16} {share:>5.1}%", zone.label(), zone.name());
        }
    }

    if let Some(path) = save {
        let record = RunRecord {
            id: format!("device-{}", import.start_date.timestamp()),
            name: file
                .file_stem()
                .map_or_else(|| "device-log".to_owned(), |s| s.to_string_lossy().into_owned()),
            start_date: import.start_date,
            metrics,
            streams: import.streams,
            decoupling,
            score: result.score,
            version: result.version,
            rank,
            quality: result.quality,
        };
        let json = serde_json::to_string_pretty(&record).context("serializing record")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("\nRecord saved to {}", path.display());
    }

    Ok(())
}
