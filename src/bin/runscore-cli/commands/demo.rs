// ABOUTME: Demo command: synthetic training block through the full sync pipeline
// ABOUTME: Prints the scored history, the latest feedback bundle, and the sync report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use anyhow::Result;
use runscore::{AthleteProfile, MemoryStore, RunStore, SyncPipeline, SyntheticSource};
use runscore_engine::{ScoreEngine, TrendDirection};

/// Generate, sync, and display a synthetic training block
pub async fn run(runs: usize, seed: u64) -> Result<()> {
    println!("Generating {runs} synthetic runs (seed {seed})");

    let source = SyntheticSource::new(runs, seed);
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());
    let report = pipeline.run(None).await?;

    let history = store.history().await?;
    println!("\nScored history:");
    println!("{}", "=".repeat(76));
    for record in &history {
        println!(
            "   {}  {:<20} {:>6.2}  {:<12} {:<9} drift {:>+5.1}%",
            record.start_date.format("%Y-%m-%d"),
            record.name,
            record.score,
            record.rank.label(),
            record.quality.label(),
            record.decoupling * 100.0
        );
    }

    if let Some(feedback) = &report.feedback {
        println!("\nLatest run feedback:");
        println!("   Quality: {}", feedback.quality.label());
        let trend = match feedback.trend.direction {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Steady => "steady",
        };
        println!(
            "   Trend:   {trend} ({:.2} -> {:.2}, delta {:+.2})",
            feedback.trend.previous_avg, feedback.trend.recent_avg, feedback.trend.delta
        );
        if let Some(comparison) = &feedback.comparison {
            println!(
                "   Compare: {:.2} vs mean {:.2} of the last {} (best {:.2}), rank {}/{}",
                comparison.latest,
                comparison.prior_mean,
                comparison.window,
                comparison.prior_best,
                comparison.rank,
                comparison.window + 1
            );
        }
        for achievement in &feedback.achievements {
            println!(
                "   Earned:  {} - {}",
                achievement.title(),
                achievement.description()
            );
        }
    }

    println!(
        "\nSync report: {} fetched, {} scored, {} skipped, {} failed",
        report.fetched, report.scored, report.skipped, report.failed
    );
    Ok(())
}
