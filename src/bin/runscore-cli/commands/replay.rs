// ABOUTME: Replay command: re-score a saved record under the current formula revision
// ABOUTME: Shows stored versus recomputed score side by side without touching the file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use anyhow::{Context, Result};
use runscore_core::{RunRecord, ScoreFormulaVersion};
use runscore_engine::ScoreEngine;
use std::path::Path;

/// Load a saved record and replay it under the current revision
pub fn run(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let record: RunRecord =
        serde_json::from_str(&raw).with_context(|| format!("decoding {}", file.display()))?;

    let engine = ScoreEngine::new();
    let outcome = engine.replay(&record);

    println!("\nReplay of {} ({})", record.name, record.id);
    println!("{}", "=".repeat(60));
    println!(
        "   Stored:     {:.2} under {}",
        outcome.stored_score,
        outcome.stored_version.as_str()
    );
    println!(
        "   Recomputed: {:.2} under {}",
        outcome.recomputed.score,
        ScoreFormulaVersion::CURRENT.as_str()
    );
    println!("   Delta:      {:+.2}", outcome.delta);
    println!("   Decoupling: {:+.2}%", outcome.decoupling * 100.0);

    if outcome.is_changed() {
        println!("\nThe current revision moves this run's score.");
    } else {
        println!("\nThe stored score matches the current revision.");
    }
    Ok(())
}
