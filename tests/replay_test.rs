// ABOUTME: Replay flows over records scored under the live formula revision
// ABOUTME: Covers the save-then-replay JSON round trip and tamper detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use runscore_core::{RawStreams, RunMetrics, RunRecord, ScoreFormulaVersion};
use runscore_engine::ScoreEngine;

/// Score a session exactly the way the sync pipeline stores it
fn freshly_scored_record(engine: &ScoreEngine) -> RunRecord {
    let metrics = RunMetrics {
        avg_power: 250.0,
        avg_hr: 160.0,
        distance_meters: 10_000.0,
        moving_time_seconds: 2_700,
        elevation_gain_meters: 50.0,
        ..RunMetrics::default()
    };
    let mut heart_rate = vec![158.0; 1_350];
    heart_rate.extend(vec![162.0; 1_350]);
    let streams = RawStreams::new(vec![250.0; 2_700], heart_rate);

    let decoupling = engine.calculate_decoupling(&streams.watts, &streams.heart_rate);
    let result = engine.compute_score(&metrics, decoupling);
    let rank = engine.get_rank(result.score);

    RunRecord {
        id: "device-20240601".to_owned(),
        name: "Tempo Tuesday".to_owned(),
        start_date: Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap(),
        metrics,
        streams,
        decoupling,
        score: result.score,
        version: result.version,
        rank,
        quality: result.quality,
    }
}

#[test]
fn fresh_record_replays_with_zero_delta() {
    let engine = ScoreEngine::new();
    let record = freshly_scored_record(&engine);

    let outcome = engine.replay(&record);
    assert_eq!(outcome.stored_version, ScoreFormulaVersion::CURRENT);
    assert_eq!(outcome.recomputed.version, ScoreFormulaVersion::CURRENT);
    assert!(
        outcome.delta.abs() < 1e-9,
        "a record scored under the live revision must replay to itself, delta {}",
        outcome.delta
    );
    assert!(!outcome.is_changed());
    assert!(
        (outcome.decoupling - record.decoupling).abs() < 1e-12,
        "decoupling recomputes from the stored streams"
    );
}

#[test]
fn saved_record_survives_the_json_round_trip() {
    let engine = ScoreEngine::new();
    let record = freshly_scored_record(&engine);

    let json = serde_json::to_string_pretty(&record).unwrap();
    assert!(
        json.contains("\"v4_percentile\""),
        "version tag must be readable in the saved file"
    );

    let restored: RunRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, record);

    let outcome = engine.replay(&restored);
    assert!(!outcome.is_changed(), "delta {}", outcome.delta);
}

#[test]
fn tampered_stored_score_is_flagged() {
    let engine = ScoreEngine::new();
    let mut record = freshly_scored_record(&engine);
    record.score += 5.0;

    let outcome = engine.replay(&record);
    assert!(outcome.is_changed());
    assert!(
        (outcome.delta + 5.0).abs() < 1e-9,
        "padding the stored score shows up as a negative delta, got {}",
        outcome.delta
    );
}

#[test]
fn legacy_revision_tag_is_preserved() {
    let engine = ScoreEngine::new();
    let mut record = freshly_scored_record(&engine);
    record.version = ScoreFormulaVersion::V2PaceRatio;
    record.score = 71.3;

    let outcome = engine.replay(&record);
    assert_eq!(outcome.stored_version, ScoreFormulaVersion::V2PaceRatio);
    assert_eq!(outcome.recomputed.version, ScoreFormulaVersion::CURRENT);
    assert!((outcome.stored_score - 71.3).abs() < f64::EPSILON);
    // The record itself stays an immutable artifact.
    assert_eq!(record.version, ScoreFormulaVersion::V2PaceRatio);
}
