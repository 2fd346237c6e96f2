// ABOUTME: Re-score stored runs under the current formula revision without mutation
// ABOUTME: Stored scores are immutable artifacts; replay reports drift, never rewrites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Formula-revision replay
//!
//! A stored [`RunRecord`] keeps the score and [`ScoreFormulaVersion`] it was
//! originally computed under. Replay recomputes decoupling and score from the
//! record's own metrics and streams under the *current* revision and reports
//! both side by side. The record itself is never touched, so histories scored
//! under retired revisions remain comparable artifacts.

use crate::config::EngineConfig;
use crate::{decoupling, formula};
use runscore_core::{RunRecord, ScoreFormulaVersion, ScoreResult};
use serde::{Deserialize, Serialize};

/// A stored run re-scored under the current formula revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Activity id of the replayed record
    pub id: String,
    /// Score the record was stored with
    pub stored_score: f64,
    /// Formula revision the stored score was computed under
    pub stored_version: ScoreFormulaVersion,
    /// Decoupling recomputed from the stored streams
    pub decoupling: f64,
    /// Full result under [`ScoreFormulaVersion::CURRENT`]
    pub recomputed: ScoreResult,
    /// `recomputed.score - stored_score`
    pub delta: f64,
}

impl ReplayOutcome {
    /// Whether the current revision moves this run's score at all
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.delta.abs() > f64::EPSILON
    }
}

/// Re-score a stored record under the current formula revision
///
/// Total like the rest of the engine surface: a record whose metrics cannot
/// support a score replays to the zero-score fallback.
#[must_use]
pub fn replay(record: &RunRecord, config: &EngineConfig) -> ReplayOutcome {
    let drift = decoupling::aerobic_decoupling(
        &record.streams.watts,
        &record.streams.heart_rate,
        config.decoupling.min_stream_samples,
    );
    let recomputed = formula::evaluate_or_fallback(&record.metrics, drift, config);
    let delta = recomputed.score - record.score;

    ReplayOutcome {
        id: record.id.clone(),
        stored_score: record.score,
        stored_version: record.version,
        decoupling: drift,
        recomputed,
        delta,
    }
}
