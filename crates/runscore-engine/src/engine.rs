// ABOUTME: ScoreEngine facade bundling decoupling, scoring, ranks, zones and feedback
// ABOUTME: One immutable config injected at construction; every method is pure and total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! The scoring engine facade
//!
//! [`ScoreEngine`] owns one immutable [`EngineConfig`] and delegates to the
//! focused modules of this crate. Construct it once and share it freely:
//! every method takes `&self`, holds no interior state, and never panics on
//! degenerate input, so concurrent callers need no locking.

use crate::config::EngineConfig;
use crate::gamification::{self, GamingFeedback};
use crate::reference::{self, DistanceBucket};
use crate::replay::{self, ReplayOutcome};
use crate::zones::{self, PowerZone};
use crate::{decoupling, formula, rank};
use runscore_core::{RankTier, RunMetrics, RunRecord, ScoreResult, Sex};
use std::collections::BTreeMap;

/// Stateless scoring engine over one immutable configuration
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: EngineConfig,
}

impl ScoreEngine {
    /// Engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an explicit configuration, typically from
    /// [`EngineConfig::from_env`]
    #[must_use]
    pub const fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine scores under
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aerobic decoupling between the two halves of a session
    ///
    /// Returns exactly `0.0` for empty, mismatched, or too-short streams.
    /// The sign is kept: negative drift means efficiency improved across the
    /// session. See [`crate::decoupling::aerobic_decoupling`].
    #[must_use]
    pub fn calculate_decoupling(&self, watts: &[f64], heart_rate: &[f64]) -> f64 {
        decoupling::aerobic_decoupling(
            watts,
            heart_rate,
            self.config.decoupling.min_stream_samples,
        )
    }

    /// Composite 0-100 score for one run
    ///
    /// Never fails: metrics that cannot support a score, or a non-finite
    /// intermediate, are logged and mapped to the zero-score fallback, so
    /// callers can render or persist the result unconditionally.
    #[must_use]
    pub fn compute_score(&self, metrics: &RunMetrics, decoupling: f64) -> ScoreResult {
        formula::evaluate_or_fallback(metrics, decoupling, &self.config)
    }

    /// Rank tier for a composite score
    #[must_use]
    pub fn get_rank(&self, score: f64) -> RankTier {
        rank::rank_for(score, &self.config.rank)
    }

    /// Share of time per power zone, in percent of valid samples
    ///
    /// Empty map when the stream is empty or FTP is non-positive.
    #[must_use]
    pub fn calculate_zones(&self, watts: &[f64], ftp: f64) -> BTreeMap<PowerZone, f64> {
        zones::zone_distribution(watts, ftp, &self.config.zones)
    }

    /// Fraction of the reference population expected to finish a run of
    /// `distance_meters` faster than `seconds` (lower is better)
    #[must_use]
    pub fn population_percentile(
        &self,
        distance_meters: f64,
        sex: Sex,
        age: u32,
        seconds: f64,
    ) -> f64 {
        reference::population_percentile(
            DistanceBucket::for_distance(distance_meters),
            sex,
            age,
            seconds,
            &self.config.reference,
        )
    }

    /// Gamification bundle for the latest score in `history`
    #[must_use]
    pub fn gaming_feedback(&self, history: &[f64]) -> GamingFeedback {
        gamification::feedback(history, &self.config.gamification)
    }

    /// Re-score a stored record under the current formula revision
    #[must_use]
    pub fn replay(&self, record: &RunRecord) -> ReplayOutcome {
        replay::replay(record, &self.config)
    }
}
