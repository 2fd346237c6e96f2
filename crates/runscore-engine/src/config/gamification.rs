// ABOUTME: Gamification configuration: quality ladder, achievement windows, trend deltas
// ABOUTME: Defaults from core constants with environment variable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use runscore_core::constants::{gamification, quality};
use serde::{Deserialize, Serialize};
use std::env;

/// Tunables of the gamification layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Minimum score for a Legendary quality grade
    pub legendary_min: f64,
    /// Minimum score for an Epic quality grade
    pub epic_min: f64,
    /// Minimum score for a Great quality grade
    pub great_min: f64,
    /// Minimum score for a Solid quality grade
    pub solid_min: f64,
    /// Minimum score for an Okay quality grade
    pub okay_min: f64,
    /// Minimum score for a Weak quality grade; below is Wasted
    pub weak_min: f64,
    /// Latest-score threshold of the single-run Epic achievement
    pub epic_run_min: f64,
    /// Latest-score threshold of the single-run Legend achievement
    pub legend_run_min: f64,
    /// Window length of the short consistency achievement
    pub consistency_short_window: usize,
    /// Minimum average over the short consistency window
    pub consistency_short_min_avg: f64,
    /// Window length of the long consistency achievement
    pub consistency_long_window: usize,
    /// Minimum average over the long consistency window
    pub consistency_long_min_avg: f64,
    /// Number of strictly improving runs that lights the On Fire streak
    pub streak_length: usize,
    /// A comeback starts from a score at or below this floor
    pub comeback_floor: f64,
    /// A comeback completes with a score at or above this bar
    pub comeback_bar: f64,
    /// How far back the comeback rule looks for the dip
    pub comeback_window: usize,
    /// Window length compared by the quality-trend analysis
    pub trend_window: usize,
    /// Average-score delta below which the trend reads as flat
    pub trend_flat_delta: f64,
    /// Number of prior runs the latest run is compared against
    pub comparison_window: usize,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            legendary_min: quality::LEGENDARY_MIN,
            epic_min: quality::EPIC_MIN,
            great_min: quality::GREAT_MIN,
            solid_min: quality::SOLID_MIN,
            okay_min: quality::OKAY_MIN,
            weak_min: quality::WEAK_MIN,
            epic_run_min: gamification::EPIC_RUN_MIN,
            legend_run_min: gamification::LEGEND_RUN_MIN,
            consistency_short_window: gamification::CONSISTENCY_SHORT_WINDOW,
            consistency_short_min_avg: gamification::CONSISTENCY_SHORT_MIN_AVG,
            consistency_long_window: gamification::CONSISTENCY_LONG_WINDOW,
            consistency_long_min_avg: gamification::CONSISTENCY_LONG_MIN_AVG,
            streak_length: gamification::STREAK_LENGTH,
            comeback_floor: gamification::COMEBACK_FLOOR,
            comeback_bar: gamification::COMEBACK_BAR,
            comeback_window: gamification::COMEBACK_WINDOW,
            trend_window: gamification::TREND_WINDOW,
            trend_flat_delta: gamification::TREND_FLAT_DELTA,
            comparison_window: gamification::COMPARISON_WINDOW,
        }
    }
}

impl GamificationConfig {
    /// Load gamification configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            legendary_min: env::var("GAMIFICATION_LEGENDARY_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::LEGENDARY_MIN),
            epic_min: env::var("GAMIFICATION_EPIC_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::EPIC_MIN),
            great_min: env::var("GAMIFICATION_GREAT_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::GREAT_MIN),
            solid_min: env::var("GAMIFICATION_SOLID_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::SOLID_MIN),
            okay_min: env::var("GAMIFICATION_OKAY_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::OKAY_MIN),
            weak_min: env::var("GAMIFICATION_WEAK_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(quality::WEAK_MIN),
            epic_run_min: env::var("GAMIFICATION_EPIC_RUN_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::EPIC_RUN_MIN),
            legend_run_min: env::var("GAMIFICATION_LEGEND_RUN_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::LEGEND_RUN_MIN),
            consistency_short_window: env::var("GAMIFICATION_CONSISTENCY_SHORT_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::CONSISTENCY_SHORT_WINDOW),
            consistency_short_min_avg: env::var("GAMIFICATION_CONSISTENCY_SHORT_MIN_AVG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::CONSISTENCY_SHORT_MIN_AVG),
            consistency_long_window: env::var("GAMIFICATION_CONSISTENCY_LONG_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::CONSISTENCY_LONG_WINDOW),
            consistency_long_min_avg: env::var("GAMIFICATION_CONSISTENCY_LONG_MIN_AVG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::CONSISTENCY_LONG_MIN_AVG),
            streak_length: env::var("GAMIFICATION_STREAK_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::STREAK_LENGTH),
            comeback_floor: env::var("GAMIFICATION_COMEBACK_FLOOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::COMEBACK_FLOOR),
            comeback_bar: env::var("GAMIFICATION_COMEBACK_BAR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::COMEBACK_BAR),
            comeback_window: env::var("GAMIFICATION_COMEBACK_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::COMEBACK_WINDOW),
            trend_window: env::var("GAMIFICATION_TREND_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::TREND_WINDOW),
            trend_flat_delta: env::var("GAMIFICATION_TREND_FLAT_DELTA")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::TREND_FLAT_DELTA),
            comparison_window: env::var("GAMIFICATION_COMPARISON_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gamification::COMPARISON_WINDOW),
        }
    }
}
