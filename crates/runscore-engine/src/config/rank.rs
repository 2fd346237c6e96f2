// ABOUTME: Rank ladder threshold configuration on the normalized 0-100 score
// ABOUTME: Defaults from core constants with environment variable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use runscore_core::constants::rank;
use serde::{Deserialize, Serialize};
use std::env;

/// Rank ladder thresholds, checked top-down; anything below
/// `intermediate_min` is Rookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Minimum score for the Elite tier
    pub elite_min: f64,
    /// Minimum score for the Pro tier
    pub pro_min: f64,
    /// Minimum score for the Advanced tier
    pub advanced_min: f64,
    /// Minimum score for the Intermediate tier
    pub intermediate_min: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            elite_min: rank::ELITE_MIN,
            pro_min: rank::PRO_MIN,
            advanced_min: rank::ADVANCED_MIN,
            intermediate_min: rank::INTERMEDIATE_MIN,
        }
    }
}

impl RankConfig {
    /// Load rank configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            elite_min: env::var("RANK_ELITE_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(rank::ELITE_MIN),
            pro_min: env::var("RANK_PRO_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(rank::PRO_MIN),
            advanced_min: env::var("RANK_ADVANCED_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(rank::ADVANCED_MIN),
            intermediate_min: env::var("RANK_INTERMEDIATE_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(rank::INTERMEDIATE_MIN),
        }
    }
}
