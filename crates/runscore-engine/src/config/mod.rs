// ABOUTME: Engine configuration aggregate with per-concern sub-configurations
// ABOUTME: Immutable value objects built from constants, env overrides, or caller values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Engine configuration
//!
//! The engine takes an [`EngineConfig`] by value at construction and never
//! mutates it. Each concern has its own small config struct with a `Default`
//! built from [`runscore_core::constants`] and a `from_env` constructor that
//! overrides individual tunables from environment variables, falling back to
//! the default on missing or unparseable values.

/// Composite score formula tunables
pub mod formula;

/// Gamification ladder and window tunables
pub mod gamification;

/// Rank ladder thresholds
pub mod rank;

/// Reference-time model tunables
pub mod reference;

/// Power zone cut-offs
pub mod zones;

pub use formula::FormulaConfig;
pub use gamification::GamificationConfig;
pub use rank::RankConfig;
pub use reference::ReferenceConfig;
pub use zones::ZonesConfig;

use crate::errors::ConfigError;
use runscore_core::constants::decoupling;
use serde::{Deserialize, Serialize};
use std::env;

/// Aerobic decoupling tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecouplingConfig {
    /// Minimum samples required in each stream before drift is computed
    pub min_stream_samples: usize,
}

impl Default for DecouplingConfig {
    fn default() -> Self {
        Self {
            min_stream_samples: decoupling::MIN_STREAM_SAMPLES,
        }
    }
}

impl DecouplingConfig {
    /// Load decoupling configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            min_stream_samples: env::var("DECOUPLING_MIN_STREAM_SAMPLES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(decoupling::MIN_STREAM_SAMPLES),
        }
    }
}

/// Complete, immutable configuration of a [`crate::engine::ScoreEngine`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Composite score formula tunables
    pub formula: FormulaConfig,
    /// Reference-time model tunables
    pub reference: ReferenceConfig,
    /// Power zone cut-offs
    pub zones: ZonesConfig,
    /// Rank ladder thresholds
    pub rank: RankConfig,
    /// Gamification ladder and window tunables
    pub gamification: GamificationConfig,
    /// Aerobic decoupling tunables
    pub decoupling: DecouplingConfig,
}

impl EngineConfig {
    /// Load the full engine configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            formula: FormulaConfig::from_env(),
            reference: ReferenceConfig::from_env(),
            zones: ZonesConfig::from_env(),
            rank: RankConfig::from_env(),
            gamification: GamificationConfig::from_env(),
            decoupling: DecouplingConfig::from_env(),
        }
    }

    /// Reject configurations whose ladders or bands are not ordered
    ///
    /// The formulas clamp their way around most nonsense, so validation is
    /// optional; callers that accept external overrides should run it once
    /// at startup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first inconsistent tunable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.formula.hrr_floor >= self.formula.hrr_ceiling {
            return Err(ConfigError::UnorderedLadder {
                ladder: "heart rate reserve band",
                order: "ascending",
            });
        }
        if self.formula.pace_ratio_floor >= self.formula.pace_ratio_ceiling {
            return Err(ConfigError::UnorderedLadder {
                ladder: "pace ratio band",
                order: "ascending",
            });
        }
        if self.formula.logistic_steepness <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "logistic_steepness",
                requirement: "positive",
                value: self.formula.logistic_steepness,
            });
        }
        if self.formula.reference_wkg <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "reference_wkg",
                requirement: "positive",
                value: self.formula.reference_wkg,
            });
        }

        let zone_cuts = [
            self.zones.zone1_ceiling,
            self.zones.zone2_ceiling,
            self.zones.zone3_ceiling,
            self.zones.zone4_ceiling,
            self.zones.zone5_ceiling,
        ];
        if zone_cuts.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::UnorderedLadder {
                ladder: "power zone cut-offs",
                order: "ascending",
            });
        }

        let rank_cuts = [
            self.rank.elite_min,
            self.rank.pro_min,
            self.rank.advanced_min,
            self.rank.intermediate_min,
        ];
        if rank_cuts.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::UnorderedLadder {
                ladder: "rank",
                order: "descending",
            });
        }

        let quality_cuts = [
            self.gamification.legendary_min,
            self.gamification.epic_min,
            self.gamification.great_min,
            self.gamification.solid_min,
            self.gamification.okay_min,
            self.gamification.weak_min,
        ];
        if quality_cuts.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::UnorderedLadder {
                ladder: "quality",
                order: "descending",
            });
        }

        let level_cuts = [
            self.reference.elite_percentile,
            self.reference.competitive_percentile,
            self.reference.trained_percentile,
            self.reference.recreational_percentile,
        ];
        if level_cuts.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::UnorderedLadder {
                ladder: "level percentile",
                order: "ascending",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_rank_ladder_is_rejected() {
        let mut config = EngineConfig::default();
        config.rank.elite_min = 10.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnorderedLadder { ladder, .. } if ladder == "rank"));
    }

    #[test]
    fn non_positive_steepness_is_rejected() {
        let mut config = EngineConfig::default();
        config.formula.logistic_steepness = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn crossed_hrr_band_is_rejected() {
        let mut config = EngineConfig::default();
        config.formula.hrr_floor = 0.96;
        assert!(config.validate().is_err());
    }
}
